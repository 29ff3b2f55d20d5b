//! `bn-output` — run trace writers for the rust_bn framework.
//!
//! | Backend | Files created                                                        |
//! |---------|----------------------------------------------------------------------|
//! | CSV     | `frame_summaries.csv`, `entity_snapshots.csv`, `cell_snapshots.csv`  |
//!
//! Backends implement [`TraceWriter`] and are driven by [`TraceObserver`],
//! which implements `bn_sim::RunObserver`.  Snapshots are taken every
//! `RunConfig::snapshot_interval_frames` frames; summaries every frame.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bn_output::{CsvWriter, TraceObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TraceObserver::new(writer, &runner.config);
//! runner.run(&mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{CellSnapshotRow, EntitySnapshotRow, FrameSummaryRow};
pub use writer::TraceWriter;
