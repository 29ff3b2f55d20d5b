//! The `TraceWriter` trait implemented by backend writers.

use crate::{CellSnapshotRow, EntitySnapshotRow, FrameSummaryRow, OutputResult};

/// Trait implemented by trace writers.
///
/// The observer never propagates these errors.  They are stored and
/// retrieved with [`TraceObserver::take_error`][crate::TraceObserver::take_error].
pub trait TraceWriter {
    /// Write a batch of entity snapshots.
    fn write_entities(&mut self, rows: &[EntitySnapshotRow]) -> OutputResult<()>;

    /// Write a batch of cell snapshots.
    fn write_cells(&mut self, rows: &[CellSnapshotRow]) -> OutputResult<()>;

    /// Write one frame summary row.
    fn write_frame_summary(&mut self, row: &FrameSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
