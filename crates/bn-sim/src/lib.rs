//! `bn-sim` — frame loop orchestrator for the rust_bn framework.
//!
//! # Frame loop
//!
//! ```text
//! start:                     Start phase, root first, then each child in
//!                            start-queue order (recursively)
//! for frame in 0..config.total_frames:
//!   ① Fixed steps — clock.advance(frame_secs) yields N ≤ max steps;
//!                   per step: FixedTick dispatch, then World::integrate
//!   ② Tick        — one variable Tick dispatch with the frame delta
//!   ③ Input       — press edges cleared
//! end:                       End phase, mirroring start
//! ```
//!
//! Fixed and variable dispatches never interleave: every fixed step of a
//! frame finishes before that frame's tick.  There is exactly one walk of
//! the tree per phase; nodes never schedule themselves.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bn_core::RunConfig;
//! use bn_sim::{NoopObserver, RunnerBuilder};
//!
//! let mut runner = RunnerBuilder::new(RunConfig::default())
//!     .world(world)
//!     .cells(cells)
//!     .events(events)
//!     .scene(scene)
//!     .build()?;
//! runner.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod runner;


pub use builder::RunnerBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, RunObserver};
pub use runner::Runner;
