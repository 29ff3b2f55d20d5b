//! Runner observer trait for progress reporting and data collection.

use bn_cell::CellTable;
use bn_core::Tick;
use bn_world::World;

/// Callbacks invoked by [`Runner::run`][crate::Runner::run] at key points in
/// the frame loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl RunObserver for ProgressPrinter {
///     fn on_frame_end(&mut self, frame: Tick, fixed_steps: u32) {
///         if frame.0 % self.interval == 0 {
///             println!("{frame}: {fixed_steps} fixed steps");
///         }
///     }
/// }
/// ```
pub trait RunObserver {
    /// Called at the very start of each frame, before any fixed step.
    fn on_frame_start(&mut self, _frame: Tick) {}

    /// Called after the frame's variable tick.  `fixed_steps` is the number
    /// of fixed ticks that ran before it.
    fn on_frame_end(&mut self, _frame: Tick, _fixed_steps: u32) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_frames`
    /// frames).
    ///
    /// Provides read-only access to the world and the cell table so output
    /// writers can record state without the runner knowing any format.
    fn on_snapshot(&mut self, _frame: Tick, _world: &World, _cells: &CellTable) {}

    /// Called once after the End phase has run.
    fn on_run_end(&mut self, _final_frame: Tick) {}
}

/// A [`RunObserver`] that does nothing.
pub struct NoopObserver;

impl RunObserver for NoopObserver {}
