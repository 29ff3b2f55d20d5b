//! `TraceObserver<W>` — bridges `RunObserver` to a `TraceWriter`.

use bn_cell::CellTable;
use bn_core::{RunConfig, Tick};
use bn_sim::RunObserver;
use bn_world::World;

use crate::row::{CellSnapshotRow, EntitySnapshotRow, FrameSummaryRow};
use crate::writer::TraceWriter;
use crate::{OutputError, OutputResult};

/// A [`RunObserver`] that writes frame summaries plus entity and cell
/// snapshots to any [`TraceWriter`] backend.
///
/// Errors from the writer are stored internally because `RunObserver` methods
/// have no return value.  After `runner.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct TraceObserver<W: TraceWriter> {
    writer:     W,
    frame_secs: f64,
    /// Record cell values in snapshots.  Default: true.
    pub cells:  bool,
    last_error: Option<OutputError>,
}

impl<W: TraceWriter> TraceObserver<W> {
    /// Create an observer backed by `writer`, using `config` to convert frames
    /// to simulated time.
    pub fn new(writer: W, config: &RunConfig) -> Self {
        Self {
            writer,
            frame_secs: f64::from(config.frame_secs),
            cells:      true,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `runner.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                log::warn!("trace output failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TraceWriter> RunObserver for TraceObserver<W> {
    fn on_frame_end(&mut self, frame: Tick, fixed_steps: u32) {
        let row = FrameSummaryRow {
            frame:         frame.0,
            sim_time_secs: frame.0 as f64 * self.frame_secs,
            fixed_steps,
        };
        let result = self.writer.write_frame_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, frame: Tick, world: &World, cells: &CellTable) {
        let entities: Vec<EntitySnapshotRow> = world
            .iter_alive()
            .map(|e| {
                let i = e.index();
                EntitySnapshotRow {
                    entity_id: e.0,
                    frame:     frame.0,
                    tag:       world.tag[i].clone(),
                    layer:     world.layer[i],
                    position:  world.position[i].to_array(),
                    velocity:  world.velocity[i].to_array(),
                }
            })
            .collect();
        if !entities.is_empty() {
            let result = self.writer.write_entities(&entities);
            self.store_err(result);
        }

        if self.cells {
            let rows: Vec<CellSnapshotRow> = cells
                .snapshot()
                .map(|(name, value)| CellSnapshotRow { frame: frame.0, cell: name.to_owned(), value })
                .collect();
            if !rows.is_empty() {
                let result = self.writer.write_cells(&rows);
                self.store_err(result);
            }
        }
    }

    fn on_run_end(&mut self, final_frame: Tick) {
        log::debug!("trace closed at {final_frame}");
        let result = self.writer.finish();
        self.store_err(result);
    }
}
