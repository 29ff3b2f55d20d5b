//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `frame_summaries.csv`
//! - `entity_snapshots.csv`
//! - `cell_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TraceWriter;
use crate::{CellSnapshotRow, EntitySnapshotRow, FrameSummaryRow, OutputResult};

/// Writes trace output to three CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    entities:  Writer<File>,
    cells:     Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut summaries = Writer::from_path(dir.join("frame_summaries.csv"))?;
        summaries.write_record(["frame", "sim_time_secs", "fixed_steps"])?;

        let mut entities = Writer::from_path(dir.join("entity_snapshots.csv"))?;
        entities.write_record(["entity_id", "frame", "tag", "layer", "x", "y", "z", "vx", "vy", "vz"])?;

        let mut cells = Writer::from_path(dir.join("cell_snapshots.csv"))?;
        cells.write_record(["frame", "cell", "value"])?;

        Ok(Self { summaries, entities, cells, finished: false })
    }
}

impl TraceWriter for CsvWriter {
    fn write_entities(&mut self, rows: &[EntitySnapshotRow]) -> OutputResult<()> {
        for row in rows {
            let [x, y, z] = row.position;
            let [vx, vy, vz] = row.velocity;
            self.entities.write_record(&[
                row.entity_id.to_string(),
                row.frame.to_string(),
                row.tag.clone(),
                row.layer.to_string(),
                x.to_string(),
                y.to_string(),
                z.to_string(),
                vx.to_string(),
                vy.to_string(),
                vz.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_cells(&mut self, rows: &[CellSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.cells.write_record([row.frame.to_string().as_str(), row.cell.as_str(), row.value.as_str()])?;
        }
        Ok(())
    }

    fn write_frame_summary(&mut self, row: &FrameSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.frame.to_string(),
            row.sim_time_secs.to_string(),
            row.fixed_steps.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.entities.flush()?;
        self.cells.flush()?;
        Ok(())
    }
}
