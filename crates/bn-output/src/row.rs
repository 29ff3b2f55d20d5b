//! Plain data row types written by trace backends.

/// Summary of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummaryRow {
    pub frame:         u64,
    /// Simulated seconds at the start of the frame.
    pub sim_time_secs: f64,
    pub fixed_steps:   u32,
}

/// One live entity's pose and velocity at a snapshot frame.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySnapshotRow {
    pub entity_id: u32,
    pub frame:     u64,
    pub tag:       String,
    pub layer:     u8,
    pub position:  [f32; 3],
    pub velocity:  [f32; 3],
}

/// One cell's rendered value at a snapshot frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSnapshotRow {
    pub frame: u64,
    pub cell:  String,
    pub value: String,
}
