//! Input-driven direction.

use bn_behavior::{Behavior, PhaseSet, TickContext};
use bn_cell::CellId;
use bn_core::math::snap_axis;
use bn_core::{Plane, Vec2, Vec3};

/// Reads two axes every frame, snaps each to `{-1, 0, 1}` and publishes the
/// result as a 2-D direction and as 3-D directions embedded in chosen planes.
pub struct DirectByInput {
    pub horizontal: String,
    pub vertical:   String,
    pub dir_2d:     Vec<CellId<Vec2>>,
    /// `(plane, cell)` pairs; the 2-D value is embedded into `plane`.
    pub dir_3d:     Vec<(Plane, CellId<Vec3>)>,
}

impl DirectByInput {
    /// Reads the conventional `Horizontal` / `Vertical` axes.
    pub fn new() -> Self {
        Self {
            horizontal: "Horizontal".to_owned(),
            vertical:   "Vertical".to_owned(),
            dir_2d:     Vec::new(),
            dir_3d:     Vec::new(),
        }
    }

    pub fn output_2d(mut self, cell: CellId<Vec2>) -> Self {
        self.dir_2d.push(cell);
        self
    }

    pub fn output(mut self, plane: Plane, cell: CellId<Vec3>) -> Self {
        self.dir_3d.push((plane, cell));
        self
    }
}

impl Default for DirectByInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for DirectByInput {
    fn name(&self) -> &str {
        "direct_by_input"
    }

    fn phases(&self) -> PhaseSet {
        PhaseSet::TICK
    }

    fn on_tick(&mut self, ctx: &mut TickContext<'_>) {
        let dir = Vec2::new(
            snap_axis(ctx.host.axis(&self.horizontal)),
            snap_axis(ctx.host.axis(&self.vertical)),
        );
        ctx.cells.write_all(&self.dir_2d, &dir);
        for &(plane, cell) in &self.dir_3d {
            ctx.cells.write(cell, plane.embed(dir));
        }
    }
}
