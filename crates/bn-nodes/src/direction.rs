//! Behaviors that derive directions and points from other state.

use bn_behavior::{Behavior, PhaseSet, TickContext};
use bn_cell::CellId;
use bn_core::math::{normalize_or_zero, within_deadzone};
use bn_core::{EntityId, Plane, Vec3};

/// Velocity components inside `±VELOCITY_DEADZONE` count as standing still.
pub const VELOCITY_DEADZONE: f32 = 0.1;

// ── DirWithVelocity ───────────────────────────────────────────────────────────

/// Publishes the body's normalized velocity.  While the body is effectively
/// stationary the outputs keep their previous value, so a ship keeps facing
/// the way it last moved.
pub struct DirWithVelocity {
    pub body:    EntityId,
    pub outputs: Vec<CellId<Vec3>>,
}

impl Behavior for DirWithVelocity {
    fn name(&self) -> &str {
        "dir_with_velocity"
    }

    fn phases(&self) -> PhaseSet {
        PhaseSet::TICK
    }

    fn on_tick(&mut self, ctx: &mut TickContext<'_>) {
        let Some(v) = ctx.host.velocity(self.body) else {
            return;
        };
        if within_deadzone(v, VELOCITY_DEADZONE) {
            return;
        }
        ctx.cells.write_all(&self.outputs, &v.normalize());
    }
}

// ── DirToPoint ────────────────────────────────────────────────────────────────

/// `point = dir * range`.  A zero direction leaves `point` alone unless
/// `apply_zero` is set.
pub struct DirToPoint {
    pub dir:        CellId<Vec3>,
    pub range:      f32,
    pub apply_zero: bool,
    pub point:      CellId<Vec3>,
}

impl Behavior for DirToPoint {
    fn name(&self) -> &str {
        "dir_to_point"
    }

    fn phases(&self) -> PhaseSet {
        PhaseSet::TICK
    }

    fn on_tick(&mut self, ctx: &mut TickContext<'_>) {
        let dir = ctx.cells.read(self.dir);
        if dir == Vec3::ZERO && !self.apply_zero {
            return;
        }
        ctx.cells.write(self.point, dir * self.range);
    }
}

// ── TargetDirection ───────────────────────────────────────────────────────────

/// Follows the entity in `target` and publishes unit directions from `owner`
/// towards it.
///
/// `full` receives the 3-D direction; each `(plane, cell)` pair receives the
/// direction with the plane normal removed, renormalized.  The target handle
/// itself is copied into `targets`.  If either entity is missing every
/// direction output is zeroed.
pub struct TargetDirection {
    pub owner:   EntityId,
    pub target:  CellId<EntityId>,
    pub targets: Vec<CellId<EntityId>>,
    pub full:    Vec<CellId<Vec3>>,
    pub planar:  Vec<(Plane, CellId<Vec3>)>,
}

impl TargetDirection {
    pub fn new(owner: EntityId, target: CellId<EntityId>) -> Self {
        Self { owner, target, targets: Vec::new(), full: Vec::new(), planar: Vec::new() }
    }

    pub fn copy_target(mut self, cell: CellId<EntityId>) -> Self {
        self.targets.push(cell);
        self
    }

    pub fn output(mut self, cell: CellId<Vec3>) -> Self {
        self.full.push(cell);
        self
    }

    pub fn output_in(mut self, plane: Plane, cell: CellId<Vec3>) -> Self {
        self.planar.push((plane, cell));
        self
    }

    fn zero_outputs(&self, ctx: &mut TickContext<'_>) {
        ctx.cells.write_all(&self.full, &Vec3::ZERO);
        for &(_, cell) in &self.planar {
            ctx.cells.write(cell, Vec3::ZERO);
        }
    }
}

impl Behavior for TargetDirection {
    fn name(&self) -> &str {
        "target_direction"
    }

    fn phases(&self) -> PhaseSet {
        PhaseSet::TICK
    }

    fn on_tick(&mut self, ctx: &mut TickContext<'_>) {
        let target = ctx.cells.read(self.target);
        ctx.cells.write_all(&self.targets, &target);

        let (Some(from), Some(to)) = (ctx.host.position(self.owner), ctx.host.position(target))
        else {
            self.zero_outputs(ctx);
            return;
        };
        let offset = to - from;
        ctx.cells.write_all(&self.full, &normalize_or_zero(offset));
        for &(plane, cell) in &self.planar {
            ctx.cells.write(cell, normalize_or_zero(plane.flatten(offset)));
        }
    }
}
