use bn_behavior::{Behavior, PhaseSet, TickContext};
use bn_cell::CellId;
use bn_core::math::look_rotation;
use bn_core::{EntityId, Vec3};

/// Turns `body` towards the direction in `dir`, covering `speed * dt` of the
/// remaining angle per frame (clamped to a full turn).
///
/// Does nothing while the direction is zero or the body is gone.
pub struct RotateByDir {
    pub body:  EntityId,
    pub dir:   CellId<Vec3>,
    pub speed: f32,
}

impl Behavior for RotateByDir {
    fn name(&self) -> &str {
        "rotate_by_dir"
    }

    fn phases(&self) -> PhaseSet {
        PhaseSet::TICK
    }

    fn on_tick(&mut self, ctx: &mut TickContext<'_>) {
        let Some(forward) = ctx.cells.read(self.dir).try_normalize() else {
            return;
        };
        let Some(current) = ctx.host.rotation(self.body) else {
            return;
        };
        let goal = look_rotation(forward, Vec3::Y);
        let t = (self.speed * ctx.dt).clamp(0.0, 1.0);
        ctx.host.set_rotation(self.body, current.lerp(goal, t));
    }
}
