//! Event triggers driven by distance and input.

use bn_behavior::{Behavior, KeyMode, PhaseSet, TickContext};
use bn_cell::CellId;
use bn_core::{EntityId, EventId, Plane};

/// Fires `event` on every fixed tick while the planar (XY) distance from
/// `owner` to the entity in `start_point` is at least `distance`.
///
/// Typical use: despawn a projectile once it has travelled far enough from
/// where it was fired.
pub struct TriggerByDistance {
    pub owner:       EntityId,
    pub start_point: CellId<EntityId>,
    pub distance:    f32,
    pub event:       EventId,
}

impl Behavior for TriggerByDistance {
    fn name(&self) -> &str {
        "trigger_by_distance"
    }

    fn phases(&self) -> PhaseSet {
        PhaseSet::FIXED_TICK
    }

    fn on_fixed_tick(&mut self, ctx: &mut TickContext<'_>) {
        let start = ctx.cells.read(self.start_point);
        let (Some(here), Some(there)) = (ctx.host.position(self.owner), ctx.host.position(start))
        else {
            return;
        };
        let travelled = Plane::XY.project(here).distance(Plane::XY.project(there));
        if travelled >= self.distance {
            ctx.invoke(self.event);
        }
    }
}

/// Polls `key` every frame and fires `event` when it reads true.
pub struct TriggerByInput {
    pub key:   String,
    pub mode:  KeyMode,
    pub event: EventId,
}

impl TriggerByInput {
    pub fn new(key: impl Into<String>, mode: KeyMode, event: EventId) -> Self {
        Self { key: key.into(), mode, event }
    }
}

impl Behavior for TriggerByInput {
    fn name(&self) -> &str {
        "trigger_by_input"
    }

    fn phases(&self) -> PhaseSet {
        PhaseSet::TICK
    }

    fn on_tick(&mut self, ctx: &mut TickContext<'_>) {
        if ctx.host.key(&self.key, self.mode) {
            ctx.invoke(self.event);
        }
    }
}
