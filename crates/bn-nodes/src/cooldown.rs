//! Cooldown timer and the time-based trigger built on it.
//!
//! # State machine
//!
//! ```text
//! reset()            → COOLING, remaining = duration
//! cool_down(step)    → remaining = max(remaining - step, 0)
//! remaining == 0     → READY
//! ```
//!
//! Starting from `reset()` with duration `D` and fixed step `S`, READY is
//! reached after exactly `⌈D / S⌉` fixed ticks.  The countdown runs in `f64`
//! and residue up to [`SNAP_FRACTION`] of the step counts as elapsed, so a
//! duration that is a whole number of steps never takes one tick more.

use bn_behavior::{Behavior, PhaseSet, TickContext};
use bn_cell::CellId;
use bn_core::EventId;

use crate::{NodeError, NodeResult};

/// Remaining time at or below this fraction of the step counts as elapsed.
pub const SNAP_FRACTION: f64 = 1e-3;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum CooldownState {
    Cooling,
    Ready,
}

/// A countdown stored in a cell so several behaviors can share it.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Cooldown {
    pub duration:  f32,
    pub remaining: f64,
}

impl Cooldown {
    /// A cooldown that starts COOLING with the full duration remaining.
    pub fn new(duration: f32) -> NodeResult<Self> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(NodeError::InvalidDuration(duration));
        }
        Ok(Self { duration, remaining: f64::from(duration) })
    }

    /// Force COOLING with the full duration remaining.
    #[inline]
    pub fn reset(&mut self) {
        self.remaining = f64::from(self.duration);
    }

    /// Consume one step of time.
    pub fn cool_down(&mut self, step: f32) {
        let step = f64::from(step.max(0.0));
        self.remaining = (self.remaining - step).max(0.0);
        if self.remaining <= step * SNAP_FRACTION {
            self.remaining = 0.0;
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn state(&self) -> CooldownState {
        if self.is_ready() { CooldownState::Ready } else { CooldownState::Cooling }
    }
}

/// What happens after a READY trigger fires.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Rearm {
    /// Stay READY and fire again on every fixed tick until something
    /// external resets the cooldown.
    #[default]
    Manual,
    /// Reset the cooldown right after firing: one shot per period.
    AfterFire,
}

/// Counts a shared cooldown down on every fixed tick and invokes `event`
/// while it is READY.
///
/// `on_start` resets the cooldown.
pub struct TriggerByTime {
    pub cooldown: CellId<Cooldown>,
    pub event:    EventId,
    pub rearm:    Rearm,
}

impl TriggerByTime {
    pub fn new(cooldown: CellId<Cooldown>, event: EventId) -> Self {
        Self { cooldown, event, rearm: Rearm::Manual }
    }

    pub fn with_rearm(mut self, rearm: Rearm) -> Self {
        self.rearm = rearm;
        self
    }
}

impl Behavior for TriggerByTime {
    fn name(&self) -> &str {
        "trigger_by_time"
    }

    fn phases(&self) -> PhaseSet {
        PhaseSet::START | PhaseSet::FIXED_TICK
    }

    fn on_start(&mut self, ctx: &mut TickContext<'_>) {
        ctx.cells.update(self.cooldown, Cooldown::reset);
    }

    fn on_fixed_tick(&mut self, ctx: &mut TickContext<'_>) {
        let step = ctx.dt;
        let mut ready = false;
        ctx.cells.update(self.cooldown, |cd| {
            cd.cool_down(step);
            ready = cd.is_ready();
        });
        if !ready {
            return;
        }
        ctx.invoke(self.event);
        if self.rearm == Rearm::AfterFire {
            ctx.cells.update(self.cooldown, Cooldown::reset);
        }
    }
}
