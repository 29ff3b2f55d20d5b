//! The `Behavior` trait — the main extension point for user code.

use crate::{Phase, PhaseSet, TickContext};

/// A unit of per-frame logic with four optional lifecycle hooks.
///
/// Behaviors live in the `bn-tree` scene arena and never hold references to
/// each other.  Everything they exchange goes
/// through cells ([`TickContext::cells`]) using handles resolved when the
/// behavior was configured.
///
/// # Phase membership
///
/// [`phases`][Self::phases] tells the parent composite which queues to put
/// this behavior in.  It is read when the parent rebuilds its queues, not on
/// every tick.  A behavior that owns children must be in a phase's queue for
/// those children to receive that phase.
///
/// # Example
///
/// ```rust,ignore
/// struct CountTicks { hits: CellId<u32> }
///
/// impl Behavior for CountTicks {
///     fn phases(&self) -> PhaseSet { PhaseSet::TICK }
///
///     fn on_tick(&mut self, ctx: &mut TickContext<'_>) {
///         ctx.cells.update(self.hits, |n| *n += 1);
///     }
/// }
/// ```
pub trait Behavior: 'static {
    /// Short label used in logs and traces.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Phases this behavior takes part in.  Default: all four.
    fn phases(&self) -> PhaseSet {
        PhaseSet::ALL
    }

    /// Called once when the governing composite activates, before later
    /// siblings' `on_start`.
    fn on_start(&mut self, _ctx: &mut TickContext<'_>) {}

    /// Called once per frame while active.
    fn on_tick(&mut self, _ctx: &mut TickContext<'_>) {}

    /// Called once per fixed step while active.
    fn on_fixed_tick(&mut self, _ctx: &mut TickContext<'_>) {}

    /// Called once when the governing composite deactivates, regardless of
    /// this behavior's activity flag.
    fn on_end(&mut self, _ctx: &mut TickContext<'_>) {}
}

/// Invoke the hook matching `phase`.
#[inline]
pub fn run_hook(behavior: &mut dyn Behavior, phase: Phase, ctx: &mut TickContext<'_>) {
    match phase {
        Phase::Start => behavior.on_start(ctx),
        Phase::Tick => behavior.on_tick(ctx),
        Phase::FixedTick => behavior.on_fixed_tick(ctx),
        Phase::End => behavior.on_end(ctx),
    }
}
