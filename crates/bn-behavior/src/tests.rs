//! Unit tests for bn-behavior.

use bn_cell::{CellId, CellTable};
use bn_core::{NodeId, Tick};

use crate::{
    ActivityFlags, Behavior, Env, EventBus, Group, Noop, NullHost, Phase, PhaseSet, TickContext,
    run_hook,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Records every hook call into a `u32` cell as a decimal digit trail.
struct Recorder {
    trail: CellId<u32>,
}

impl Behavior for Recorder {
    fn on_start(&mut self, ctx: &mut TickContext<'_>) {
        ctx.cells.update(self.trail, |t| *t = *t * 10 + 1);
    }
    fn on_tick(&mut self, ctx: &mut TickContext<'_>) {
        ctx.cells.update(self.trail, |t| *t = *t * 10 + 2);
    }
    fn on_fixed_tick(&mut self, ctx: &mut TickContext<'_>) {
        ctx.cells.update(self.trail, |t| *t = *t * 10 + 3);
    }
    fn on_end(&mut self, ctx: &mut TickContext<'_>) {
        ctx.cells.update(self.trail, |t| *t = *t * 10 + 4);
    }
}

// ── Phase / PhaseSet ──────────────────────────────────────────────────────────

#[cfg(test)]
mod phase_tests {
    use super::*;

    #[test]
    fn indices_follow_declaration_order() {
        let idx: Vec<usize> = Phase::ALL.iter().map(|p| p.index()).collect();
        assert_eq!(idx, vec![0, 1, 2, 3]);
    }

    #[test]
    fn set_membership() {
        let set = PhaseSet::TICK | PhaseSet::END;
        assert!(set.contains(Phase::Tick));
        assert!(set.contains(Phase::End));
        assert!(!set.contains(Phase::Start));
        assert!(!set.contains(Phase::FixedTick));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Phase::Tick, Phase::End]);
    }

    #[test]
    fn all_and_empty() {
        assert_eq!(PhaseSet::ALL.iter().count(), 4);
        assert!(PhaseSet::EMPTY.is_empty());
        assert_eq!(PhaseSet::ALL.without(PhaseSet::ALL), PhaseSet::EMPTY);
        assert_eq!(PhaseSet::from(Phase::FixedTick), PhaseSet::FIXED_TICK);
    }

    #[test]
    fn display_names() {
        assert_eq!(Phase::FixedTick.to_string(), "fixed_tick");
        assert_eq!(format!("{:?}", PhaseSet::START | PhaseSet::END), "{Start, End}");
    }
}

// ── Behavior trait ────────────────────────────────────────────────────────────

#[cfg(test)]
mod model_tests {
    use super::*;

    #[test]
    fn run_hook_dispatches_by_phase() {
        let mut cells = CellTable::new();
        let trail = cells.alloc::<u32>("trail");
        let mut events = EventBus::new();
        let mut activity = ActivityFlags::new();
        let mut host = NullHost;
        let mut env = Env::new(Tick(0), 0.02, &mut cells, &mut events, &mut host);
        let mut rec = Recorder { trail };

        for phase in Phase::ALL {
            let mut ctx = env.context(phase, NodeId::new(0, 0), &mut activity);
            run_hook(&mut rec, phase, &mut ctx);
        }
        assert_eq!(cells.read(trail), 1234);
    }

    #[test]
    fn default_phases_and_names() {
        assert_eq!(Recorder { trail: CellTable::new().alloc("t") }.phases(), PhaseSet::ALL);
        assert_eq!(Noop.phases(), PhaseSet::EMPTY);
        assert_eq!(Group::new("root").name(), "root");
        assert_eq!(Group::new("root").phases(), PhaseSet::ALL);
    }
}

// ── ActivityFlags ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod activity_tests {
    use super::*;

    #[test]
    fn registered_nodes_start_active() {
        let mut flags = ActivityFlags::new();
        let n = NodeId::new(3, 0);
        flags.register(n);
        assert!(flags.is_active(n));
        assert!(flags.set(n, false));
        assert!(!flags.is_active(n));
    }

    #[test]
    fn unknown_and_stale_handles_read_inactive() {
        let mut flags = ActivityFlags::new();
        assert!(!flags.is_active(NodeId::new(7, 0)));
        assert!(!flags.is_active(NodeId::INVALID));

        let old = NodeId::new(0, 0);
        let new = NodeId::new(0, 1);
        flags.register(old);
        flags.register(new);
        assert!(!flags.is_active(old));
        assert!(!flags.set(old, true));
        assert!(flags.is_active(new));
    }

    #[test]
    fn forget_clears_flag() {
        let mut flags = ActivityFlags::new();
        let n = NodeId::new(1, 2);
        flags.register(n);
        flags.forget(n);
        assert!(!flags.is_active(n));
        assert!(!flags.set(n, true));
    }
}

// ── EventBus ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod event_tests {
    use crate::BehaviorError;
    use bn_core::EventId;

    use super::*;

    #[test]
    fn subscribers_run_in_order() {
        let mut cells = CellTable::new();
        let trail = cells.alloc::<u32>("trail");
        let mut events = EventBus::new();
        let fire = events.create();
        events.subscribe(fire, move |e| e.cells.update(trail, |t| *t = *t * 10 + 1)).unwrap();
        events.subscribe(fire, move |e| e.cells.update(trail, |t| *t = *t * 10 + 2)).unwrap();
        assert_eq!(events.subscriber_count(fire), 2);

        let mut activity = ActivityFlags::new();
        let mut host = NullHost;
        let mut env = Env::new(Tick(5), 0.0, &mut cells, &mut events, &mut host);
        let mut ctx = env.context(Phase::Tick, NodeId::new(0, 0), &mut activity);
        ctx.invoke(fire);
        ctx.invoke(fire);
        assert_eq!(ctx.events.invocations(fire), 2);
        assert_eq!(ctx.events.subscriber_count(fire), 2);
        assert_eq!(cells.read(trail), 1212);
    }

    #[test]
    fn subscribing_to_unknown_event_fails() {
        let mut events = EventBus::new();
        let err = events.subscribe(EventId(4), |_| {}).unwrap_err();
        assert!(matches!(err, BehaviorError::UnknownEvent(EventId(4))));
    }

    #[test]
    fn invoking_unknown_or_empty_event_is_noop() {
        let mut cells = CellTable::new();
        let mut events = EventBus::new();
        let empty = events.create();
        let mut activity = ActivityFlags::new();
        let mut host = NullHost;
        let mut env = Env::new(Tick(0), 0.0, &mut cells, &mut events, &mut host);
        let mut ctx = env.context(Phase::Tick, NodeId::new(0, 0), &mut activity);
        ctx.invoke(EventId(99));
        ctx.invoke(empty);
        assert_eq!(ctx.events.invocations(empty), 1);
        assert_eq!(ctx.events.invocations(EventId(99)), 0);
    }
}

// ── TickContext ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod context_tests {
    use super::*;

    #[test]
    fn fields_accessible() {
        let mut cells = CellTable::new();
        let mut events = EventBus::new();
        let mut activity = ActivityFlags::new();
        let mut host = NullHost;
        let mut env = Env::new(Tick(9), 0.25, &mut cells, &mut events, &mut host);
        let ctx = env.context(Phase::FixedTick, NodeId::new(2, 1), &mut activity);
        assert_eq!(ctx.frame, Tick(9));
        assert_eq!(ctx.phase, Phase::FixedTick);
        assert_eq!(ctx.node, NodeId::new(2, 1));
        approx::assert_relative_eq!(ctx.dt, 0.25);
    }

    #[test]
    fn hooks_can_toggle_other_nodes() {
        let mut cells = CellTable::new();
        let mut events = EventBus::new();
        let mut activity = ActivityFlags::new();
        let sibling = NodeId::new(1, 0);
        activity.register(sibling);
        let mut host = NullHost;
        let mut env = Env::new(Tick(0), 0.0, &mut cells, &mut events, &mut host);
        let mut ctx = env.context(Phase::Tick, NodeId::new(0, 0), &mut activity);
        assert!(ctx.is_active(sibling));
        assert!(ctx.set_active(sibling, false));
        assert!(!ctx.is_active(sibling));
        drop(ctx);
        assert!(!activity.is_active(sibling));
    }
}
