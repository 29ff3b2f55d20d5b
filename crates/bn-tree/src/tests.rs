//! Unit tests for bn-tree.

use bn_behavior::{Behavior, Env, EventBus, NullHost, PhaseSet, TickContext};
use bn_cell::{CellId, CellTable};
use bn_core::{NodeId, Tick};

use crate::{Lifecycle, Scene};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Appends `"<label>.<phase>"` to a shared log cell on every hook call.
struct Recorder {
    label:  &'static str,
    phases: PhaseSet,
    log:    CellId<Vec<String>>,
}

impl Recorder {
    fn note(&self, ctx: &mut TickContext<'_>) {
        let entry = format!("{}.{}", self.label, ctx.phase);
        ctx.cells.update(self.log, |log| log.push(entry));
    }
}

impl Behavior for Recorder {
    fn phases(&self) -> PhaseSet {
        self.phases
    }
    fn on_start(&mut self, ctx: &mut TickContext<'_>) {
        self.note(ctx);
    }
    fn on_tick(&mut self, ctx: &mut TickContext<'_>) {
        self.note(ctx);
    }
    fn on_fixed_tick(&mut self, ctx: &mut TickContext<'_>) {
        self.note(ctx);
    }
    fn on_end(&mut self, ctx: &mut TickContext<'_>) {
        self.note(ctx);
    }
}

/// On tick, sets the activity flag of the node stored in `target`.
struct Toggler {
    target: CellId<NodeId>,
    to:     bool,
    log:    CellId<Vec<String>>,
}

impl Behavior for Toggler {
    fn phases(&self) -> PhaseSet {
        PhaseSet::TICK
    }
    fn on_tick(&mut self, ctx: &mut TickContext<'_>) {
        let target = ctx.cells.read(self.target);
        ctx.set_active(target, self.to);
        ctx.cells.update(self.log, |log| log.push("toggle.tick".to_owned()));
    }
}

/// Writes `value` into `out` every tick.
struct Writer {
    out:   CellId<u32>,
    value: u32,
}

impl Behavior for Writer {
    fn phases(&self) -> PhaseSet {
        PhaseSet::TICK
    }
    fn on_tick(&mut self, ctx: &mut TickContext<'_>) {
        ctx.cells.write(self.out, self.value);
    }
}

struct Harness {
    scene:  Scene,
    cells:  CellTable,
    events: EventBus,
    host:   NullHost,
    log:    CellId<Vec<String>>,
}

impl Harness {
    fn new() -> Self {
        let mut cells = CellTable::new();
        let log = cells.alloc("log");
        Self { scene: Scene::new(), cells, events: EventBus::new(), host: NullHost, log }
    }

    fn recorder(&mut self, parent: NodeId, label: &'static str) -> NodeId {
        self.recorder_in(parent, label, PhaseSet::ALL)
    }

    fn recorder_in(&mut self, parent: NodeId, label: &'static str, phases: PhaseSet) -> NodeId {
        let recorder = Recorder { label, phases, log: self.log };
        self.scene.add(parent, recorder).unwrap()
    }

    fn start(&mut self) {
        let mut env = Env::new(Tick(0), 0.0, &mut self.cells, &mut self.events, &mut self.host);
        self.scene.start(&mut env);
    }

    fn tick(&mut self) {
        let mut env = Env::new(Tick(0), 1.0 / 60.0, &mut self.cells, &mut self.events, &mut self.host);
        self.scene.tick(&mut env);
    }

    fn fixed_tick(&mut self) {
        let mut env = Env::new(Tick(0), 0.02, &mut self.cells, &mut self.events, &mut self.host);
        self.scene.fixed_tick(&mut env);
    }

    fn end(&mut self) {
        let mut env = Env::new(Tick(0), 0.0, &mut self.cells, &mut self.events, &mut self.host);
        self.scene.end(&mut env);
    }

    /// Drain the call log.
    fn take_log(&mut self) -> Vec<String> {
        let log = self.cells.read(self.log);
        self.cells.clear(self.log);
        log
    }
}

// ── Queue construction ────────────────────────────────────────────────────────

#[cfg(test)]
mod queue_tests {
    use bn_behavior::Phase;

    use super::*;

    #[test]
    fn queues_hold_children_joining_each_phase_in_attachment_order() {
        let mut h = Harness::new();
        let root = h.scene.root();
        let a = h.recorder(root, "a");
        let b = h.recorder_in(root, "b", PhaseSet::TICK);
        let c = h.recorder_in(root, "c", PhaseSet::FIXED_TICK | PhaseSet::END);
        h.scene.rebuild_queues(root).unwrap();

        assert_eq!(h.scene.queue(root, Phase::Start), &[a]);
        assert_eq!(h.scene.queue(root, Phase::Tick), &[a, b]);
        assert_eq!(h.scene.queue(root, Phase::FixedTick), &[a, c]);
        assert_eq!(h.scene.queue(root, Phase::End), &[a, c]);
    }

    #[test]
    fn attach_and_detach_only_show_after_rebuild() {
        let mut h = Harness::new();
        let root = h.scene.root();
        let a = h.recorder(root, "a");
        let b = h.recorder(root, "b");
        let c = h.recorder(root, "c");
        h.scene.rebuild_queues(root).unwrap();

        h.scene.detach(b).unwrap();
        let d = h.scene.add_detached(Recorder { label: "d", phases: PhaseSet::ALL, log: h.log });
        h.scene.attach(root, d).unwrap();
        assert_eq!(h.scene.children(root), &[a, c, d]);
        assert_eq!(h.scene.queue(root, Phase::Tick), &[a, b, c]);

        h.scene.rebuild_queues(root).unwrap();
        assert_eq!(h.scene.queue(root, Phase::Tick), &[a, c, d]);
        assert!(h.scene.is_alive(b));
        assert_eq!(h.scene.parent(b), None);
    }

    #[test]
    fn set_phases_applies_on_parent_rebuild() {
        let mut h = Harness::new();
        let root = h.scene.root();
        let a = h.recorder(root, "a");
        h.scene.rebuild_queues(root).unwrap();
        h.scene.set_phases(a, PhaseSet::END).unwrap();
        assert_eq!(h.scene.queue(root, Phase::Tick), &[a]);
        h.scene.rebuild_queues(root).unwrap();
        assert!(h.scene.queue(root, Phase::Tick).is_empty());
        assert_eq!(h.scene.queue(root, Phase::End), &[a]);
    }

    #[test]
    fn rebuild_drops_destroyed_children() {
        let mut h = Harness::new();
        let root = h.scene.root();
        let a = h.recorder(root, "a");
        let b = h.recorder(root, "b");
        h.scene.rebuild_queues(root).unwrap();
        h.scene.destroy(a).unwrap();
        assert_eq!(h.scene.queue(root, Phase::Tick), &[a, b]);
        h.scene.rebuild_queues(root).unwrap();
        assert_eq!(h.scene.queue(root, Phase::Tick), &[b]);
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatch_tests {
    use super::*;

    #[test]
    fn nothing_runs_before_start() {
        let mut h = Harness::new();
        let root = h.scene.root();
        h.recorder(root, "a");
        h.tick();
        h.fixed_tick();
        assert!(h.take_log().is_empty());
    }

    #[test]
    fn start_and_tick_walk_pre_order() {
        let mut h = Harness::new();
        let root = h.scene.root();
        h.recorder(root, "a");
        let g = h.recorder(root, "g");
        h.recorder(g, "g1");
        h.recorder(g, "g2");
        h.recorder(root, "b");

        h.start();
        assert_eq!(h.take_log(), ["a.start", "g.start", "g1.start", "g2.start", "b.start"]);

        h.tick();
        assert_eq!(h.take_log(), ["a.tick", "g.tick", "g1.tick", "g2.tick", "b.tick"]);

        h.fixed_tick();
        assert_eq!(
            h.take_log(),
            ["a.fixed_tick", "g.fixed_tick", "g1.fixed_tick", "g2.fixed_tick", "b.fixed_tick"]
        );
    }

    #[test]
    fn order_is_stable_across_ticks() {
        let mut h = Harness::new();
        let root = h.scene.root();
        h.recorder(root, "x");
        h.recorder(root, "y");
        h.start();
        h.take_log();
        for _ in 0..3 {
            h.tick();
            assert_eq!(h.take_log(), ["x.tick", "y.tick"]);
        }
    }

    #[test]
    fn phase_membership_filters_calls() {
        let mut h = Harness::new();
        let root = h.scene.root();
        h.recorder_in(root, "t", PhaseSet::TICK);
        h.recorder_in(root, "f", PhaseSet::FIXED_TICK);
        h.start();
        assert!(h.take_log().is_empty());
        h.tick();
        assert_eq!(h.take_log(), ["t.tick"]);
        h.fixed_tick();
        assert_eq!(h.take_log(), ["f.fixed_tick"]);
    }

    #[test]
    fn child_added_after_activation_waits_for_rebuild() {
        let mut h = Harness::new();
        let root = h.scene.root();
        h.recorder(root, "a");
        h.start();
        h.take_log();

        h.recorder(root, "late");
        h.tick();
        assert_eq!(h.take_log(), ["a.tick"]);

        h.scene.rebuild_queues(root).unwrap();
        h.tick();
        assert_eq!(h.take_log(), ["a.tick", "late.tick"]);
    }

    #[test]
    fn inactive_child_is_skipped_and_writes_nothing() {
        let mut h = Harness::new();
        let root = h.scene.root();
        let out = h.cells.alloc::<u32>("out");
        let w = h.scene.add(root, Writer { out, value: 7 }).unwrap();
        h.scene.set_active(w, false);
        h.start();

        h.tick();
        assert_eq!(h.cells.read(out), 0);
        assert_eq!(h.cells.writes(out), 0);

        h.scene.set_active(w, true);
        h.tick();
        assert_eq!(h.cells.read(out), 7);
    }

    #[test]
    fn inactive_composite_skips_its_subtree() {
        let mut h = Harness::new();
        let root = h.scene.root();
        let g = h.recorder(root, "g");
        h.recorder(g, "g1");
        h.recorder(root, "b");
        h.start();
        h.take_log();

        h.scene.set_active(g, false);
        h.tick();
        assert_eq!(h.take_log(), ["b.tick"]);
    }

    #[test]
    fn disabling_a_later_sibling_skips_it_this_tick() {
        let mut h = Harness::new();
        let root = h.scene.root();
        let target = h.cells.alloc::<NodeId>("target");
        h.recorder(root, "p1");
        h.scene.add(root, Toggler { target, to: false, log: h.log }).unwrap();
        let p3 = h.recorder(root, "p3");
        h.cells.write(target, p3);
        h.start();
        h.take_log();

        h.tick();
        assert_eq!(h.take_log(), ["p1.tick", "toggle.tick"]);
        assert!(!h.scene.is_active(p3));
    }

    #[test]
    fn enabling_an_earlier_sibling_waits_for_next_tick() {
        let mut h = Harness::new();
        let root = h.scene.root();
        let target = h.cells.alloc::<NodeId>("target");
        let e = h.recorder(root, "e");
        h.scene.add(root, Toggler { target, to: true, log: h.log }).unwrap();
        h.cells.write(target, e);
        h.scene.set_active(e, false);
        h.start();
        h.take_log();

        h.tick();
        assert_eq!(h.take_log(), ["toggle.tick"]);
        h.tick();
        assert_eq!(h.take_log(), ["e.tick", "toggle.tick"]);
    }

    #[test]
    fn destroyed_child_in_queue_is_skipped_silently() {
        let mut h = Harness::new();
        let root = h.scene.root();
        h.recorder(root, "a");
        let b = h.recorder(root, "b");
        h.recorder(root, "c");
        h.start();
        h.take_log();

        h.scene.destroy(b).unwrap();
        // The freed slot is reused; the stale queue entry must not alias it.
        let x = h.recorder(root, "x");
        assert_eq!(x.slot, b.slot);
        assert_ne!(x, b);

        h.tick();
        assert_eq!(h.take_log(), ["a.tick", "c.tick"]);
    }

    #[test]
    fn root_flag_gates_the_whole_walk() {
        let mut h = Harness::new();
        let root = h.scene.root();
        h.recorder(root, "a");
        h.start();
        h.take_log();
        h.scene.set_active(root, false);
        h.tick();
        assert!(h.take_log().is_empty());
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn end_runs_every_end_hook_once_even_when_inactive() {
        let mut h = Harness::new();
        let root = h.scene.root();
        h.recorder(root, "a");
        let b = h.recorder(root, "b");
        h.recorder(root, "c");
        h.start();
        h.take_log();

        h.scene.set_active(b, false);
        h.end();
        assert_eq!(h.take_log(), ["a.end", "b.end", "c.end"]);

        h.end();
        assert!(h.take_log().is_empty());
    }

    #[test]
    fn nested_end_is_pre_order() {
        let mut h = Harness::new();
        let root = h.scene.root();
        let g = h.recorder(root, "g");
        h.recorder(g, "g1");
        h.recorder(root, "b");
        h.start();
        h.take_log();
        h.end();
        assert_eq!(h.take_log(), ["g.end", "g1.end", "b.end"]);
        assert_eq!(h.scene.lifecycle(g), Some(Lifecycle::Ended));
    }

    #[test]
    fn states_progress_and_reactivate() {
        let mut h = Harness::new();
        let root = h.scene.root();
        let a = h.recorder(root, "a");
        assert_eq!(h.scene.lifecycle(root), Some(Lifecycle::Dormant));

        h.start();
        assert_eq!(h.scene.lifecycle(root), Some(Lifecycle::Active));
        assert_eq!(h.scene.lifecycle(a), Some(Lifecycle::Active));

        h.end();
        assert_eq!(h.scene.lifecycle(root), Some(Lifecycle::Ended));
        h.take_log();
        h.tick();
        assert!(h.take_log().is_empty());

        h.start();
        assert_eq!(h.take_log(), ["a.start"]);
        assert_eq!(h.scene.lifecycle(root), Some(Lifecycle::Active));
    }

    #[test]
    fn start_twice_is_noop() {
        let mut h = Harness::new();
        let root = h.scene.root();
        h.recorder(root, "a");
        h.start();
        h.start();
        assert_eq!(h.take_log(), ["a.start"]);
    }

    #[test]
    fn composite_outside_start_queue_still_activates() {
        let mut h = Harness::new();
        let root = h.scene.root();
        let g = h.recorder_in(root, "g", PhaseSet::TICK);
        h.recorder(g, "g1");
        h.start();
        assert_eq!(h.take_log(), ["g1.start"]);
        assert_eq!(h.scene.lifecycle(g), Some(Lifecycle::Active));
        h.tick();
        assert_eq!(h.take_log(), ["g.tick", "g1.tick"]);
    }

    #[test]
    fn child_attached_while_live_starts_before_its_first_tick() {
        let mut h = Harness::new();
        let root = h.scene.root();
        h.recorder(root, "a");
        h.start();
        h.take_log();

        let late = h.scene.add_detached(Recorder { label: "late", phases: PhaseSet::ALL, log: h.log });
        h.scene.add(late, Recorder { label: "late1", phases: PhaseSet::ALL, log: h.log }).unwrap();
        h.scene.attach(root, late).unwrap();
        h.scene.rebuild_queues(root).unwrap();
        assert_eq!(h.scene.lifecycle(late), Some(Lifecycle::Dormant));

        h.tick();
        assert_eq!(h.take_log(), ["a.tick", "late.start", "late1.start", "late.tick", "late1.tick"]);
        assert_eq!(h.scene.lifecycle(late), Some(Lifecycle::Active));

        h.tick();
        assert_eq!(h.take_log(), ["a.tick", "late.tick", "late1.tick"]);

        h.end();
        assert_eq!(h.take_log(), ["a.end", "late.end", "late1.end"]);
    }

    #[test]
    fn never_started_child_gets_no_end_hook() {
        let mut h = Harness::new();
        let root = h.scene.root();
        h.recorder(root, "a");
        h.start();
        h.take_log();

        let late = h.scene.add_detached(Recorder { label: "late", phases: PhaseSet::END, log: h.log });
        h.scene.attach(root, late).unwrap();
        h.scene.rebuild_queues(root).unwrap();

        h.end();
        assert_eq!(h.take_log(), ["a.end"]);
        assert_eq!(h.scene.lifecycle(late), Some(Lifecycle::Dormant));
    }
}

// ── Structure errors ──────────────────────────────────────────────────────────

#[cfg(test)]
mod structure_tests {
    use crate::TreeError;

    use super::*;

    #[test]
    fn add_under_dead_parent_fails() {
        let mut h = Harness::new();
        let root = h.scene.root();
        let a = h.recorder(root, "a");
        h.scene.destroy(a).unwrap();
        let err = h.scene.add(a, Recorder { label: "x", phases: PhaseSet::ALL, log: h.log });
        assert_eq!(err.unwrap_err(), TreeError::NodeNotFound(a));
    }

    #[test]
    fn attach_rejects_attached_child_and_cycles() {
        let mut h = Harness::new();
        let root = h.scene.root();
        let g = h.recorder(root, "g");
        let g1 = h.recorder(g, "g1");
        assert_eq!(h.scene.attach(root, g1), Err(TreeError::AlreadyAttached(g1)));
        assert_eq!(h.scene.attach(g1, root), Err(TreeError::AlreadyAttached(root)));

        h.scene.detach(g).unwrap();
        assert_eq!(h.scene.attach(g1, g), Err(TreeError::Cycle { parent: g1, child: g }));
        assert_eq!(h.scene.attach(g, g), Err(TreeError::Cycle { parent: g, child: g }));
        assert_eq!(h.scene.attach(root, g), Ok(()));
    }

    #[test]
    fn root_cannot_be_detached_or_destroyed() {
        let mut h = Harness::new();
        let root = h.scene.root();
        assert_eq!(h.scene.detach(root), Err(TreeError::RootNode));
        assert_eq!(h.scene.destroy(root), Err(TreeError::RootNode));
    }

    #[test]
    fn destroy_frees_whole_subtree() {
        let mut h = Harness::new();
        let root = h.scene.root();
        let g = h.recorder(root, "g");
        let g1 = h.recorder(g, "g1");
        let g2 = h.recorder(g1, "g2");
        assert_eq!(h.scene.len(), 4);
        assert_eq!(h.scene.descendants(g), vec![g, g1, g2]);

        assert_eq!(h.scene.destroy(g), Ok(3));
        assert_eq!(h.scene.len(), 1);
        assert!(!h.scene.is_alive(g2));
        assert!(!h.scene.set_active(g1, true));
        assert!(h.scene.children(root).is_empty());
        assert_eq!(h.scene.destroy(g), Err(TreeError::NodeNotFound(g)));
    }

    #[test]
    fn names_come_from_behaviors() {
        let h = Harness::new();
        assert_eq!(h.scene.name(h.scene.root()), Some("root"));
        assert_eq!(h.scene.name(NodeId::INVALID), None);
    }
}
