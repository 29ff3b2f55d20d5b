//! The `Runner` struct and its frame loop.

use bn_behavior::{Env, EventBus};
use bn_cell::CellTable;
use bn_core::{FixedStepClock, NodeId, RunConfig, Tick};
use bn_tree::{Lifecycle, Scene};
use bn_world::World;

use crate::{RunObserver, SimResult};

/// The single top-level scheduler.
///
/// `Runner` owns everything a scene needs and drives it frame by frame:
///
/// 1. **Fixed steps**: the clock converts the frame delta into N fixed steps.
///    Each one dispatches `FixedTick` through the tree and then integrates
///    world velocities.
/// 2. **Variable tick**: one `Tick` dispatch with the frame delta.
/// 3. **Input**: press edges are cleared so they last exactly one frame.
///
/// The root is activated (Start phase) on the first frame and deactivated
/// (End phase) by [`end`][Self::end] or at the end of [`run`][Self::run].
///
/// Create via [`RunnerBuilder`][crate::RunnerBuilder].
pub struct Runner {
    /// Run configuration (fixed step, frame length, total frames, …).
    pub config: RunConfig,

    /// Frame counter and fixed-step accumulator.
    pub clock: FixedStepClock,

    /// Behavior tree.
    pub scene: Scene,

    /// The cell bus shared by every behavior in `scene`.
    pub cells: CellTable,

    /// Event slots and their subscribers.
    pub events: EventBus,

    /// Host: entities, spatial queries, input and spawning.
    pub world: World,
}

impl Runner {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current frame to `config.end_frame()`, then end the
    /// scene.
    ///
    /// Calls observer hooks at every frame boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: RunObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        log::info!(
            "running {} → {} ({} s fixed step)",
            self.clock.frame,
            self.config.end_frame(),
            self.config.fixed_step_secs
        );
        while self.clock.frame < self.config.end_frame() {
            self.observed_frame(observer);
        }
        self.end();
        observer.on_run_end(self.clock.frame);
        Ok(())
    }

    /// Run exactly `n` frames from the current position (ignores
    /// `end_frame`).  The scene is left active.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_frames<O: RunObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.observed_frame(observer);
        }
        Ok(())
    }

    /// Advance one frame of `frame_secs` and return how many fixed steps ran.
    ///
    /// Starts the scene first if it is not running.
    pub fn step_frame(&mut self, frame_secs: f32) -> u32 {
        self.start();
        let frame = self.clock.frame;

        let steps = self.clock.advance(frame_secs);
        if self.clock.last_dropped_secs > 0.0 {
            log::debug!(
                "{frame}: fixed-step backlog clamped, dropped {:.4} s",
                self.clock.last_dropped_secs
            );
        }

        let step = self.clock.fixed_step_secs;
        for _ in 0..steps {
            let mut env = Env::new(frame, step, &mut self.cells, &mut self.events, &mut self.world);
            self.scene.fixed_tick(&mut env);
            self.world.integrate(step);
        }

        let mut env = Env::new(frame, frame_secs, &mut self.cells, &mut self.events, &mut self.world);
        self.scene.tick(&mut env);

        self.world.input.end_frame();
        self.clock.next_frame();
        log::trace!("{frame}: {steps} fixed step(s)");
        steps
    }

    /// Run the Start phase if the root is not active yet.
    ///
    /// Idempotent while the root is active.  After [`end`][Self::end] this
    /// starts the scene again.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        log::info!("{}: starting scene ({} nodes)", self.clock.frame, self.scene.len());
        let frame = self.clock.frame;
        let mut env = Env::new(frame, 0.0, &mut self.cells, &mut self.events, &mut self.world);
        self.scene.start(&mut env);
    }

    /// Run the End phase if the root is active.
    pub fn end(&mut self) {
        if !self.is_running() {
            return;
        }
        log::info!("{}: ending scene", self.clock.frame);
        let frame = self.clock.frame;
        let mut env = Env::new(frame, 0.0, &mut self.cells, &mut self.events, &mut self.world);
        self.scene.end(&mut env);
    }

    /// `true` between `start` and `end`.
    pub fn is_running(&self) -> bool {
        self.scene.lifecycle(self.scene.root()).is_some_and(Lifecycle::is_active)
    }

    /// The frame that will run next.
    #[inline]
    pub fn frame(&self) -> Tick {
        self.clock.frame
    }

    /// Toggle a node's activity flag from outside the tree.
    #[inline]
    pub fn set_active(&mut self, node: NodeId, active: bool) -> bool {
        self.scene.set_active(node, active)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn observed_frame<O: RunObserver>(&mut self, observer: &mut O) {
        let now = self.clock.frame;
        observer.on_frame_start(now);
        let steps = self.step_frame(self.config.frame_secs);
        observer.on_frame_end(now, steps);
        let interval = self.config.snapshot_interval_frames;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.world, &self.cells);
        }
    }
}
