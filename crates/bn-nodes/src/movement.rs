//! Velocity-based movement and the acceleration model that feeds it.
//!
//! # Acceleration model
//!
//! [`SpeedUpByAccel`] turns a desired direction `d` and the current velocity
//! `v` into a velocity *delta* per axis:
//!
//! ```text
//! |d| < 0.01 and |v| > 0.01  → brake:      -sign(v) * min(speed * deceleration, |v|)
//! |d| > 0.1                  → accelerate:  speed * acceleration * d,
//!                                           clamped so v + delta ≤ max_speed * d
//! otherwise                  → 0
//! ```
//!
//! The delta is published to cells; a [`MoveByAddVelocity`] sibling later in
//! the queue adds it to the body's velocity.

use bn_behavior::{Behavior, PhaseSet, TickContext};
use bn_cell::CellId;
use bn_core::{EntityId, Plane, Vec2, Vec3};

const STOP_EPSILON: f32 = 0.01;
const MOVE_EPSILON: f32 = 0.1;

// ── MoveByVelocity ────────────────────────────────────────────────────────────

/// Every frame: `velocity(body) = dir * speed`.
pub struct MoveByVelocity {
    pub body:  EntityId,
    pub speed: f32,
    pub dir:   CellId<Vec3>,
}

impl Behavior for MoveByVelocity {
    fn name(&self) -> &str {
        "move_by_velocity"
    }

    fn phases(&self) -> PhaseSet {
        PhaseSet::TICK
    }

    fn on_tick(&mut self, ctx: &mut TickContext<'_>) {
        let velocity = ctx.cells.read(self.dir) * self.speed;
        ctx.host.set_velocity(self.body, velocity);
    }
}

// ── MoveByAddVelocity ─────────────────────────────────────────────────────────

/// Every frame: `velocity(body) += speed`, or `+= dir * speed` component-wise
/// when `use_dir` is set.
pub struct MoveByAddVelocity {
    pub body:    EntityId,
    pub speed:   CellId<Vec3>,
    pub dir:     CellId<Vec3>,
    pub use_dir: bool,
}

impl Behavior for MoveByAddVelocity {
    fn name(&self) -> &str {
        "move_by_add_velocity"
    }

    fn phases(&self) -> PhaseSet {
        PhaseSet::TICK
    }

    fn on_tick(&mut self, ctx: &mut TickContext<'_>) {
        let Some(current) = ctx.host.velocity(self.body) else {
            return;
        };
        let speed = ctx.cells.read(self.speed);
        let delta = if self.use_dir { ctx.cells.read(self.dir) * speed } else { speed };
        ctx.host.set_velocity(self.body, current + delta);
    }
}

// ── MoveByForce ───────────────────────────────────────────────────────────────

/// How [`MoveByForce`] applies its push.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum ForceMode {
    /// Continuous: scaled by the fixed step.
    #[default]
    Acceleration,
    /// Instantaneous: applied in full each fixed step.
    VelocityChange,
}

/// Every fixed step: push `body` along `dir * speed`.
pub struct MoveByForce {
    pub body:  EntityId,
    pub speed: f32,
    pub dir:   CellId<Vec3>,
    pub mode:  ForceMode,
}

impl Behavior for MoveByForce {
    fn name(&self) -> &str {
        "move_by_force"
    }

    fn phases(&self) -> PhaseSet {
        PhaseSet::FIXED_TICK
    }

    fn on_fixed_tick(&mut self, ctx: &mut TickContext<'_>) {
        let Some(current) = ctx.host.velocity(self.body) else {
            return;
        };
        let push = ctx.cells.read(self.dir) * self.speed;
        let delta = match self.mode {
            ForceMode::Acceleration => push * ctx.dt,
            ForceMode::VelocityChange => push,
        };
        ctx.host.set_velocity(self.body, current + delta);
    }
}

// ── SpeedUpByAccel ────────────────────────────────────────────────────────────

/// One set of parallel lists sharing a plane.
///
/// `dirs[i]` and `bodies[i]` produce `outputs[i]`.  When the lists differ in
/// length (or `bodies` is empty) the lane is skipped for that tick.
#[derive(Clone, Debug)]
pub struct AccelLane {
    pub plane:   Plane,
    pub dirs:    Vec<CellId<Vec3>>,
    pub bodies:  Vec<EntityId>,
    pub outputs: Vec<CellId<Vec3>>,
}

impl AccelLane {
    pub fn new(plane: Plane) -> Self {
        Self { plane, dirs: Vec::new(), bodies: Vec::new(), outputs: Vec::new() }
    }

    pub fn with(mut self, dir: CellId<Vec3>, body: EntityId, output: CellId<Vec3>) -> Self {
        self.dirs.push(dir);
        self.bodies.push(body);
        self.outputs.push(output);
        self
    }

    fn is_consistent(&self) -> bool {
        !self.bodies.is_empty()
            && self.bodies.len() == self.dirs.len()
            && self.bodies.len() == self.outputs.len()
    }
}

/// Like [`AccelLane`] but with 2-D direction and output cells; velocities are
/// read in the XY plane.
#[derive(Clone, Debug, Default)]
pub struct AccelLane2d {
    pub dirs:    Vec<CellId<Vec2>>,
    pub bodies:  Vec<EntityId>,
    pub outputs: Vec<CellId<Vec2>>,
}

impl AccelLane2d {
    fn is_consistent(&self) -> bool {
        !self.bodies.is_empty()
            && self.bodies.len() == self.dirs.len()
            && self.bodies.len() == self.outputs.len()
    }
}

/// Publishes per-body velocity deltas from desired directions.
pub struct SpeedUpByAccel {
    pub max_speed:    f32,
    pub speed:        f32,
    pub acceleration: f32,
    pub deceleration: f32,
    pub lane_2d:      AccelLane2d,
    pub lanes:        Vec<AccelLane>,
}

impl SpeedUpByAccel {
    pub fn new(max_speed: f32, speed: f32, acceleration: f32, deceleration: f32) -> Self {
        Self {
            max_speed,
            speed,
            acceleration,
            deceleration,
            lane_2d: AccelLane2d::default(),
            lanes: Vec::new(),
        }
    }

    pub fn with_lane(mut self, lane: AccelLane) -> Self {
        self.lanes.push(lane);
        self
    }

    /// Velocity delta for one plane.
    pub fn delta(&self, dir: Vec2, velocity: Vec2) -> Vec2 {
        Vec2::new(self.axis_delta(dir.x, velocity.x), self.axis_delta(dir.y, velocity.y))
    }

    fn axis_delta(&self, d: f32, v: f32) -> f32 {
        if d.abs() > MOVE_EPSILON {
            let wanted = self.speed * self.acceleration * d;
            let headroom = self.max_speed * d - v;
            return if d > 0.0 { wanted.min(headroom) } else { wanted.max(headroom) };
        }
        if d.abs() < STOP_EPSILON && v.abs() > STOP_EPSILON {
            let brake = self.speed * self.deceleration;
            return -v.signum() * brake.min(v.abs());
        }
        0.0
    }
}

impl Behavior for SpeedUpByAccel {
    fn name(&self) -> &str {
        "speed_up_by_accel"
    }

    fn phases(&self) -> PhaseSet {
        PhaseSet::TICK
    }

    fn on_tick(&mut self, ctx: &mut TickContext<'_>) {
        if self.lane_2d.is_consistent() {
            let lane = &self.lane_2d;
            let velocities: Option<Vec<Vec3>> =
                lane.bodies.iter().map(|&b| ctx.host.velocity(b)).collect();
            if let Some(velocities) = velocities {
                for (i, v) in velocities.into_iter().enumerate() {
                    let out = self.delta(ctx.cells.read(lane.dirs[i]), Plane::XY.project(v));
                    ctx.cells.write(lane.outputs[i], out);
                }
            }
        }

        for lane in self.lanes.iter().filter(|l| l.is_consistent()) {
            // Compute the whole lane before writing so a missing body leaves
            // every output untouched.
            let velocities: Option<Vec<Vec3>> =
                lane.bodies.iter().map(|&b| ctx.host.velocity(b)).collect();
            let Some(velocities) = velocities else { continue };
            for (i, v) in velocities.into_iter().enumerate() {
                let dir = lane.plane.project(ctx.cells.read(lane.dirs[i]));
                let out = self.delta(dir, lane.plane.project(v));
                ctx.cells.write(lane.outputs[i], lane.plane.embed(out));
            }
        }
    }
}
