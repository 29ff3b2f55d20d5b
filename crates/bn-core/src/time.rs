//! Frame time model.
//!
//! # Design
//!
//! Two clocks drive a scene:
//!
//! - the **variable tick**, one per rendered frame, counted by [`Tick`];
//! - the **fixed tick**, a constant-interval step coupled to physics.
//!
//! [`FixedStepClock`] converts elapsed frame time into a whole number of fixed
//! steps using an accumulator:
//!
//! ```text
//! accumulator += frame_secs
//! while accumulator >= fixed_step_secs && steps < max_steps_per_frame:
//!     accumulator -= fixed_step_secs; steps += 1
//! ```
//!
//! All fixed steps for a frame run before that frame's variable tick.  The
//! accumulator is `f64` so long runs do not drift.

use std::fmt;

/// Slack when comparing the accumulator to one fixed step, so a frame delta
/// that equals the fixed step always yields exactly one step.
const STEP_EPSILON: f64 = 1e-9;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` frames after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Frames elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// ── FixedStepClock ────────────────────────────────────────────────────────────

/// Accumulates variable frame time and hands out fixed steps.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedStepClock {
    /// Length of one fixed step in seconds.
    pub fixed_step_secs: f32,
    /// Upper bound on fixed steps per frame.  Backlog beyond it is dropped.
    pub max_steps_per_frame: u32,
    /// The current frame, advanced by [`FixedStepClock::next_frame`].
    pub frame: Tick,
    /// Fixed steps handed out since construction.
    pub total_fixed_steps: u64,
    /// Variable time fed in since construction.
    pub elapsed_secs: f64,
    /// Seconds of backlog discarded by the most recent `advance` call.
    pub last_dropped_secs: f64,
    accumulator: f64,
}

impl FixedStepClock {
    pub fn new(fixed_step_secs: f32, max_steps_per_frame: u32) -> Self {
        Self {
            fixed_step_secs,
            max_steps_per_frame,
            frame: Tick::ZERO,
            total_fixed_steps: 0,
            elapsed_secs: 0.0,
            last_dropped_secs: 0.0,
            accumulator: 0.0,
        }
    }

    /// Feed `frame_secs` of elapsed time; return how many fixed steps to run
    /// before this frame's variable tick.
    pub fn advance(&mut self, frame_secs: f32) -> u32 {
        let frame_secs = f64::from(frame_secs.max(0.0));
        let step = f64::from(self.fixed_step_secs);
        self.elapsed_secs += frame_secs;
        self.accumulator += frame_secs;
        self.last_dropped_secs = 0.0;

        if step <= 0.0 {
            return 0;
        }

        let mut steps = 0;
        while self.accumulator + STEP_EPSILON >= step && steps < self.max_steps_per_frame {
            self.accumulator -= step;
            steps += 1;
        }
        self.accumulator = self.accumulator.max(0.0);

        if self.accumulator + STEP_EPSILON >= step {
            let keep = self.accumulator % step;
            self.last_dropped_secs = self.accumulator - keep;
            self.accumulator = keep;
        }

        self.total_fixed_steps += u64::from(steps);
        steps
    }

    /// Move on to the next frame.
    #[inline]
    pub fn next_frame(&mut self) {
        self.frame = Tick(self.frame.0 + 1);
    }

    /// Unconsumed time carried into the next frame, in seconds.
    #[inline]
    pub fn pending_secs(&self) -> f64 {
        self.accumulator
    }

    /// Fraction of a fixed step currently pending, in `[0, 1)`.  Renderers use
    /// it to interpolate between the last two physics states.
    pub fn alpha(&self) -> f32 {
        if self.fixed_step_secs <= 0.0 {
            return 0.0;
        }
        (self.accumulator / f64::from(self.fixed_step_secs)) as f32
    }
}

impl fmt::Display for FixedStepClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} fixed steps, {:.3} s)",
            self.frame, self.total_fixed_steps, self.elapsed_secs
        )
    }
}
