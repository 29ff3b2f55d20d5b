//! Top-level run configuration.

use crate::{CoreError, CoreResult, FixedStepClock, Tick};

/// Top-level scheduler configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the runner builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    /// Seconds per fixed (physics) step.  Default: 1/50.
    pub fixed_step_secs: f32,

    /// Seconds per variable frame when the runner drives itself headless.
    /// Default: 1/60.
    pub frame_secs: f32,

    /// Total frames to run.
    pub total_frames: u64,

    /// Upper bound on fixed steps run in one frame.  Protects against the
    /// "spiral of death" after a long stall.
    pub max_fixed_steps_per_frame: u32,

    /// Emit a snapshot every N frames.  0 disables snapshots.
    pub snapshot_interval_frames: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            fixed_step_secs:           1.0 / 50.0,
            frame_secs:                1.0 / 60.0,
            total_frames:              600,
            max_fixed_steps_per_frame: 8,
            snapshot_interval_frames:  0,
        }
    }
}

impl RunConfig {
    /// The frame at which the run ends (exclusive upper bound).
    #[inline]
    pub fn end_frame(&self) -> Tick {
        Tick(self.total_frames)
    }

    /// Construct a `FixedStepClock` pre-configured for this run.
    pub fn make_clock(&self) -> FixedStepClock {
        FixedStepClock::new(self.fixed_step_secs, self.max_fixed_steps_per_frame)
    }

    /// Reject values the scheduler cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.fixed_step_secs.is_finite() && self.fixed_step_secs > 0.0) {
            return Err(CoreError::Config(format!(
                "fixed_step_secs must be positive, got {}",
                self.fixed_step_secs
            )));
        }
        if !(self.frame_secs.is_finite() && self.frame_secs >= 0.0) {
            return Err(CoreError::Config(format!(
                "frame_secs must be non-negative, got {}",
                self.frame_secs
            )));
        }
        if self.max_fixed_steps_per_frame == 0 {
            return Err(CoreError::Config(
                "max_fixed_steps_per_frame must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
