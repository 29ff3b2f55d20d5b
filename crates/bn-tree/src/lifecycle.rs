//! Composite lifecycle states.
//!
//! ```text
//! Dormant ──activate──▶ Active ──deactivate──▶ Ended
//!                         ▲                      │
//!                         └──────activate────────┘
//! ```
//!
//! Only `Active` nodes forward tick and fixed-tick calls to their queues.

use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Lifecycle {
    /// Constructed, never activated.
    #[default]
    Dormant,
    /// Queues built, start hooks run, forwarding ticks.
    Active,
    /// End hooks run.  May be activated again.
    Ended,
}

impl Lifecycle {
    #[inline]
    pub fn is_active(self) -> bool {
        self == Lifecycle::Active
    }

    /// `true` if `activate` would change this state.
    #[inline]
    pub fn can_activate(self) -> bool {
        !self.is_active()
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Lifecycle::Dormant => "dormant",
            Lifecycle::Active => "active",
            Lifecycle::Ended => "ended",
        })
    }
}
