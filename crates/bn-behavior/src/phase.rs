//! Dispatch phases and per-behavior phase membership.

use std::fmt;

/// One of the four dispatch categories.  Each composite keeps one queue per
/// phase.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Phase {
    /// Once, when the governing composite is activated.
    Start,
    /// Once per rendered frame (variable step).
    Tick,
    /// Once per fixed step.
    FixedTick,
    /// Once, when the governing composite is deactivated.
    End,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Start, Phase::Tick, Phase::FixedTick, Phase::End];

    /// Position of this phase's queue inside a composite.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Tick => "tick",
            Phase::FixedTick => "fixed_tick",
            Phase::End => "end",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bit set of the phases a behavior takes part in.
///
/// A behavior may belong to any subset; membership in several phases puts it
/// in several queues independently.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct PhaseSet(u8);

impl PhaseSet {
    pub const EMPTY:      PhaseSet = PhaseSet(0);
    pub const START:      PhaseSet = PhaseSet(1 << 0);
    pub const TICK:       PhaseSet = PhaseSet(1 << 1);
    pub const FIXED_TICK: PhaseSet = PhaseSet(1 << 2);
    pub const END:        PhaseSet = PhaseSet(1 << 3);
    pub const ALL:        PhaseSet = PhaseSet(0b1111);

    #[inline]
    pub const fn of(phase: Phase) -> PhaseSet {
        PhaseSet(1 << phase as u8)
    }

    #[inline]
    pub const fn with(self, other: PhaseSet) -> PhaseSet {
        PhaseSet(self.0 | other.0)
    }

    #[inline]
    pub const fn without(self, other: PhaseSet) -> PhaseSet {
        PhaseSet(self.0 & !other.0)
    }

    #[inline]
    pub fn contains(self, phase: Phase) -> bool {
        self.0 & PhaseSet::of(phase).0 != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Member phases in dispatch-table order.
    pub fn iter(self) -> impl Iterator<Item = Phase> {
        Phase::ALL.into_iter().filter(move |&p| self.contains(p))
    }
}

impl std::ops::BitOr for PhaseSet {
    type Output = PhaseSet;
    #[inline]
    fn bitor(self, rhs: PhaseSet) -> PhaseSet {
        self.with(rhs)
    }
}

impl From<Phase> for PhaseSet {
    fn from(phase: Phase) -> Self {
        PhaseSet::of(phase)
    }
}

impl fmt::Debug for PhaseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
