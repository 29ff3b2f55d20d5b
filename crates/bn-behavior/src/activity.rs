//! Per-node activity flags.
//!
//! The flag is toggled from outside the node (by the host or by another
//! behavior through [`TickContext::set_active`][crate::TickContext]) and is
//! read by the dispatcher immediately before each invocation.  Flags are
//! stored apart from the node arena so the dispatcher can lend them to
//! behaviors while it walks its queues.

use bn_core::NodeId;

#[derive(Clone, Default, Debug)]
pub struct ActivityFlags {
    active:      Vec<bool>,
    generations: Vec<u32>,
}

impl ActivityFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `node`, replacing whatever previously used its slot.
    /// New nodes are active.
    pub fn register(&mut self, node: NodeId) {
        let i = node.index();
        if i >= self.active.len() {
            self.active.resize(i + 1, false);
            self.generations.resize(i + 1, u32::MAX);
        }
        self.active[i] = true;
        self.generations[i] = node.generation;
    }

    /// Stop tracking `node`.  Its flag reads `false` from now on.
    pub fn forget(&mut self, node: NodeId) {
        if self.owns(node) {
            self.active[node.index()] = false;
            self.generations[node.index()] = u32::MAX;
        }
    }

    /// Flag for `node`.  Unknown or stale handles read as inactive.
    #[inline]
    pub fn is_active(&self, node: NodeId) -> bool {
        self.owns(node) && self.active[node.index()]
    }

    /// Set the flag.  Returns `false` (and does nothing) for stale handles.
    pub fn set(&mut self, node: NodeId, active: bool) -> bool {
        if !self.owns(node) {
            return false;
        }
        self.active[node.index()] = active;
        true
    }

    #[inline]
    fn owns(&self, node: NodeId) -> bool {
        self.generations
            .get(node.index())
            .is_some_and(|&g| g == node.generation)
    }
}
