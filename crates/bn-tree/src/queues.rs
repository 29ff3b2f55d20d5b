//! `PhaseQueues` — one composite's four dispatch queues.
//!
//! Queues are a snapshot of the live child set taken by
//! [`Scene::rebuild_queues`][crate::Scene::rebuild_queues].  Attaching,
//! detaching or destroying children afterwards leaves them untouched, which is
//! why dispatch has to tolerate entries that no longer name a live node.

use bn_behavior::{Phase, PhaseSet};
use bn_core::NodeId;

#[derive(Clone, Default, Debug)]
pub struct PhaseQueues {
    queues: [Vec<NodeId>; 4],
}

impl PhaseQueues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every queue from `(child, membership)` pairs given in
    /// attachment order.
    pub fn rebuild(&mut self, members: impl IntoIterator<Item = (NodeId, PhaseSet)>) {
        for queue in &mut self.queues {
            queue.clear();
        }
        for (child, phases) in members {
            for phase in phases.iter() {
                self.queues[phase.index()].push(child);
            }
        }
    }

    #[inline]
    pub fn get(&self, phase: Phase) -> &[NodeId] {
        &self.queues[phase.index()]
    }

    /// Detach one queue for iteration.  Pair with [`restore`][Self::restore].
    #[inline]
    pub(crate) fn take(&mut self, phase: Phase) -> Vec<NodeId> {
        std::mem::take(&mut self.queues[phase.index()])
    }

    #[inline]
    pub(crate) fn restore(&mut self, phase: Phase, queue: Vec<NodeId>) {
        self.queues[phase.index()] = queue;
    }

    /// Total entries across all four queues.
    pub fn len(&self) -> usize {
        self.queues.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.iter().all(Vec::is_empty)
    }
}
