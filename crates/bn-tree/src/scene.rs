//! `Scene` — node arena and the composite dispatcher.
//!
//! # Ownership
//!
//! Every behavior lives in one arena slot owned by the scene.  Composites
//! refer to their children by [`NodeId`] only, so the tree never holds
//! references into itself and a destroyed node simply stops resolving.
//!
//! # Dispatch
//!
//! One scheduler drives the root; there is no per-node frame subscription.
//! For tick and fixed tick the walk is pre-order and flat, one level at a
//! time:
//!
//! ```text
//! forward(node, phase):
//!     if node is not Active: return
//!     for child in node.queue[phase]:          // snapshot from last rebuild
//!         if child is destroyed or its flag is false: skip
//!         if child is Dormant: child.on_start, activate(child)
//!         child.hook(phase)
//!         forward(child, phase)
//! ```
//!
//! The activity flag is read immediately before each child's turn, so a hook
//! that disables a later sibling prevents that sibling's call in the same
//! walk, while enabling an earlier sibling only takes effect next walk.

use bn_behavior::{ActivityFlags, Behavior, Env, Group, Phase, PhaseSet, run_hook};
use bn_core::NodeId;

use crate::{Lifecycle, PhaseQueues, TreeError, TreeResult};

struct Node {
    behavior:  Box<dyn Behavior>,
    phases:    PhaseSet,
    parent:    Option<NodeId>,
    /// Live child set in attachment order.
    children:  Vec<NodeId>,
    queues:    PhaseQueues,
    lifecycle: Lifecycle,
}

struct Slot {
    generation: u32,
    node:       Option<Node>,
}

/// Arena of behavior nodes rooted at a single composite.
pub struct Scene {
    slots:    Vec<Slot>,
    free:     Vec<u32>,
    activity: ActivityFlags,
    root:     NodeId,
    live:     usize,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Empty scene whose root is a plain [`Group`].
    pub fn new() -> Self {
        Self::with_root(Group::new("root"))
    }

    pub fn with_root(root: impl Behavior) -> Self {
        let mut scene = Self {
            slots:    Vec::new(),
            free:     Vec::new(),
            activity: ActivityFlags::new(),
            root:     NodeId::INVALID,
            live:     0,
        };
        let phases = root.phases();
        scene.root = scene.insert(Box::new(root), phases, None);
        scene
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    // ── Structure (configuration time) ────────────────────────────────────

    /// Create a node under `parent`, joining the phases the behavior declares.
    pub fn add(&mut self, parent: NodeId, behavior: impl Behavior) -> TreeResult<NodeId> {
        let phases = behavior.phases();
        self.add_with_phases(parent, behavior, phases)
    }

    /// Create a node under `parent` with parent-assigned phase membership.
    pub fn add_with_phases(
        &mut self,
        parent:   NodeId,
        behavior: impl Behavior,
        phases:   PhaseSet,
    ) -> TreeResult<NodeId> {
        if !self.is_alive(parent) {
            return Err(TreeError::NodeNotFound(parent));
        }
        let id = self.insert(Box::new(behavior), phases, Some(parent));
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        Ok(id)
    }

    /// Create a node with no parent.  It takes part in nothing until
    /// [`attach`][Self::attach]ed.
    pub fn add_detached(&mut self, behavior: impl Behavior) -> NodeId {
        let phases = behavior.phases();
        self.insert(Box::new(behavior), phases, None)
    }

    /// Append a detached node to `parent`'s live child set.
    ///
    /// Already built queues are not touched until the parent is rebuilt.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        if !self.is_alive(parent) {
            return Err(TreeError::NodeNotFound(parent));
        }
        let Some(c) = self.node(child) else {
            return Err(TreeError::NodeNotFound(child));
        };
        if c.parent.is_some() || child == self.root {
            return Err(TreeError::AlreadyAttached(child));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(TreeError::Cycle { parent, child });
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.node_mut(parent) {
            p.children.push(child);
        }
        Ok(())
    }

    /// Remove `child` from its parent's live child set.  The node stays alive
    /// (and stays in the parent's queues until the next rebuild).
    pub fn detach(&mut self, child: NodeId) -> TreeResult<()> {
        if child == self.root {
            return Err(TreeError::RootNode);
        }
        let parent = self.node(child).ok_or(TreeError::NodeNotFound(child))?.parent;
        if let Some(parent) = parent {
            if let Some(p) = self.node_mut(parent) {
                p.children.retain(|&c| c != child);
            }
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = None;
        }
        Ok(())
    }

    /// Free `node` and its whole subtree.  No hooks run.  Queue entries that
    /// still name a freed node are skipped by dispatch from now on.
    ///
    /// Returns the number of nodes freed.
    pub fn destroy(&mut self, node: NodeId) -> TreeResult<usize> {
        if node == self.root {
            return Err(TreeError::RootNode);
        }
        if !self.is_alive(node) {
            return Err(TreeError::NodeNotFound(node));
        }
        self.detach(node)?;

        let doomed = self.descendants(node);
        for &id in &doomed {
            let slot = &mut self.slots[id.index()];
            slot.node = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(id.slot);
            self.activity.forget(id);
        }
        self.live -= doomed.len();
        log::debug!("destroyed {node} ({} node(s))", doomed.len());
        Ok(doomed.len())
    }

    /// Change which phases `node` joins.  Takes effect when its parent is
    /// rebuilt.
    pub fn set_phases(&mut self, node: NodeId, phases: PhaseSet) -> TreeResult<()> {
        let n = self.node_mut(node).ok_or(TreeError::NodeNotFound(node))?;
        n.phases = phases;
        Ok(())
    }

    /// Rebuild `node`'s four queues from its live child set: every child that
    /// joins a phase, in attachment order.
    ///
    /// If `node` is already active, a newly queued child that was never
    /// started gets its `on_start` and is activated just before its first
    /// forwarded tick.
    pub fn rebuild_queues(&mut self, node: NodeId) -> TreeResult<()> {
        let n = self.node(node).ok_or(TreeError::NodeNotFound(node))?;
        let members: Vec<(NodeId, PhaseSet)> = n
            .children
            .iter()
            .filter_map(|&c| self.node(c).map(|cn| (c, cn.phases)))
            .collect();
        if let Some(n) = self.node_mut(node) {
            n.queues.rebuild(members);
        }
        Ok(())
    }

    // ── Activity flags ────────────────────────────────────────────────────

    /// Set `node`'s activity flag.  Returns `false` for dead handles.
    pub fn set_active(&mut self, node: NodeId, active: bool) -> bool {
        self.activity.set(node, active)
    }

    pub fn is_active(&self, node: NodeId) -> bool {
        self.activity.is_active(node)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Activate the root: run its own `on_start`, then [`activate`][Self::activate] it.
    pub fn start(&mut self, env: &mut Env<'_>) {
        let root = self.root;
        if self.lifecycle(root).is_some_and(Lifecycle::can_activate) {
            log::debug!("activating scene ({} node(s))", self.live);
            self.invoke(root, Phase::Start, env);
            self.activate(root, env);
        }
    }

    /// Deactivate the root: run its own `on_end`, then
    /// [`deactivate`][Self::deactivate] it.
    pub fn end(&mut self, env: &mut Env<'_>) {
        let root = self.root;
        if self.lifecycle(root).is_some_and(Lifecycle::is_active) {
            log::debug!("deactivating scene");
            self.invoke(root, Phase::End, env);
            self.deactivate(root, env);
        }
    }

    /// Make `node` live: rebuild its queues, then for each child in the start
    /// queue run its `on_start` and activate it in turn.  Children that do
    /// not join the start phase are activated afterwards without a hook.
    ///
    /// No-op if `node` is already active or dead.
    pub fn activate(&mut self, node: NodeId, env: &mut Env<'_>) {
        match self.node_mut(node) {
            Some(n) if n.lifecycle.can_activate() => n.lifecycle = Lifecycle::Active,
            _ => return,
        }
        // Live by the check above.
        let _ = self.rebuild_queues(node);

        let Some(start) = self.node_mut(node).map(|n| n.queues.take(Phase::Start)) else {
            return;
        };
        for &child in &start {
            if !self.is_alive(child) {
                continue;
            }
            self.invoke(child, Phase::Start, env);
            self.activate(child, env);
        }
        if let Some(n) = self.node_mut(node) {
            n.queues.restore(Phase::Start, start);
        }

        for child in self.children(node).to_vec() {
            self.activate(child, env);
        }
    }

    /// Take `node` out of service: for each started child in the end queue
    /// run its `on_end` (whatever its activity flag) and deactivate it in
    /// turn.
    /// Remaining active children are deactivated afterwards without a hook.
    ///
    /// No-op unless `node` is active.
    pub fn deactivate(&mut self, node: NodeId, env: &mut Env<'_>) {
        match self.node_mut(node) {
            Some(n) if n.lifecycle.is_active() => n.lifecycle = Lifecycle::Ended,
            _ => return,
        }

        let Some(end) = self.node_mut(node).map(|n| n.queues.take(Phase::End)) else {
            return;
        };
        for &child in &end {
            // Never-started children get no `on_end`.
            if self.lifecycle(child).is_none_or(|l| l == Lifecycle::Dormant) {
                continue;
            }
            self.invoke(child, Phase::End, env);
            self.deactivate(child, env);
        }
        if let Some(n) = self.node_mut(node) {
            n.queues.restore(Phase::End, end);
        }

        for child in self.children(node).to_vec() {
            self.deactivate(child, env);
        }
    }

    // ── Per-frame dispatch ────────────────────────────────────────────────

    /// One variable-step walk of the whole tree.
    pub fn tick(&mut self, env: &mut Env<'_>) {
        self.walk(Phase::Tick, env);
    }

    /// One fixed-step walk of the whole tree.
    pub fn fixed_tick(&mut self, env: &mut Env<'_>) {
        self.walk(Phase::FixedTick, env);
    }

    /// Route any phase to the matching entry point.
    pub fn dispatch(&mut self, phase: Phase, env: &mut Env<'_>) {
        match phase {
            Phase::Start => self.start(env),
            Phase::Tick | Phase::FixedTick => self.walk(phase, env),
            Phase::End => self.end(env),
        }
    }

    fn walk(&mut self, phase: Phase, env: &mut Env<'_>) {
        let root = self.root;
        if !self.activity.is_active(root) {
            return;
        }
        if self.lifecycle(root).is_some_and(Lifecycle::is_active) {
            self.invoke(root, phase, env);
            self.forward(root, phase, env);
        }
    }

    /// Forward `phase` to `node`'s queue.  The queue is detached while it is
    /// walked, so re-entering the same node through a stale snapshot finds it
    /// empty.
    fn forward(&mut self, node: NodeId, phase: Phase, env: &mut Env<'_>) {
        let queue = match self.node_mut(node) {
            Some(n) if n.lifecycle.is_active() => n.queues.take(phase),
            _ => return,
        };
        for &child in &queue {
            // Dead and stale handles read as inactive.
            if !self.activity.is_active(child) {
                continue;
            }
            if self.lifecycle(child) == Some(Lifecycle::Dormant) {
                self.start_late(child, env);
            }
            self.invoke(child, phase, env);
            self.forward(child, phase, env);
        }
        if let Some(n) = self.node_mut(node) {
            n.queues.restore(phase, queue);
        }
    }

    /// Bring up a child that reached a live parent's queues after the parent
    /// was activated, the way `activate` would have.
    fn start_late(&mut self, child: NodeId, env: &mut Env<'_>) {
        if self.phases(child).is_some_and(|p| p.contains(Phase::Start)) {
            self.invoke(child, Phase::Start, env);
        }
        self.activate(child, env);
    }

    fn invoke(&mut self, id: NodeId, phase: Phase, env: &mut Env<'_>) {
        let Self { slots, activity, .. } = self;
        let Some(node) = slots
            .get_mut(id.index())
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_mut())
        else {
            return;
        };
        let mut ctx = env.context(phase, id, activity);
        run_hook(node.behavior.as_mut(), phase, &mut ctx);
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn is_alive(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    /// Live child set in attachment order (empty for dead handles).
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    /// Snapshot queue for `phase` as of the last rebuild.
    pub fn queue(&self, node: NodeId, phase: Phase) -> &[NodeId] {
        self.node(node).map(|n| n.queues.get(phase)).unwrap_or_default()
    }

    pub fn lifecycle(&self, node: NodeId) -> Option<Lifecycle> {
        self.node(node).map(|n| n.lifecycle)
    }

    pub fn phases(&self, node: NodeId) -> Option<PhaseSet> {
        self.node(node).map(|n| n.phases)
    }

    pub fn name(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.behavior.name())
    }

    pub fn behavior(&self, node: NodeId) -> Option<&dyn Behavior> {
        self.node(node).map(|n| n.behavior.as_ref())
    }

    /// `node` and everything below it, pre-order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let Some(n) = self.node(id) else { continue };
            out.push(id);
            stack.extend(n.children.iter().rev().copied());
        }
        out
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn insert(&mut self, behavior: Box<dyn Behavior>, phases: PhaseSet, parent: Option<NodeId>) -> NodeId {
        let node = Node {
            behavior,
            phases,
            parent,
            children:  Vec::new(),
            queues:    PhaseQueues::new(),
            lifecycle: Lifecycle::Dormant,
        };
        let id = match self.free.pop() {
            Some(slot) => {
                let s = &mut self.slots[slot as usize];
                s.node = Some(node);
                NodeId::new(slot, s.generation)
            }
            None => {
                let slot = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, node: Some(node) });
                NodeId::new(slot, 0)
            }
        };
        self.activity.register(id);
        self.live += 1;
        id
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index())
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index())
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_mut())
    }

    /// `true` if `ancestor` is `node` or lies on its parent chain.
    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.parent(id);
        }
        false
    }
}
