//! Mutable per-invocation state passed to every behavior hook.

use bn_cell::CellTable;
use bn_core::{EventId, NodeId, Tick};

use crate::{ActivityFlags, EventBus, EventContext, Host, Phase};

/// Everything the scheduler lends to one tree walk.
///
/// `Env` is built once per phase dispatch by the runner and handed to the
/// scene, which narrows it into a [`TickContext`] for each hook it invokes.
pub struct Env<'a> {
    /// Current frame.
    pub frame: Tick,

    /// Seconds covered by this dispatch: the fixed step for fixed ticks, the
    /// frame delta for ticks, `0.0` for start and end.
    pub dt: f32,

    pub cells:  &'a mut CellTable,
    pub events: &'a mut EventBus,
    pub host:   &'a mut dyn Host,
}

impl<'a> Env<'a> {
    #[inline]
    pub fn new(
        frame:  Tick,
        dt:     f32,
        cells:  &'a mut CellTable,
        events: &'a mut EventBus,
        host:   &'a mut dyn Host,
    ) -> Self {
        Self { frame, dt, cells, events, host }
    }

    /// Borrow this environment for one hook call on `node`.
    #[inline]
    pub fn context<'b>(
        &'b mut self,
        phase:    Phase,
        node:     NodeId,
        activity: &'b mut ActivityFlags,
    ) -> TickContext<'b> {
        TickContext {
            phase,
            frame: self.frame,
            dt: self.dt,
            node,
            cells: &mut *self.cells,
            events: &mut *self.events,
            activity,
            host: &mut *self.host,
        }
    }
}

/// State visible to a behavior while one of its hooks runs.
///
/// Hooks communicate only through side effects: writes to cells, event
/// invocations, activity toggles and host calls.
pub struct TickContext<'a> {
    pub phase: Phase,
    pub frame: Tick,
    pub dt:    f32,

    /// The node whose hook is running.
    pub node: NodeId,

    pub cells:  &'a mut CellTable,
    pub events: &'a mut EventBus,
    pub host:   &'a mut dyn Host,

    activity: &'a mut ActivityFlags,
}

impl TickContext<'_> {
    /// Run every subscriber of `event`.
    pub fn invoke(&mut self, event: EventId) {
        let mut ectx = EventContext {
            frame: self.frame,
            cells: &mut *self.cells,
            host:  &mut *self.host,
        };
        self.events.invoke(event, &mut ectx);
    }

    /// Toggle another node's activity flag.  Takes effect the next time the
    /// dispatcher reaches that node, including later in the current queue.
    #[inline]
    pub fn set_active(&mut self, node: NodeId, active: bool) -> bool {
        self.activity.set(node, active)
    }

    #[inline]
    pub fn is_active(&self, node: NodeId) -> bool {
        self.activity.is_active(node)
    }
}
