//! Multi-subscriber event slots.
//!
//! An event is an argument-less delegate: triggers call
//! [`TickContext::invoke`][crate::TickContext::invoke] and every subscriber
//! runs in subscription order.  Subscribers are bound at configuration time
//! and receive an [`EventContext`] so they can touch cells and the host
//! (spawn a bullet, despawn a target, …).

use bn_cell::CellTable;
use bn_core::{EventId, Tick};

use crate::{BehaviorError, BehaviorResult, Host};

/// What an event subscriber may touch while it runs.
pub struct EventContext<'a> {
    pub frame: Tick,
    pub cells: &'a mut CellTable,
    pub host:  &'a mut dyn Host,
}

/// A bound event handler.
pub type Subscriber = Box<dyn FnMut(&mut EventContext<'_>)>;

/// Owner of every event slot in a scene.
#[derive(Default)]
pub struct EventBus {
    slots:       Vec<Vec<Subscriber>>,
    invocations: Vec<u64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new event slot with no subscribers.
    pub fn create(&mut self) -> EventId {
        let id = EventId(self.slots.len() as u32);
        self.slots.push(Vec::new());
        self.invocations.push(0);
        id
    }

    /// Bind `handler` to `event`.  Handlers run in subscription order.
    pub fn subscribe(
        &mut self,
        event:   EventId,
        handler: impl FnMut(&mut EventContext<'_>) + 'static,
    ) -> BehaviorResult<()> {
        let slot = self
            .slots
            .get_mut(event.index())
            .ok_or(BehaviorError::UnknownEvent(event))?;
        slot.push(Box::new(handler));
        log::debug!("{event}: {} subscriber(s)", slot.len());
        Ok(())
    }

    pub fn subscriber_count(&self, event: EventId) -> usize {
        self.slots.get(event.index()).map_or(0, Vec::len)
    }

    /// How many times `event` has been invoked.
    pub fn invocations(&self, event: EventId) -> u64 {
        self.invocations.get(event.index()).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Run every subscriber of `event`.  Unknown events are ignored.
    pub fn invoke(&mut self, event: EventId, ctx: &mut EventContext<'_>) {
        let Some(mut subscribers) = self.take(event) else {
            return;
        };
        for handler in subscribers.iter_mut() {
            handler(ctx);
        }
        self.restore(event, subscribers);
    }

    /// Detach the subscriber list so it can run while the bus is borrowed
    /// elsewhere.  Pair with [`restore`][Self::restore].
    fn take(&mut self, event: EventId) -> Option<Vec<Subscriber>> {
        let slot = self.slots.get_mut(event.index())?;
        self.invocations[event.index()] += 1;
        Some(std::mem::take(slot))
    }

    fn restore(&mut self, event: EventId, mut subscribers: Vec<Subscriber>) {
        if let Some(slot) = self.slots.get_mut(event.index()) {
            subscribers.append(slot);
            *slot = subscribers;
        }
    }
}
