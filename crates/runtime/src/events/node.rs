use std::collections::HashMap;
use std::fmt;

use combat_core::World;

use super::{CombatEvent, EventKind};

/// Callback invoked for every dispatched event of the kind it subscribed to.
pub type Listener = Box<dyn Fn(&CombatEvent, &mut dyn World) + Send + Sync>;

/// Routes events to the listeners registered for their [`EventKind`].
///
/// Listeners run synchronously in registration order, which follows the
/// feature initialization order.
#[derive(Default)]
pub struct EventNode {
    listeners: HashMap<EventKind, Vec<Listener>>,
}

impl EventNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener<F>(&mut self, kind: EventKind, listener: F)
    where
        F: Fn(&CombatEvent, &mut dyn World) + Send + Sync + 'static,
    {
        self.listeners
            .entry(kind)
            .or_default()
            .push(Box::new(listener));
    }

    pub fn dispatch(&self, event: &CombatEvent, world: &mut dyn World) {
        let Some(listeners) = self.listeners.get(&event.kind()) else {
            return;
        };
        for listener in listeners {
            listener(event, &mut *world);
        }
    }

    /// Total number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    pub fn listeners_for(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }
}

impl fmt::Debug for EventNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<_> = self
            .listeners
            .iter()
            .map(|(kind, listeners)| (kind.to_string(), listeners.len()))
            .collect();
        counts.sort();
        f.debug_struct("EventNode").field("listeners", &counts).finish()
    }
}
