#![forbid(unsafe_code)]

//! Document events and the per-instance listener registry.
//!
//! The event vocabulary is deliberately small: the host maps its native
//! input events onto these variants before dispatching, the same way a
//! terminal host maps key codes onto a widget-level key enum.

use crate::node::NodeId;

/// Simplified key vocabulary for document-level key handling.
///
/// The hosting application maps its native key events to these variants;
/// keys the widget does not react to arrive as [`Other`](Self::Other).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Escape key.
    Escape,
    /// Tab key.
    Tab,
    /// Enter key.
    Enter,
    /// Any other key (not consumed).
    Other,
}

/// An event delivered to document-level listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Focus moved to `target`.
    FocusIn {
        /// The newly focused element.
        target: NodeId,
    },
    /// A key was pressed.
    Key(Key),
    /// An element was clicked.
    Click {
        /// The element that received the click.
        target: NodeId,
    },
}

impl Event {
    /// The listener category this event belongs to.
    pub fn event_type(&self) -> EventType {
        match self {
            Event::FocusIn { .. } => EventType::FocusIn,
            Event::Key(_) => EventType::KeyDown,
            Event::Click { .. } => EventType::Click,
        }
    }
}

/// Listener categories a widget can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Focus-change notifications.
    FocusIn,
    /// Key presses.
    KeyDown,
    /// Clicks.
    Click,
}

/// Handle to a registered document-level listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registry of document-level listeners.
///
/// Widgets subscribe on attach and unsubscribe on detach; the registry is
/// the only handler state shared between instances.
#[derive(Debug, Default)]
pub(crate) struct ListenerRegistry {
    entries: Vec<(ListenerId, EventType)>,
    next_id: u64,
}

impl ListenerRegistry {
    pub(crate) fn register(&mut self, ty: EventType) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push((id, ty));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }

    pub(crate) fn count(&self, ty: EventType) -> usize {
        self.entries.iter().filter(|(_, t)| *t == ty).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_remove() {
        let mut registry = ListenerRegistry::default();
        let a = registry.register(EventType::FocusIn);
        let b = registry.register(EventType::KeyDown);

        assert!(registry.contains(a));
        assert_eq!(registry.count(EventType::FocusIn), 1);

        assert!(registry.remove(a));
        assert!(!registry.contains(a));
        assert!(!registry.remove(a));
        assert!(registry.contains(b));
    }

    #[test]
    fn event_type_mapping() {
        let node = NodeId(1);
        assert_eq!(
            Event::FocusIn { target: node }.event_type(),
            EventType::FocusIn
        );
        assert_eq!(Event::Key(Key::Escape).event_type(), EventType::KeyDown);
        assert_eq!(Event::Click { target: node }.event_type(), EventType::Click);
    }
}
