//! Shared input-event stream that panels subscribe to while they need it.
//!
//! The hub stands in for a document's global listener list: the host
//! dispatches every raw pointer press and key press into it, and any number
//! of listeners filter what they care about. It is single-threaded; handlers
//! run to completion in registration order.

use std::cell::RefCell;
use std::rc::Rc;

/// Keys the hub distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Character(char),
    Other,
}

/// A raw input event delivered to the hub.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent<T> {
    /// A pointer button went down over `target`.
    PointerDown { target: T },
    /// A key went down.
    KeyDown { key: Key },
}

impl<T> InputEvent<T> {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerDown { .. } => EventKind::PointerDown,
            Self::KeyDown { .. } => EventKind::KeyDown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    KeyDown,
}

/// Identifies a registered listener. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Handler<T> = Rc<dyn Fn(&InputEvent<T>)>;

struct Listener<T> {
    id: ListenerId,
    kind: EventKind,
    handler: Handler<T>,
}

struct HubState<T> {
    next_id: u64,
    listeners: Vec<Listener<T>>,
}

/// Cloneable handle to a shared listener list.
pub struct EventHub<T> {
    state: Rc<RefCell<HubState<T>>>,
}

impl<T> Clone for EventHub<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: 'static> Default for EventHub<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> EventHub<T> {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(HubState {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn add_listener(
        &self,
        kind: EventKind,
        handler: impl Fn(&InputEvent<T>) + 'static,
    ) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let id = ListenerId(state.next_id);
        state.next_id += 1;
        state.listeners.push(Listener {
            id,
            kind,
            handler: Rc::new(handler),
        });
        log::trace!("listener {id:?} added for {kind:?}");
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.listeners.len();
        state.listeners.retain(|listener| listener.id != id);
        let removed = state.listeners.len() != before;
        if removed {
            log::trace!("listener {id:?} removed");
        }
        removed
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    pub fn listener_count_for(&self, kind: EventKind) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|listener| listener.kind == kind)
            .count()
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.state
            .borrow()
            .listeners
            .iter()
            .any(|listener| listener.id == id)
    }

    /// Delivers an event to every listener of its kind and returns how many ran.
    ///
    /// Listeners added while dispatching do not see the current event, and
    /// listeners removed while dispatching are skipped.
    pub fn dispatch(&self, event: &InputEvent<T>) -> usize {
        let kind = event.kind();
        let snapshot: Vec<(ListenerId, Handler<T>)> = self
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|listener| listener.kind == kind)
            .map(|listener| (listener.id, Rc::clone(&listener.handler)))
            .collect();

        let mut delivered = 0;
        for (id, handler) in snapshot {
            if !self.is_registered(id) {
                continue;
            }
            handler(event);
            delivered += 1;
        }
        delivered
    }
}
