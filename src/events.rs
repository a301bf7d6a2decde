//! Press and invoke events with ordered listener lists
//!
//! Events are delivered synchronously: `post` runs every matching listener
//! in registration order before returning, and the first listener to return
//! [`ListenerResult::Stop`] ends delivery for that post.
//!
//! Every listener is attached to a [`TargetId`]. When the owner of the
//! target goes away it calls `remove_target` and all of its listeners are
//! dropped together.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::action::ActionId;
use crate::bind::Bind;

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Whether delivery continues after a listener ran
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListenerResult {
    #[default]
    Propagate,
    Stop,
}

/// A bound action fired (or a held repeatable action repeated)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeBindEvent {
    id: ActionId,
    down: bool,
}

impl InvokeBindEvent {
    pub fn new(id: impl Into<ActionId>, down: bool) -> Self {
        Self {
            id: id.into(),
            down,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_down(&self) -> bool {
        self.down
    }
}

/// A physical input went down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressBindEvent {
    bind: Bind,
    down: bool,
}

impl PressBindEvent {
    pub fn new(bind: Bind, down: bool) -> Self {
        Self { bind, down }
    }

    pub fn bind(&self) -> &Bind {
        &self.bind
    }

    pub fn is_down(&self) -> bool {
        self.down
    }
}

/// Owner of a group of listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u64);

/// Handle for removing a single listener, unique across all lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Filter<E> = Box<dyn Fn(&E) -> bool>;
type Callback<E> = Box<dyn FnMut(&E) -> ListenerResult>;

struct Listener<E> {
    id: ListenerId,
    target: TargetId,
    filter: Option<Filter<E>>,
    callback: Callback<E>,
}

/// Ordered listeners for one event type
pub struct Listeners<E> {
    listeners: Vec<Listener<E>>,
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Append a listener that sees every event
    pub fn add(
        &mut self,
        target: TargetId,
        callback: impl FnMut(&E) -> ListenerResult + 'static,
    ) -> ListenerId {
        self.push(target, None, Box::new(callback))
    }

    /// Append a listener that only sees events accepted by `filter`
    pub fn add_filtered(
        &mut self,
        target: TargetId,
        filter: impl Fn(&E) -> bool + 'static,
        callback: impl FnMut(&E) -> ListenerResult + 'static,
    ) -> ListenerId {
        self.push(target, Some(Box::new(filter)), Box::new(callback))
    }

    fn push(
        &mut self,
        target: TargetId,
        filter: Option<Filter<E>>,
        callback: Callback<E>,
    ) -> ListenerId {
        let id = ListenerId(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed));
        self.listeners.push(Listener {
            id,
            target,
            filter,
            callback,
        });
        id
    }

    /// Returns true if the listener existed
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Drop every listener attached to `target`
    pub fn remove_target(&mut self, target: TargetId) {
        self.listeners.retain(|l| l.target != target);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver `event` in registration order until a listener stops it
    pub fn post(&mut self, event: &E) -> ListenerResult {
        for listener in &mut self.listeners {
            if let Some(filter) = &listener.filter {
                if !filter(event) {
                    continue;
                }
            }
            if (listener.callback)(event) == ListenerResult::Stop {
                return ListenerResult::Stop;
            }
        }
        ListenerResult::Propagate
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.listeners.len())
            .finish()
    }
}
