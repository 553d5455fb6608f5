//! Synchronous, single-threaded publish/subscribe primitive used by the area controllers.
//!
//! Listeners are registered under an event kind and invoked in registration order.
//! Every registration returns its own [`ListenerId`], so the same closure registered
//! twice is invoked twice and each registration is removed independently.
//!
//! A listener that panics aborts the dispatch: the panic propagates to whoever called
//! [`Emitter::emit`] and the listeners after it are not invoked for that event.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    fmt,
    hash::Hash,
    rc::Rc,
};

use tracing::trace;

/// An event value that knows which kind of notification it is.
pub trait AreaEvent {
    type Kind: Copy + Eq + Hash + fmt::Debug;

    fn kind(&self) -> Self::Kind;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener<E> = Rc<dyn Fn(&E)>;

pub struct Emitter<E: AreaEvent> {
    next_id: Cell<u64>,
    listeners: RefCell<HashMap<E::Kind, Vec<(ListenerId, Listener<E>)>>>,
}

impl<E: AreaEvent> Default for Emitter<E> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            listeners: RefCell::new(HashMap::new()),
        }
    }
}

impl<E: AreaEvent> fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.borrow();
        let counts: HashMap<_, _> = listeners
            .iter()
            .map(|(kind, registered)| (*kind, registered.len()))
            .collect();
        f.debug_struct("Emitter")
            .field("listeners", &counts)
            .finish()
    }
}

impl<E: AreaEvent> Emitter<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener<F>(&self, kind: E::Kind, listener: F) -> ListenerId
    where
        F: Fn(&E) + 'static,
    {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push((id, Rc::new(listener)));
        id
    }

    /// Removes one registration. Returns `false` if `id` is not registered under `kind`.
    pub fn remove_listener(&self, kind: E::Kind, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let Some(registered) = listeners.get_mut(&kind) else {
            return false;
        };
        let Some(position) = registered.iter().position(|(existing, _)| *existing == id) else {
            return false;
        };
        registered.remove(position);
        if registered.is_empty() {
            listeners.remove(&kind);
        }
        true
    }

    pub fn remove_all_listeners(&self) {
        self.listeners.borrow_mut().clear();
    }

    pub fn remove_all_listeners_of(&self, kind: E::Kind) {
        self.listeners.borrow_mut().remove(&kind);
    }

    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.listeners
            .borrow()
            .get(&kind)
            .map_or(0, |registered| registered.len())
    }

    /// Delivers `event` to every listener registered for its kind when the call starts.
    ///
    /// The registry is not borrowed while listeners run, so a listener may add or remove
    /// listeners (effective from the next emit) or write back into the owning controller.
    /// Returns the number of listeners invoked.
    pub fn emit(&self, event: &E) -> usize {
        let kind = event.kind();
        let snapshot: Vec<Listener<E>> = self
            .listeners
            .borrow()
            .get(&kind)
            .map(|registered| {
                registered
                    .iter()
                    .map(|(_, listener)| Rc::clone(listener))
                    .collect()
            })
            .unwrap_or_default();

        trace!(kind = ?kind, listeners = snapshot.len(), "emitting area event");
        for listener in &snapshot {
            listener(event);
        }
        snapshot.len()
    }
}

#[cfg(test)]
#[path = "tests/emitter_tests.rs"]
mod tests;
