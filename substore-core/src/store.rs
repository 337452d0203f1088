//! State container contract and the local reference store
//!
//! A container exposes three operations: read the current state, dispatch an
//! event, and subscribe to change notifications. Derived containers satisfy
//! the same contract as the root they wrap, so every container is a valid
//! parent for further derivation.
//!
//! This module provides:
//! - `StateContainer` trait: the core abstraction, with defaulted scoping
//!   accessors so a raw root store satisfies it without modification
//! - `LocalStore`: default single-process, reducer-driven implementation

use crate::options::SubspaceOptions;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use substore_types::{Event, Role, StateValue};

/// Change-notification callback.
///
/// Listeners receive no arguments; a notified consumer calls `get_state()`
/// on whichever container it holds to read the current projection.
pub type Listener = Box<dyn FnMut() + Send>;

/// Reducer computing the next state from the current state and an event.
pub type Reducer = Arc<dyn Fn(&StateValue, &Event) -> StateValue + Send + Sync>;

/// Handle releasing a listener registration.
///
/// The handle is consumed by the release call, so a registration can be
/// released at most once. Dropping the handle without calling it leaves the
/// listener registered for the container's lifetime.
pub struct Unsubscribe {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Unsubscribe {
    /// Create a handle around a release action.
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Release the listener registration.
    pub fn unsubscribe(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Unsubscribe")
    }
}

/// Core trait for state containers.
///
/// The first three operations are the minimal contract consumed from a
/// wrapped root container. The remaining accessors describe a container's
/// position in a derivation chain; their defaults describe a true root
/// (empty namespace, no role tags, no options), which is exactly what lets
/// the derivation engine treat raw stores and derived views uniformly.
pub trait StateContainer: Send + Sync {
    /// Read the current state.
    fn get_state(&self) -> StateValue;

    /// Dispatch an event, returning the dispatched event by convention.
    fn dispatch(&self, event: Event) -> Event;

    /// Register a change listener.
    ///
    /// Notification ordering and re-entrancy behavior are whatever the
    /// underlying root container guarantees; the scoping layer never adds
    /// buffering or filtering on top.
    fn subscribe(&self, listener: Listener) -> Unsubscribe;

    /// The accumulated namespace path of this container.
    fn namespace(&self) -> &str {
        ""
    }

    /// Role tags describing this container's position in the chain.
    fn subspace_types(&self) -> &[Role] {
        &[]
    }

    /// The true root container, if this container is a derived view.
    fn root_store(&self) -> Option<Arc<dyn StateContainer>> {
        None
    }

    /// Reinterpret a globally-namespaced event locally, stripping this
    /// container's namespace prefix from its kind if present.
    fn process_action(&self, event: Event) -> Event {
        event
    }

    /// Options resolved for this container, inheritable by derivations.
    fn options(&self) -> Option<&SubspaceOptions> {
        None
    }
}

/// A local, single-process state container.
///
/// State transitions are computed by a caller-supplied reducer; listeners
/// are notified after every dispatch, in registration order. This is the
/// default root container for applications that don't bring their own.
pub struct LocalStore {
    state: RwLock<StateValue>,
    reducer: Reducer,
    subscribers: Arc<Mutex<Vec<(u64, Arc<Mutex<Listener>>)>>>,
    next_subscriber: AtomicU64,
}

impl LocalStore {
    /// Create a store with a reducer and an initial state.
    pub fn new(reducer: Reducer, initial: StateValue) -> Self {
        Self {
            state: RwLock::new(initial),
            reducer,
            subscribers: Arc::new(Mutex::new(Vec::new())),
            next_subscriber: AtomicU64::new(1),
        }
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl StateContainer for LocalStore {
    fn get_state(&self) -> StateValue {
        self.state.read().clone()
    }

    fn dispatch(&self, event: Event) -> Event {
        {
            let mut state = self.state.write();
            let next = (*self.reducer)(&state, &event);
            *state = next;
        }

        // Snapshot before notifying so listeners may subscribe or
        // unsubscribe re-entrantly without deadlocking on the registry.
        let listeners: Vec<Arc<Mutex<Listener>>> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        tracing::trace!("dispatched {} to {} listeners", event.kind, listeners.len());

        for listener in listeners {
            let mut callback = listener.lock();
            (*callback)();
        }

        event
    }

    fn subscribe(&self, listener: Listener) -> Unsubscribe {
        let id = self.next_subscriber.fetch_add(1, Ordering::SeqCst);
        self.subscribers
            .lock()
            .push((id, Arc::new(Mutex::new(listener))));

        let subscribers = Arc::clone(&self.subscribers);
        Unsubscribe::new(move || {
            subscribers.lock().retain(|(entry, _)| *entry != id);
        })
    }
}

impl fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalStore")
            .field("state", &*self.state.read())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
