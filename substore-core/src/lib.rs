//! Substore - scoped state containers with namespaced event routing
//!
//! This crate lets independent pieces of an application share one global
//! state container while each piece sees only its own slice of that state
//! and emits events that are automatically tagged for routing back to the
//! right slice.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 root StateContainer                  │
//! │        (sole owner of the authoritative state)       │
//! └──────────▲──────────────────▲───────────────────────┘
//!            │ get_state /      │ dispatch("a/b/X")
//!            │ subscribe        │
//!    ┌───────┴───────┐  ┌───────┴───────┐
//!    │ subspace "a"  │  │ subspace "a"  │
//!    │ [NS_ROOT, …]  │  │      …        │
//!    └───────▲───────┘  └───────▲───────┘
//!            │                  │
//!        (no namespace)     ┌───┴───────────┐
//!            │              │ subspace "b"  │ dispatches {kind:"X"},
//!            …              │ path "a/b"    │ tagged once as "a/b/X"
//!                           └───────────────┘
//! ```
//!
//! Every derived container is a cheap view: `get_state` re-projects the
//! parent's state on each call, `dispatch` tags the event kind with the
//! node's accumulated namespace path (exactly once, however deep the
//! chain), and `subscribe` delegates straight to the root's notification
//! stream.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::json;
//! use substore_core::{namespaced, subspace, subspace_root, Event, LocalStore, Reducer};
//!
//! // One slice of the root state, with its reducer mounted under a
//! // namespace so it only sees events tagged "counter/…".
//! let counter: Reducer = Arc::new(|state, event| match event.kind.as_str() {
//!     "INCREMENT" => json!({ "count": state["count"].as_i64().unwrap_or(0) + 1 }),
//!     _ => state.clone(),
//! });
//! let root_reducer: Reducer = {
//!     let counter = namespaced("counter", counter);
//!     Arc::new(move |state, event| {
//!         json!({ "counter": (*counter)(&state["counter"], event) })
//!     })
//! };
//!
//! let store = Arc::new(LocalStore::new(root_reducer, json!({ "counter": { "count": 0 } })));
//! let root = subspace_root(store);
//! let scoped = subspace("counter")(root).unwrap();
//!
//! // The scoped view dispatches an untagged event; the engine tags it,
//! // the namespaced reducer un-tags it, and the projection updates.
//! scoped.dispatch(Event::new("INCREMENT"));
//! assert_eq!(scoped.get_state(), json!({ "count": 1 }));
//! ```

// Modules
pub mod error;
pub mod namespace;
pub mod options;
pub mod roles;
pub mod scope;
pub mod store;
pub mod subspace;

// Re-exports for convenience
pub use error::{ConfigurationError, Result};
pub use namespace::{compose_namespace, namespaced, prefix_event, strip_event};
pub use options::{Extension, SubspaceFactory, SubspaceOptions};
pub use roles::classify;
pub use scope::{Scope, ScopeDescriptor, Selector};
pub use store::{Listener, LocalStore, Reducer, StateContainer, Unsubscribe};
pub use subspace::{derive, subspace, subspace_in, subspace_root, subspace_root_with, Subspace};
pub use substore_types::{Event, Role, StateValue, ValidationMode};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::scope::Scope;
    pub use crate::store::{LocalStore, StateContainer};
    pub use crate::subspace::{subspace, subspace_root};
    pub use substore_types::{Event, Role, StateValue, ValidationMode};
}
