//! Subspace derivation
//!
//! A subspace is a derived view over a parent container: a narrowed state
//! projection plus, optionally, a namespace boundary that tags outgoing
//! events. Derived containers satisfy `StateContainer`, so the factory
//! applies recursively to build arbitrarily deep trees over one root.

use crate::error::ConfigurationError;
use crate::namespace::{compose_namespace, prefix_event, strip_event};
use crate::options::{SubspaceFactory, SubspaceOptions};
use crate::roles::classify;
use crate::scope::{Scope, ScopeDescriptor, Selector};
use crate::store::{Listener, StateContainer, Unsubscribe};
use std::fmt;
use std::sync::Arc;
use substore_types::{Event, Role, StateValue, ValidationMode};

/// A derived view over a parent container.
///
/// Holds non-owning references to its parent (for state projection and
/// pass-through dispatch) and to the true root (for tagged dispatch,
/// subscription delegation, and O(1) access regardless of nesting depth).
/// The projection is recomputed on every `get_state` call, never cached,
/// so upstream changes are immediately visible.
pub struct Subspace {
    parent: Arc<dyn StateContainer>,
    root: Arc<dyn StateContainer>,
    selector: Selector,
    namespace: String,
    roles: Vec<Role>,
    options: Option<SubspaceOptions>,
}

impl StateContainer for Subspace {
    fn get_state(&self) -> StateValue {
        (*self.selector)(&self.parent.get_state(), &self.root.get_state())
    }

    fn dispatch(&self, event: Event) -> Event {
        if self.namespace.is_empty() {
            // No boundary at this level: pass straight through, preserving
            // whatever wrapping exists further up.
            self.parent.dispatch(event)
        } else {
            self.root.dispatch(prefix_event(&self.namespace, event))
        }
    }

    fn subscribe(&self, listener: Listener) -> Unsubscribe {
        self.root.subscribe(listener)
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn subspace_types(&self) -> &[Role] {
        &self.roles
    }

    fn root_store(&self) -> Option<Arc<dyn StateContainer>> {
        Some(self.root.clone())
    }

    fn process_action(&self, event: Event) -> Event {
        strip_event(&self.namespace, event)
    }

    fn options(&self) -> Option<&SubspaceOptions> {
        self.options.as_ref()
    }
}

impl fmt::Debug for Subspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subspace")
            .field("namespace", &self.namespace)
            .field("roles", &self.roles)
            .finish()
    }
}

/// Derive a container from a parent with an already-resolved descriptor.
///
/// This is the central algorithm: compose the namespace path, classify the
/// node's roles, resolve effective options (explicit over inherited), build
/// the base factory, thread it through the extension if one applies, and
/// run the resulting factory on the parent.
pub fn derive(
    parent: Arc<dyn StateContainer>,
    descriptor: ScopeDescriptor,
    options: Option<SubspaceOptions>,
) -> Arc<dyn StateContainer> {
    let namespace = compose_namespace(parent.namespace(), descriptor.namespace.as_deref());
    let roles = classify(parent.subspace_types(), descriptor.namespace.is_some());
    let options = options.or_else(|| parent.options().cloned());

    tracing::debug!("deriving subspace at '{}' with roles {:?}", namespace, roles);

    let base = base_factory(descriptor.selector, namespace, roles, options.clone());
    let factory = match options.as_ref().and_then(|options| options.extension.clone()) {
        Some(extension) => extension.apply(base),
        None => base,
    };
    (*factory)(parent)
}

fn base_factory(
    selector: Selector,
    namespace: String,
    roles: Vec<Role>,
    options: Option<SubspaceOptions>,
) -> SubspaceFactory {
    Arc::new(move |parent: Arc<dyn StateContainer>| {
        let root = parent.root_store().unwrap_or_else(|| parent.clone());
        let derived: Arc<dyn StateContainer> = Arc::new(Subspace {
            parent,
            root,
            selector: selector.clone(),
            namespace: namespace.clone(),
            roles: roles.clone(),
            options: options.clone(),
        });
        derived
    })
}

/// Wrap a true root container, tagging the result `[Root, NamespaceRoot]`.
///
/// The wrap carries an identity projection and no namespace, so it changes
/// nothing about state or dispatch; it exists to anchor the derivation
/// chain and to carry options for descendants to inherit.
pub fn subspace_root(store: Arc<dyn StateContainer>) -> Arc<dyn StateContainer> {
    derive(store, ScopeDescriptor::identity(), None)
}

/// Wrap a true root container with options.
pub fn subspace_root_with(
    store: Arc<dyn StateContainer>,
    options: SubspaceOptions,
) -> Arc<dyn StateContainer> {
    derive(store, ScopeDescriptor::identity(), Some(options))
}

/// Curried scoped derivation with the default validation mode.
///
/// Returns a factory usable as a composition-friendly enhancer:
///
/// ```
/// use std::sync::Arc;
/// use serde_json::json;
/// use substore_core::{subspace, LocalStore, StateContainer};
///
/// let store: Arc<dyn StateContainer> = Arc::new(LocalStore::new(
///     Arc::new(|state, _| state.clone()),
///     json!({ "child": "expected" }),
/// ));
///
/// let scoped = subspace("child")(store).unwrap();
/// assert_eq!(scoped.get_state(), json!("expected"));
/// ```
pub fn subspace(
    scope: impl Into<Scope>,
) -> impl Fn(Arc<dyn StateContainer>) -> Result<Arc<dyn StateContainer>, ConfigurationError> {
    subspace_in(scope, ValidationMode::default())
}

/// Curried scoped derivation with an explicit validation mode.
///
/// Exists so both validation behaviors stay reachable from one binary;
/// `subspace` pins the mode to the build-profile default.
pub fn subspace_in(
    scope: impl Into<Scope>,
    mode: ValidationMode,
) -> impl Fn(Arc<dyn StateContainer>) -> Result<Arc<dyn StateContainer>, ConfigurationError> {
    let scope = scope.into();
    move |parent| {
        let descriptor = scope.resolve(mode)?;
        Ok(derive(parent, descriptor, None))
    }
}
