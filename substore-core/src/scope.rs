//! Scope arguments and descriptor resolution
//!
//! A derivation is scoped by a selector (narrowing the state projection),
//! a namespace (tagging outgoing events), or both. Callers express this as
//! a `Scope` value; resolution normalizes it into a `ScopeDescriptor` with
//! a concrete selector and an optional namespace label.

use crate::error::ConfigurationError;
use std::fmt;
use std::sync::Arc;
use substore_types::{StateValue, ValidationMode};

/// Selector projecting a substate from `(local_state, root_state)`.
///
/// Most selectors only look at the first argument; the root state is passed
/// for the occasional projection that needs global context.
pub type Selector = Arc<dyn Fn(&StateValue, &StateValue) -> StateValue + Send + Sync>;

/// Caller-supplied scoping arguments for a derivation.
///
/// Mirrors the accepted argument shapes: a selector, a selector plus a
/// namespace, a bare namespace (which doubles as a key selector), or
/// nothing at all. Strings convert directly:
///
/// ```
/// use substore_core::Scope;
///
/// let scope: Scope = "widget".into();
/// ```
#[derive(Clone)]
pub enum Scope {
    /// Selector only; no event-routing boundary is introduced.
    Selector(Selector),
    /// Selector plus an explicit namespace label.
    SelectorAndNamespace(Selector, String),
    /// Namespace label doubling as a key selector into the local state.
    Namespace(String),
    /// No scoping arguments.
    Empty,
}

impl Scope {
    /// Scope by a selector over `(local_state, root_state)`.
    pub fn select(
        selector: impl Fn(&StateValue, &StateValue) -> StateValue + Send + Sync + 'static,
    ) -> Self {
        Scope::Selector(Arc::new(selector))
    }

    /// Scope by a selector that ignores the root state.
    pub fn select_local(
        selector: impl Fn(&StateValue) -> StateValue + Send + Sync + 'static,
    ) -> Self {
        Scope::Selector(Arc::new(move |local, _| selector(local)))
    }

    /// Scope by a selector and an explicit namespace label.
    pub fn select_in(
        selector: impl Fn(&StateValue, &StateValue) -> StateValue + Send + Sync + 'static,
        namespace: impl Into<String>,
    ) -> Self {
        Scope::SelectorAndNamespace(Arc::new(selector), namespace.into())
    }

    /// Scope by a namespace label only.
    pub fn namespace(namespace: impl Into<String>) -> Self {
        Scope::Namespace(namespace.into())
    }

    /// No scoping arguments.
    pub fn empty() -> Self {
        Scope::Empty
    }

    /// Resolve into a descriptor, validating per the given mode.
    ///
    /// An empty-string namespace counts as not supplied. When neither a
    /// selector nor a namespace is resolvable, strict mode rejects the
    /// arguments; permissive mode elides the check and falls back to an
    /// identity selector with no namespace.
    pub fn resolve(&self, mode: ValidationMode) -> Result<ScopeDescriptor, ConfigurationError> {
        match self {
            Scope::Selector(selector) => Ok(ScopeDescriptor {
                selector: selector.clone(),
                namespace: None,
            }),
            Scope::SelectorAndNamespace(selector, namespace) => Ok(ScopeDescriptor {
                selector: selector.clone(),
                namespace: some_label(namespace),
            }),
            Scope::Namespace(namespace) if !namespace.is_empty() => Ok(ScopeDescriptor {
                selector: key_selector(namespace.clone()),
                namespace: Some(namespace.clone()),
            }),
            Scope::Namespace(_) | Scope::Empty => {
                if mode.is_strict() {
                    Err(ConfigurationError::MissingScope)
                } else {
                    Ok(ScopeDescriptor::identity())
                }
            }
        }
    }
}

impl From<&str> for Scope {
    fn from(namespace: &str) -> Self {
        Scope::Namespace(namespace.to_string())
    }
}

impl From<String> for Scope {
    fn from(namespace: String) -> Self {
        Scope::Namespace(namespace)
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Selector(_) => f.write_str("Scope::Selector"),
            Scope::SelectorAndNamespace(_, namespace) => {
                write!(f, "Scope::SelectorAndNamespace({namespace:?})")
            }
            Scope::Namespace(namespace) => write!(f, "Scope::Namespace({namespace:?})"),
            Scope::Empty => f.write_str("Scope::Empty"),
        }
    }
}

/// Resolved `{ selector, namespace }` for one derivation.
#[derive(Clone)]
pub struct ScopeDescriptor {
    /// Projection from `(local_state, root_state)` to this node's substate.
    pub selector: Selector,
    /// Namespace label supplied at this level, if any.
    pub namespace: Option<String>,
}

impl ScopeDescriptor {
    /// Descriptor with an identity selector and no namespace.
    ///
    /// Used by the root wrap and as the permissive-mode fallback.
    pub fn identity() -> Self {
        Self {
            selector: Arc::new(|local, _| local.clone()),
            namespace: None,
        }
    }
}

impl fmt::Debug for ScopeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeDescriptor")
            .field("namespace", &self.namespace)
            .finish()
    }
}

fn some_label(namespace: &str) -> Option<String> {
    if namespace.is_empty() {
        None
    } else {
        Some(namespace.to_string())
    }
}

/// Selector reading a single key out of an object-shaped local state.
///
/// Missing keys and non-object states project to `Null` rather than
/// failing; a logically wrong key is the caller's responsibility.
fn key_selector(key: String) -> Selector {
    Arc::new(move |local, _| local.get(&key).cloned().unwrap_or(StateValue::Null))
}
