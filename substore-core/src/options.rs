//! Derivation options and the extension pipeline
//!
//! Options travel down the derivation chain: a node resolves its effective
//! options once (explicitly supplied, or inherited from the nearest ancestor
//! that carried any) and stores them on the container it produces, so deeper
//! descendants inherit without re-specifying.

use crate::store::StateContainer;
use std::fmt;
use std::sync::Arc;

/// A factory producing a derived container from a parent.
///
/// This is the shape of the base derivation step with the scope already
/// resolved. Extensions receive it, may call it (recursively, if they like),
/// and return a factory of the same shape.
pub type SubspaceFactory =
    Arc<dyn Fn(Arc<dyn StateContainer>) -> Arc<dyn StateContainer> + Send + Sync>;

/// A composition hook augmenting the derivation pipeline.
///
/// An extension receives the bare factory and returns a replacement. The
/// usual move is to call the base factory and wrap its output in a container
/// that delegates most operations and overrides a few:
///
/// ```
/// use std::sync::Arc;
/// use substore_core::{Extension, SubspaceFactory};
///
/// let passthrough = Extension::new(|base: SubspaceFactory| base);
/// ```
///
/// Extensions compose by ordinary function application at construction time,
/// keeping the derivation pipeline linear and inspectable.
#[derive(Clone)]
pub struct Extension {
    wrap: Arc<dyn Fn(SubspaceFactory) -> SubspaceFactory + Send + Sync>,
}

impl Extension {
    /// Create an extension from a factory-wrapping function.
    pub fn new(wrap: impl Fn(SubspaceFactory) -> SubspaceFactory + Send + Sync + 'static) -> Self {
        Self {
            wrap: Arc::new(wrap),
        }
    }

    /// Apply this extension to a base factory.
    pub fn apply(&self, base: SubspaceFactory) -> SubspaceFactory {
        (*self.wrap)(base)
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Extension")
    }
}

/// Options resolved for a derivation, inheritable down the chain.
#[derive(Debug, Clone, Default)]
pub struct SubspaceOptions {
    /// Extension applied to every derivation made with these options.
    pub extension: Option<Extension>,
}

impl SubspaceOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create options carrying an extension.
    pub fn with_extension(extension: Extension) -> Self {
        Self {
            extension: Some(extension),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_extension() {
        let extension = Extension::new(|base: SubspaceFactory| base);
        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));

        let calls_in_factory = calls.clone();
        let base: SubspaceFactory = Arc::new(move |parent| {
            calls_in_factory.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            parent
        });

        let wrapped = extension.apply(base);
        let store: Arc<dyn StateContainer> = Arc::new(crate::store::LocalStore::new(
            Arc::new(|state, _| state.clone()),
            serde_json::Value::Null,
        ));
        let _ = (*wrapped)(store);

        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn test_default_options_carry_no_extension() {
        assert!(SubspaceOptions::new().extension.is_none());
    }
}
