//! Shared types for substore
//!
//! This crate provides the common types used across the substore ecosystem:
//! the event envelope dispatched through containers, the role tags assigned
//! to derived containers, and the validation mode flag.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Dynamic state representation shared by all containers.
///
/// The engine never interprets state beyond handing it to selectors, so a
/// dynamic JSON value is sufficient and keeps derived views shape-agnostic.
pub type StateValue = Value;

/// An event flowing through a container chain.
///
/// Events are immutable messages with a `kind` routing tag and an arbitrary
/// payload. The scoping layer only ever reads or rewrites the leading
/// namespace segment of `kind`; payload fields pass through untouched.
///
/// On the wire an event serializes as `{ "kind": ..., ...payload }`, with
/// the payload flattened next to the tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Routing tag, optionally prefixed with a `/`-joined namespace path.
    pub kind: String,

    /// Payload fields, flattened next to `kind` when serialized.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Event {
    /// Create an event with the given kind and an empty payload.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: Map::new(),
        }
    }

    /// Return a copy of this event with an extra payload field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Return a copy of this event under a different kind.
    ///
    /// The payload is carried over unchanged. This is the primitive the
    /// namespace layer uses for tagging and un-tagging.
    pub fn with_kind(&self, kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: self.payload.clone(),
        }
    }

    /// Look up a payload field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// Classification of a derived container's position in the chain.
///
/// Every derived container carries an ordered set of roles so downstream
/// coordination code can tell in O(1) whether a node introduces a namespace
/// boundary without walking the ancestor chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// The first wrapping of a true (underived) root container.
    Root,
    /// A node that introduces a namespace boundary.
    NamespaceRoot,
    /// Any node derived from an already-derived container.
    Child,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Root => write!(f, "ROOT"),
            Role::NamespaceRoot => write!(f, "NAMESPACE_ROOT"),
            Role::Child => write!(f, "CHILD"),
        }
    }
}

/// Whether construction-time argument validation is enforced.
///
/// Strict mode surfaces configuration mistakes immediately; permissive mode
/// skips the checks and falls back to safe defaults (identity selector,
/// empty namespace). The default follows the build profile so debug builds
/// validate and release builds elide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Reject unresolvable scope arguments with a configuration error.
    Strict,
    /// Skip validation and construct with safe fallbacks.
    Permissive,
}

impl ValidationMode {
    /// Check whether this mode enforces validation.
    pub fn is_strict(&self) -> bool {
        matches!(self, ValidationMode::Strict)
    }
}

impl Default for ValidationMode {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            ValidationMode::Strict
        } else {
            ValidationMode::Permissive
        }
    }
}
