//! Error types for subspace construction

use thiserror::Error;

/// Construction-time configuration error.
///
/// Raised synchronously by the derivation entry points, never by
/// `dispatch`/`get_state`. These are programmer-input errors and are
/// surfaced directly to the caller; the engine never catches or retries
/// them internally. In permissive mode the check is elided and construction
/// proceeds with safe fallbacks instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Neither a selector nor a namespace could be resolved from the
    /// derivation arguments.
    #[error("selector and/or namespace must be defined")]
    MissingScope,
}

/// Result type using ConfigurationError
pub type Result<T> = std::result::Result<T, ConfigurationError>;
