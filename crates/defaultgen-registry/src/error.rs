//! Errors raised while populating a registry.

use thiserror::Error;

/// A scope or member that cannot be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Namespace node vanished between creation and use.
    #[error("invalid namespace")]
    InvalidNamespace,

    #[error("duplicate scope: {0}")]
    DuplicateScope(String),

    #[error("scope not found: {0}")]
    ScopeNotFound(String),

    #[error("duplicate field '{field}' in scope '{scope}'")]
    DuplicateField { scope: String, field: String },
}
