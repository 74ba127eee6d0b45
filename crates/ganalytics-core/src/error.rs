//! Accessor error types.

use thiserror::Error;

/// Error returned when a named accessor cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessorError {
    /// A method-style accessor did not start with `get`.
    #[error("no such function \"{0}\"")]
    NoSuchFunction(String),
    /// The normalized name does not exist on the entry or result.
    #[error("no valid {kind} called \"{name}\"")]
    UnknownName {
        /// What was searched, e.g. "metric or dimension".
        kind: &'static str,
        /// The normalized name that was requested.
        name: String,
    },
}

impl AccessorError {
    /// Create an unknown-name error.
    pub fn unknown(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownName {
            kind,
            name: name.into(),
        }
    }

    /// The name that failed to resolve.
    pub fn name(&self) -> &str {
        match self {
            Self::NoSuchFunction(name) | Self::UnknownName { name, .. } => name,
        }
    }
}
