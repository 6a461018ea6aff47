//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Failures the services can report to callers. Authentication and
/// authorization failures live in `shopgate-auth`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The backing store failed.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
