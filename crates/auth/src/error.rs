use thiserror::Error;

use shopgate_core::DomainError;

/// Authentication failures.
///
/// `UserNotFound` exists for callers that need to tell the cases apart
/// internally; on the wire it is reported as bad credentials.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("user '{0}' not found")]
    UserNotFound(String),

    #[error("bad credentials")]
    BadCredentials,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("user store failure: {0}")]
    Store(#[from] DomainError),
}
