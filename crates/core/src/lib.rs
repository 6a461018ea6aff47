//! `shopgate-core`: shared building blocks for the shopgate crates.
//!
//! Pure types only (no IO, no HTTP).

pub mod error;
pub mod id;

pub use error::DomainError;
pub use id::UserId;
