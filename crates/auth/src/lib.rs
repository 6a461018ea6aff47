//! `shopgate-auth`: authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: the API layer
//! maps requests onto [`Method`] + path and user rows onto [`Principal`].

pub mod access;
pub mod authorize;
pub mod error;
pub mod password;
pub mod principal;
pub mod roles;
pub mod user;

pub use access::{AccessRule, AccessRules, AccessRulesBuilder, Method, PathPattern, default_rules};
pub use authorize::{AccessDenied, Requirement, authorize};
pub use error::AuthError;
pub use password::PasswordEncoder;
pub use principal::Principal;
pub use roles::{Authority, AuthoritySet};
pub use user::{NewUser, RegisterUser, UserRecord};
