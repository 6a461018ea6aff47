//! User records as stored by the user directory.

use serde::{Deserialize, Serialize};

use shopgate_core::UserId;

use crate::roles::AuthoritySet;

/// A persisted user row.
///
/// `username` is intended to be unique, but nothing enforces it: two rows may
/// share a username, and lookups then resolve to the lowest id.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    /// bcrypt hash (modular crypt format, `$2b$...`).
    pub password_hash: String,
    pub email: String,
    /// Comma-separated authority list, e.g. `"ROLE_USER,ROLE_ADMIN"`.
    pub authority: String,
}

impl UserRecord {
    pub fn authorities(&self) -> AuthoritySet {
        AuthoritySet::parse(&self.authority)
    }
}

impl core::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("email", &self.email)
            .field("authority", &self.authority)
            .finish()
    }
}

/// Row to insert; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub authority: String,
}

/// Registration input carrying the raw (unhashed) password.
#[derive(Clone)]
pub struct RegisterUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub authority: String,
}

impl core::fmt::Debug for RegisterUser {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegisterUser")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("email", &self.email)
            .field("authority", &self.authority)
            .finish()
    }
}
