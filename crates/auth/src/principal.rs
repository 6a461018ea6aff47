use shopgate_core::UserId;

use crate::roles::{Authority, AuthoritySet};
use crate::user::UserRecord;

/// An identity loaded for authentication and authorization decisions.
///
/// Built from a stored user row; exposes the credentials needed to verify a
/// login and the authorities the rule chain matches against.
#[derive(Clone, PartialEq, Eq)]
pub struct Principal {
    user_id: UserId,
    username: String,
    password_hash: String,
    authorities: AuthoritySet,
}

impl Principal {
    pub fn new(
        user_id: UserId,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        authorities: AuthoritySet,
    ) -> Self {
        Self {
            user_id,
            username: username.into(),
            password_hash: password_hash.into(),
            authorities,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn authorities(&self) -> &AuthoritySet {
        &self.authorities
    }

    pub fn has_authority(&self, authority: &Authority) -> bool {
        self.authorities.contains(authority)
    }
}

impl From<UserRecord> for Principal {
    fn from(record: UserRecord) -> Self {
        let authorities = record.authorities();
        Self {
            user_id: record.id,
            username: record.username,
            password_hash: record.password_hash,
            authorities,
        }
    }
}

impl core::fmt::Debug for Principal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Principal")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("authorities", &self.authorities)
            .finish_non_exhaustive()
    }
}
