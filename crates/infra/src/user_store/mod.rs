//! User directory storage.
//!
//! A deliberately small data-access interface over the `users` table: insert
//! and lookup by username. No uniqueness is enforced on `username`.

pub mod in_memory;
pub mod sqlite;

use std::sync::Arc;

use thiserror::Error;

use shopgate_auth::{NewUser, UserRecord};
use shopgate_core::DomainError;

pub use in_memory::InMemoryUserRepository;
pub use sqlite::SqliteUserRepository;

#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("user store unavailable: {0}")]
    Unavailable(String),

    #[error("database error in {operation}: {message}")]
    Database { operation: &'static str, message: String },

    #[error("corrupt user row: {0}")]
    CorruptRow(String),
}

impl From<UserStoreError> for DomainError {
    fn from(err: UserStoreError) -> Self {
        DomainError::storage(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new row; the store assigns the id.
    async fn insert(&self, user: NewUser) -> Result<UserRecord, UserStoreError>;

    /// Row with this username. When several rows share it, the lowest id wins.
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, UserStoreError>;

    /// Every row with this username, ordered by id.
    async fn find_all_by_username(&self, username: &str) -> Result<Vec<UserRecord>, UserStoreError>;
}

#[async_trait::async_trait]
impl<S> UserRepository for Arc<S>
where
    S: UserRepository + ?Sized,
{
    async fn insert(&self, user: NewUser) -> Result<UserRecord, UserStoreError> {
        (**self).insert(user).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, UserStoreError> {
        (**self).find_by_username(username).await
    }

    async fn find_all_by_username(&self, username: &str) -> Result<Vec<UserRecord>, UserStoreError> {
        (**self).find_all_by_username(username).await
    }
}
