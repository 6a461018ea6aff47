use std::sync::RwLock;

use shopgate_auth::{NewUser, UserRecord};
use shopgate_core::UserId;

use super::{UserRepository, UserStoreError};

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: Vec<UserRecord>,
}

/// In-memory user table for tests/dev.
///
/// Ids start at 1 and increase by one per insert, like an auto-increment key.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    inner: RwLock<Table>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|t| t.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> Result<UserRecord, UserStoreError> {
        let mut table = self
            .inner
            .write()
            .map_err(|_| UserStoreError::Unavailable("user table lock poisoned".to_string()))?;

        table.next_id += 1;
        let record = UserRecord {
            id: UserId::from_i64(table.next_id),
            username: user.username,
            password_hash: user.password_hash,
            email: user.email,
            authority: user.authority,
        };
        table.rows.push(record.clone());
        Ok(record)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, UserStoreError> {
        let table = self
            .inner
            .read()
            .map_err(|_| UserStoreError::Unavailable("user table lock poisoned".to_string()))?;

        // Rows are appended in id order, so the first hit has the lowest id.
        Ok(table.rows.iter().find(|r| r.username == username).cloned())
    }

    async fn find_all_by_username(&self, username: &str) -> Result<Vec<UserRecord>, UserStoreError> {
        let table = self
            .inner
            .read()
            .map_err(|_| UserStoreError::Unavailable("user table lock poisoned".to_string()))?;

        Ok(table
            .rows
            .iter()
            .filter(|r| r.username == username)
            .cloned()
            .collect())
    }
}
