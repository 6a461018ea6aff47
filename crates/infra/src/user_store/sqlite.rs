//! SQLite-backed user table.

use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use shopgate_auth::{NewUser, UserRecord};
use shopgate_core::UserId;

use super::{UserRepository, UserStoreError};

/// User directory persisted in a `users` table.
///
/// ## Schema
///
/// `users(id INTEGER PRIMARY KEY AUTOINCREMENT, username, password, email, authority)`.
/// `username` is indexed but not unique.
#[derive(Debug, Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Wrap an existing pool. Call [`SqliteUserRepository::migrate`] before use.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (or create) the database at `database_url` and ensure the schema.
    ///
    /// `sqlite::memory:` keeps a single long-lived connection so every query
    /// sees the same database.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid sqlite url '{database_url}'"))?
            .create_if_missing(true);

        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open user database at '{database_url}'"))?;

        let repo = Self::new(pool);
        repo.migrate().await?;
        Ok(repo)
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                username  TEXT NOT NULL,
                password  TEXT NOT NULL,
                email     TEXT NOT NULL DEFAULT '',
                authority TEXT NOT NULL DEFAULT ''
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("failed to create users table")?;

        sqlx::query("CREATE INDEX IF NOT EXISTS users_username_idx ON users (username)")
            .execute(&self.pool)
            .await
            .context("failed to create users.username index")?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl UserRepository for SqliteUserRepository {
    async fn insert(&self, user: NewUser) -> Result<UserRecord, UserStoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password, email, authority)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(&user.authority)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_user", e))?;

        Ok(UserRecord {
            id: UserId::from_i64(result.last_insert_rowid()),
            username: user.username,
            password_hash: user.password_hash,
            email: user.email,
            authority: user.authority,
        })
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, UserStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password, email, authority
            FROM users
            WHERE username = ?1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_user_by_username", e))?;

        row.map(|r| row_to_record(&r)).transpose()
    }

    async fn find_all_by_username(&self, username: &str) -> Result<Vec<UserRecord>, UserStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, password, email, authority
            FROM users
            WHERE username = ?1
            ORDER BY id
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all_users_by_username", e))?;

        rows.iter().map(row_to_record).collect()
    }
}

fn row_to_record(row: &SqliteRow) -> Result<UserRecord, UserStoreError> {
    let corrupt = |e: sqlx::Error| UserStoreError::CorruptRow(e.to_string());
    Ok(UserRecord {
        id: UserId::from_i64(row.try_get("id").map_err(corrupt)?),
        username: row.try_get("username").map_err(corrupt)?,
        password_hash: row.try_get("password").map_err(corrupt)?,
        email: row.try_get("email").map_err(corrupt)?,
        authority: row.try_get("authority").map_err(corrupt)?,
    })
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> UserStoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            UserStoreError::Unavailable(format!("{operation}: {err}"))
        }
        sqlx::Error::Database(db_err) => UserStoreError::Database {
            operation,
            message: db_err.message().to_string(),
        },
        other => UserStoreError::Database {
            operation,
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> SqliteUserRepository {
        SqliteUserRepository::connect("sqlite::memory:").await.unwrap()
    }

    fn new_user(username: &str, authority: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "$2b$04$hash".to_string(),
            email: format!("{username}@example.com"),
            authority: authority.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_then_find_round_trips_all_columns() {
        let repo = repo().await;
        let inserted = repo.insert(new_user("alice", "ROLE_USER,ROLE_ADMIN")).await.unwrap();

        let found = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found, inserted);
        assert_eq!(found.email, "alice@example.com");
        assert_eq!(found.authority, "ROLE_USER,ROLE_ADMIN");
    }

    #[tokio::test]
    async fn missing_user_is_none() {
        let repo = repo().await;
        assert!(repo.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_usernames_create_two_rows() {
        let repo = repo().await;
        let first = repo.insert(new_user("dup", "ROLE_USER")).await.unwrap();
        let second = repo.insert(new_user("dup", "ROLE_ADMIN")).await.unwrap();
        assert!(second.id > first.id);

        let all = repo.find_all_by_username("dup").await.unwrap();
        assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), vec![first.id, second.id]);

        let found = repo.find_by_username("dup").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
    }

    #[tokio::test]
    async fn migrate_is_idempotent() {
        let repo = repo().await;
        repo.insert(new_user("kept", "")).await.unwrap();
        repo.migrate().await.unwrap();
        assert!(repo.find_by_username("kept").await.unwrap().is_some());
    }
}
