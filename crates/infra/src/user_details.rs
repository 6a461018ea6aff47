//! Authentication adapter and registration flow over the user directory.

use std::sync::Arc;

use shopgate_auth::{AuthError, NewUser, PasswordEncoder, Principal, RegisterUser, UserRecord};
use shopgate_core::DomainError;

use crate::user_store::{UserRepository, UserStoreError};

/// Reply for a successful registration.
pub const USER_REGISTERED: &str = "User registered successfully!";

/// Password hashed once at construction; unknown usernames are verified
/// against it.
const DUMMY_PASSWORD: &str = "userNotFoundPassword";

/// Loads principals by username, verifies Basic credentials and registers
/// new users.
///
/// bcrypt work runs on the blocking pool so it never stalls the async
/// executor. Unknown users and wrong passwords both cost one bcrypt verify.
#[derive(Clone)]
pub struct UserDetailsService {
    users: Arc<dyn UserRepository>,
    encoder: PasswordEncoder,
    dummy_hash: Arc<str>,
}

impl UserDetailsService {
    pub fn new(users: Arc<dyn UserRepository>, encoder: PasswordEncoder) -> Result<Self, AuthError> {
        let dummy_hash = encoder.encode(DUMMY_PASSWORD)?;
        Ok(Self {
            users,
            encoder,
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    pub fn users(&self) -> &Arc<dyn UserRepository> {
        &self.users
    }

    /// Principal for `username`, or `AuthError::UserNotFound`.
    pub async fn load_user_by_username(&self, username: &str) -> Result<Principal, AuthError> {
        match self.users.find_by_username(username).await.map_err(store_error)? {
            Some(record) => Ok(Principal::from(record)),
            None => Err(AuthError::UserNotFound(username.to_string())),
        }
    }

    /// Verify a username/password pair against the stored hash.
    ///
    /// Unknown users and wrong passwords both come back as
    /// `AuthError::BadCredentials`.
    pub async fn authenticate(&self, username: &str, raw_password: &str) -> Result<Principal, AuthError> {
        let principal = match self.load_user_by_username(username).await {
            Ok(p) => p,
            Err(AuthError::UserNotFound(name)) => {
                self.verify(raw_password, &self.dummy_hash).await?;
                tracing::debug!(username = %name, "authentication failed: unknown user");
                return Err(AuthError::BadCredentials);
            }
            Err(e) => return Err(e),
        };

        if self.verify(raw_password, principal.password_hash()).await? {
            Ok(principal)
        } else {
            tracing::debug!(username = %principal.username(), "authentication failed: password mismatch");
            Err(AuthError::BadCredentials)
        }
    }

    async fn verify(&self, raw_password: &str, hash: &str) -> Result<bool, AuthError> {
        let encoder = self.encoder;
        let raw = raw_password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || encoder.matches(&raw, &hash))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Hash the raw password and persist a new user row.
    ///
    /// No duplicate-username check: registering an existing name adds a second row.
    pub async fn register(&self, registration: RegisterUser) -> Result<UserRecord, AuthError> {
        let RegisterUser {
            username,
            password,
            email,
            authority,
        } = registration;

        let encoder = self.encoder;
        let password_hash = tokio::task::spawn_blocking(move || encoder.encode(&password))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))??;

        let record = self
            .users
            .insert(NewUser {
                username,
                password_hash,
                email,
                authority,
            })
            .await
            .map_err(store_error)?;

        tracing::info!(user_id = %record.id, username = %record.username, authority = %record.authority, "user registered");
        Ok(record)
    }
}

fn store_error(e: UserStoreError) -> AuthError {
    AuthError::Store(DomainError::from(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user_store::InMemoryUserRepository;
    use shopgate_auth::Authority;

    fn service() -> UserDetailsService {
        service_with_cost(4)
    }

    fn service_with_cost(cost: u32) -> UserDetailsService {
        UserDetailsService::new(
            Arc::new(InMemoryUserRepository::new()),
            PasswordEncoder::new(cost).unwrap(),
        )
        .unwrap()
    }

    fn registration(username: &str, password: &str, authority: &str) -> RegisterUser {
        RegisterUser {
            username: username.to_string(),
            password: password.to_string(),
            email: format!("{username}@example.com"),
            authority: authority.to_string(),
        }
    }

    #[tokio::test]
    async fn register_stores_a_hash_not_the_raw_password() {
        let svc = service();
        let record = svc.register(registration("alice", "pw", "ROLE_USER")).await.unwrap();
        assert_ne!(record.password_hash, "pw");
        assert!(record.password_hash.starts_with("$2"));
    }

    #[tokio::test]
    async fn load_user_exposes_authorities() {
        let svc = service();
        svc.register(registration("admin", "pw", "ROLE_USER,ROLE_ADMIN"))
            .await
            .unwrap();

        let principal = svc.load_user_by_username("admin").await.unwrap();
        assert_eq!(principal.username(), "admin");
        assert!(principal.has_authority(&Authority::new("ROLE_ADMIN")));
        assert!(principal.has_authority(&Authority::new("ROLE_USER")));
    }

    #[tokio::test]
    async fn load_unknown_user_is_user_not_found() {
        let svc = service();
        let err = svc.load_user_by_username("ghost").await.unwrap_err();
        assert_eq!(err, AuthError::UserNotFound("ghost".to_string()));
    }

    #[tokio::test]
    async fn authenticate_accepts_the_registered_password_only() {
        let svc = service();
        svc.register(registration("bob", "correct", "ROLE_USER")).await.unwrap();

        assert!(svc.authenticate("bob", "correct").await.is_ok());
        assert_eq!(
            svc.authenticate("bob", "wrong").await.unwrap_err(),
            AuthError::BadCredentials
        );
    }

    #[tokio::test]
    async fn authenticate_hides_unknown_users() {
        let svc = service();
        assert_eq!(
            svc.authenticate("ghost", "pw").await.unwrap_err(),
            AuthError::BadCredentials
        );
    }

    // Known defect kept on purpose: usernames are not unique.
    #[tokio::test]
    async fn registering_twice_creates_two_records() {
        let svc = service();
        let first = svc.register(registration("twin", "one", "ROLE_USER")).await.unwrap();
        let second = svc.register(registration("twin", "two", "ROLE_ADMIN")).await.unwrap();
        assert_ne!(first.id, second.id);

        let rows = svc.users().find_all_by_username("twin").await.unwrap();
        assert_eq!(rows.len(), 2);

        // Lookups resolve to the first row, so only its password works.
        assert!(svc.authenticate("twin", "one").await.is_ok());
        assert_eq!(
            svc.authenticate("twin", "two").await.unwrap_err(),
            AuthError::BadCredentials
        );
    }

    #[tokio::test]
    async fn dummy_hash_uses_the_configured_cost() {
        let svc = service_with_cost(5);
        assert!(svc.dummy_hash.starts_with("$2b$05$"));
    }

    #[tokio::test]
    async fn unknown_users_cost_as_much_as_wrong_passwords() {
        let svc = service_with_cost(10);
        svc.register(registration("alice", "right", "ROLE_USER")).await.unwrap();

        let started = std::time::Instant::now();
        assert!(svc.authenticate("alice", "wrong").await.is_err());
        let known = started.elapsed();

        let started = std::time::Instant::now();
        assert!(svc.authenticate("ghost", "wrong").await.is_err());
        let unknown = started.elapsed();

        // Both paths run one bcrypt verify at the same cost; allow generous jitter.
        assert!(
            unknown * 4 > known,
            "known-user={known:?} unknown-user={unknown:?}"
        );
    }

    #[tokio::test]
    async fn store_failures_surface_as_storage_errors() {
        let err = store_error(UserStoreError::Unavailable("down".to_string()));
        assert!(matches!(err, AuthError::Store(DomainError::Storage(msg)) if msg.contains("down")));
    }
}
