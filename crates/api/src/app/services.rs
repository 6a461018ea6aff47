use std::sync::Arc;

use anyhow::Context;

use shopgate_auth::PasswordEncoder;
use shopgate_infra::{
    InMemoryUserRepository, ShopgateConfig, SqliteUserRepository, UserDetailsService, UserRepository,
};
use shopgate_products::ProductCatalog;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppServices {
    pub products: Arc<ProductCatalog>,
    pub users: UserDetailsService,
    /// Realm announced in Basic challenges.
    pub realm: Arc<str>,
}

impl AppServices {
    pub fn new(products: Arc<ProductCatalog>, users: UserDetailsService, realm: &str) -> Self {
        Self {
            products,
            users,
            realm: Arc::from(realm),
        }
    }
}

/// Services backed by the SQLite user table named in `config`.
pub async fn build_services(config: &ShopgateConfig) -> anyhow::Result<AppServices> {
    let encoder = PasswordEncoder::new(config.bcrypt_cost).context("invalid bcrypt cost")?;
    let repo = SqliteUserRepository::connect(&config.database_url).await?;
    tracing::info!(database_url = %config.database_url, "user store ready");

    let users: Arc<dyn UserRepository> = Arc::new(repo);
    let users = UserDetailsService::new(users, encoder).context("failed to prepare password verifier")?;
    Ok(AppServices::new(Arc::new(ProductCatalog::new()), users, &config.realm))
}

/// Services with an in-memory user directory (tests, local runs).
pub fn build_in_memory_services(encoder: PasswordEncoder, realm: &str) -> anyhow::Result<AppServices> {
    let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
    let users = UserDetailsService::new(users, encoder).context("failed to prepare password verifier")?;
    Ok(AppServices::new(Arc::new(ProductCatalog::new()), users, realm))
}
