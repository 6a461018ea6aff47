//! Infrastructure layer: user storage, authentication adapter, configuration.

pub mod config;
pub mod user_details;
pub mod user_store;

pub use config::{ConfigLoader, ShopgateConfig};
pub use user_details::{USER_REGISTERED, UserDetailsService};
pub use user_store::{InMemoryUserRepository, SqliteUserRepository, UserRepository, UserStoreError};
