//! Configuration loading and representation.
//!
//! Sources are merged in order, later ones overriding earlier ones:
//! 1. built-in defaults
//! 2. a TOML file (explicit path, `SHOPGATE_CONFIG`, or `./shopgate.toml`)
//! 3. environment variables prefixed `SHOPGATE_` (e.g. `SHOPGATE_BIND_ADDR`)

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use shopgate_auth::password::{DEFAULT_COST, MAX_COST, MIN_COST};

pub const ENV_PREFIX: &str = "SHOPGATE_";
pub const CONFIG_PATH_ENV: &str = "SHOPGATE_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "shopgate.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopgateConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: String,
    /// sqlx SQLite URL for the user table.
    pub database_url: String,
    /// bcrypt cost factor for newly registered passwords.
    pub bcrypt_cost: u32,
    /// Realm announced in `WWW-Authenticate` challenges.
    pub realm: String,
}

impl Default for ShopgateConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            database_url: "sqlite::memory:".to_string(),
            bcrypt_cost: DEFAULT_COST,
            realm: "shopgate".to_string(),
        }
    }
}

impl ShopgateConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        self.bind_addr
            .parse()
            .with_context(|| format!("invalid bind_addr '{}'", self.bind_addr))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.socket_addr()?;
        if !(MIN_COST..=MAX_COST).contains(&self.bcrypt_cost) {
            bail!(
                "bcrypt_cost {} outside {}..={}",
                self.bcrypt_cost,
                MIN_COST,
                MAX_COST
            );
        }
        if self.database_url.trim().is_empty() {
            bail!("database_url must not be empty");
        }
        if self.realm.contains('"') {
            bail!("realm must not contain '\"'");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn load(&self) -> anyhow::Result<ShopgateConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(ShopgateConfig::default()));

        match self.resolve_config_path() {
            Some(path) if path.exists() => {
                tracing::info!(path = %path.display(), "loading configuration file");
                figment = figment.merge(Toml::file(&path));
            }
            Some(path) => {
                tracing::warn!(path = %path.display(), "configuration file not found, using defaults");
            }
            None => {}
        }

        extract(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    fn resolve_config_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config_path {
            return Some(path.clone());
        }
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        let default = PathBuf::from(DEFAULT_CONFIG_FILE);
        default.exists().then_some(default)
    }
}

fn extract(figment: Figment) -> anyhow::Result<ShopgateConfig> {
    let config: ShopgateConfig = figment
        .extract()
        .context("failed to extract configuration")?;
    config.validate()?;
    Ok(config)
}
