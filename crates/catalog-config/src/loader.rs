//! Configuration loader with layered sources.

use crate::{AppConfig, DatabaseBackend};
use catalog_core::CatalogError;
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Environment variable selecting the configuration environment.
pub const ENVIRONMENT_VAR: &str = "CATALOG_ENVIRONMENT";

/// Upper bound accepted for `cache.products_ttl_secs` (one year).
pub const MAX_PRODUCTS_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `CATALOG__` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, CatalogError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, CatalogError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), CatalogError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, CatalogError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("CATALOG")
                .separator("__")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_catalog_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Validates the configuration.
    pub fn validate_config(config: &AppConfig) -> Result<(), CatalogError> {
        if config.database.backend == DatabaseBackend::Mysql && config.database.url.is_empty() {
            return Err(CatalogError::Configuration(
                "Database URL is required for the mysql backend".to_string(),
            ));
        }

        if config.redis.enabled && config.redis.url.is_empty() {
            return Err(CatalogError::Configuration(
                "Redis URL is required when Redis is enabled".to_string(),
            ));
        }

        if config.cache.products_ttl_secs == 0 {
            return Err(CatalogError::Configuration(
                "cache.products_ttl_secs must be greater than zero".to_string(),
            ));
        }

        if config.cache.products_ttl_secs > MAX_PRODUCTS_TTL_SECS {
            return Err(CatalogError::Configuration(format!(
                "cache.products_ttl_secs must not exceed {}",
                MAX_PRODUCTS_TTL_SECS
            )));
        }

        if config.database.backend == DatabaseBackend::Memory && config.database.seed_products.is_empty() {
            warn!("In-memory product store has no seed products");
        }

        if config.processing.max_concurrency == 0 {
            warn!("Product processing concurrency is unbounded");
        }

        Ok(())
    }

    /// Gets a specific configuration value by key path.
    pub async fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let config = self.config.read().await;
        let json = serde_json::to_value(&*config).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }
}

fn config_error_to_catalog_error(err: ConfigError) -> CatalogError {
    CatalogError::Configuration(err.to_string())
}
