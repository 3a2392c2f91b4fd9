//! Component wiring.
//!
//! Every collaborator is built up front and handed to its consumer through
//! a constructor, so a running service never holds a missing dependency.

use catalog_config::{AppConfig, DatabaseBackend, DatabaseConfig, RedisConfig};
use catalog_core::{CatalogResult, HealthCheck};
use catalog_repository::{
    create_pool, DatabasePool, InMemoryProductRepository, MySqlProductRepository,
    ProductRepository,
};
use catalog_rest::AppState;
use catalog_service::{
    CacheInterface, MemoryCacheService, ProductService, ProductServiceImpl, ProductServiceOptions,
    RedisCacheService,
};
use std::sync::Arc;
use tracing::info;

/// Fully built application components.
pub struct AppComponents {
    pub product_service: Arc<dyn ProductService>,
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
    /// Present only for the MySQL backend; closed on shutdown.
    pub database_pool: Option<Arc<DatabasePool>>,
}

impl AppComponents {
    /// Converts the components into REST handler state.
    #[must_use]
    pub fn app_state(&self) -> AppState {
        AppState::new(self.product_service.clone(), self.health_checks.clone())
    }
}

/// Product repository plus the pool behind it, if any.
pub struct RepositoryParts {
    pub repository: Arc<dyn ProductRepository>,
    pub pool: Option<Arc<DatabasePool>>,
}

/// Builds the product repository for the configured backend.
pub async fn build_repository(config: &DatabaseConfig) -> CatalogResult<RepositoryParts> {
    match config.backend {
        DatabaseBackend::Mysql => {
            let pool = create_pool(config).await?;
            if config.run_migrations {
                pool.run_migrations().await?;
            }
            Ok(RepositoryParts {
                repository: Arc::new(MySqlProductRepository::new(pool.clone())),
                pool: Some(pool),
            })
        }
        DatabaseBackend::Memory => {
            info!(
                "Using in-memory product store with {} seed products",
                config.seed_products.len()
            );
            Ok(RepositoryParts {
                repository: Arc::new(InMemoryProductRepository::new(
                    config.seed_products.clone(),
                )),
                pool: None,
            })
        }
    }
}

/// Builds the cache, returning it both as a cache and as a health check.
pub fn build_cache(
    config: &RedisConfig,
) -> CatalogResult<(Arc<dyn CacheInterface>, Arc<dyn HealthCheck>)> {
    if config.enabled {
        let redis = Arc::new(RedisCacheService::from_config(config)?);
        info!("Using Redis product cache at {}", config.url);
        let cache: Arc<dyn CacheInterface> = redis.clone();
        let health: Arc<dyn HealthCheck> = redis;
        Ok((cache, health))
    } else {
        let memory = Arc::new(MemoryCacheService::new());
        info!("Redis disabled, using in-process product cache");
        let cache: Arc<dyn CacheInterface> = memory.clone();
        let health: Arc<dyn HealthCheck> = memory;
        Ok((cache, health))
    }
}

/// Builds every component the server needs from configuration.
pub async fn build_components(config: &AppConfig) -> CatalogResult<AppComponents> {
    let RepositoryParts { repository, pool } = build_repository(&config.database).await?;
    let (cache, cache_health) = build_cache(&config.redis)?;

    let options = ProductServiceOptions::from_config(&config.cache, &config.processing);
    let product_service: Arc<dyn ProductService> =
        Arc::new(ProductServiceImpl::new(repository, cache, options));

    let mut health_checks: Vec<Arc<dyn HealthCheck>> = Vec::new();
    if let Some(pool) = &pool {
        let check: Arc<dyn HealthCheck> = pool.clone();
        health_checks.push(check);
    }
    health_checks.push(cache_health);

    Ok(AppComponents {
        product_service,
        health_checks,
        database_pool: pool,
    })
}
