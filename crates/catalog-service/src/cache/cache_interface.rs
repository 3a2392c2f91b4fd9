//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use catalog_core::CatalogResult;
use std::time::Duration;

/// Cache interface for storing and retrieving cached data.
///
/// Values are opaque strings; callers own the encoding. Entries expire at an
/// absolute point in time computed when they are written.
#[async_trait]
pub trait CacheInterface: Send + Sync {
    /// Get a raw value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>>;

    /// Set a raw value in the cache, expiring `ttl` from now.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CatalogResult<()>;

    /// Name of the backing store, for logs.
    fn backend(&self) -> &'static str;
}
