//! Product service implementation.

use crate::cache::{cache_keys::PRODUCTS_CACHE_KEY, CacheInterface};
use crate::dto::{ProcessedProduct, ProductSummary};
use crate::product_service::ProductService;
use async_trait::async_trait;
use catalog_config::{CacheConfig, ProcessingConfig};
use catalog_core::{CatalogError, CatalogResult, Product};
use catalog_repository::ProductRepository;
use futures::future::try_join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// Tunables for [`ProductServiceImpl`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductServiceOptions {
    /// Absolute expiration of the cached product list.
    pub products_ttl: Duration,
    /// Artificial delay spent on each processed product.
    pub item_delay: Duration,
    /// Cap on products processed at once across all requests. Zero disables the cap.
    pub max_concurrency: usize,
}

impl Default for ProductServiceOptions {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default(), &ProcessingConfig::default())
    }
}

impl ProductServiceOptions {
    /// Builds options from the cache and processing configuration sections.
    #[must_use]
    pub fn from_config(cache: &CacheConfig, processing: &ProcessingConfig) -> Self {
        Self {
            products_ttl: cache.products_ttl(),
            item_delay: processing.item_delay(),
            max_concurrency: processing.max_concurrency,
        }
    }
}

/// Product service backed by a repository and a cache.
pub struct ProductServiceImpl {
    repository: Arc<dyn ProductRepository>,
    cache: Arc<dyn CacheInterface>,
    options: ProductServiceOptions,
    limiter: Option<Semaphore>,
}

impl ProductServiceImpl {
    /// Creates a new product service. Every collaborator is required.
    pub fn new(
        repository: Arc<dyn ProductRepository>,
        cache: Arc<dyn CacheInterface>,
        options: ProductServiceOptions,
    ) -> Self {
        let limiter = (options.max_concurrency > 0).then(|| Semaphore::new(options.max_concurrency));

        Self {
            repository,
            cache,
            options,
            limiter,
        }
    }

    async fn process_product(&self, product: &Product) -> CatalogResult<ProcessedProduct> {
        let _permit = match &self.limiter {
            Some(limiter) => Some(
                limiter
                    .acquire()
                    .await
                    .map_err(|e| CatalogError::internal(format!("Processing limiter closed: {}", e)))?,
            ),
            None => None,
        };

        tokio::time::sleep(self.options.item_delay).await;
        ProcessedProduct::try_from(product)
    }
}

#[async_trait]
impl ProductService for ProductServiceImpl {
    async fn list_cached(&self) -> CatalogResult<Vec<ProductSummary>> {
        let payload = match self.cache.get_raw(PRODUCTS_CACHE_KEY).await? {
            Some(cached) => {
                debug!(backend = self.cache.backend(), "Serving product list from cache");
                cached
            }
            None => {
                let products = self.repository.get_products().await?;
                let summaries: Vec<ProductSummary> =
                    products.iter().map(ProductSummary::from).collect();
                let payload = serde_json::to_string(&summaries)?;

                self.cache
                    .set_raw(PRODUCTS_CACHE_KEY, &payload, self.options.products_ttl)
                    .await?;

                info!(
                    backend = self.cache.backend(),
                    count = summaries.len(),
                    ttl_secs = self.options.products_ttl.as_secs(),
                    "Product list cached"
                );
                payload
            }
        };

        Ok(serde_json::from_str(&payload)?)
    }

    async fn list_processed(&self) -> CatalogResult<Vec<ProcessedProduct>> {
        let products = self.repository.get_products().await?;
        debug!(count = products.len(), "Processing products");

        let processed = try_join_all(products.iter().map(|p| self.process_product(p))).await?;

        info!(count = processed.len(), "Products processed");
        Ok(processed)
    }
}

impl std::fmt::Debug for ProductServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductServiceImpl")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheService;
    use mockall::mock;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio::time::Instant;

    mock! {
        pub Repo {}

        #[async_trait]
        impl ProductRepository for Repo {
            async fn get_products(&self) -> CatalogResult<Vec<Product>>;
        }
    }

    /// Cache double that records every write.
    #[derive(Default)]
    struct RecordingCache {
        entries: Mutex<HashMap<String, String>>,
        writes: Mutex<Vec<(String, Duration)>>,
        fail_get: bool,
        fail_set: bool,
    }

    impl RecordingCache {
        fn with_entry(key: &str, value: &str) -> Self {
            let cache = Self::default();
            cache
                .entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            cache
        }

        fn writes(&self) -> Vec<(String, Duration)> {
            self.writes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CacheInterface for RecordingCache {
        async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>> {
            if self.fail_get {
                return Err(CatalogError::Cache("connection refused".to_string()));
            }
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CatalogResult<()> {
            if self.fail_set {
                return Err(CatalogError::Cache("read-only replica".to_string()));
            }
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            self.writes.lock().unwrap().push((key.to_string(), ttl));
            Ok(())
        }

        fn backend(&self) -> &'static str {
            "recording"
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "pen", 10.0),
            Product::new(2, "notebook", 3.5),
            Product::new(3, "stapler", 7.25),
        ]
    }

    fn repo_returning(products: Vec<Product>, times: usize) -> MockRepo {
        let mut repo = MockRepo::new();
        repo.expect_get_products()
            .times(times)
            .returning(move || Ok(products.clone()));
        repo
    }

    fn failing_repo() -> MockRepo {
        let mut repo = MockRepo::new();
        repo.expect_get_products()
            .returning(|| Err(CatalogError::Database("connection reset".to_string())));
        repo
    }

    fn fast_options() -> ProductServiceOptions {
        ProductServiceOptions {
            item_delay: Duration::from_millis(1),
            ..ProductServiceOptions::default()
        }
    }

    fn service(repo: MockRepo, cache: Arc<RecordingCache>) -> ProductServiceImpl {
        ProductServiceImpl::new(Arc::new(repo), cache, fast_options())
    }

    // =========================================================================
    // list_cached
    // =========================================================================

    #[tokio::test]
    async fn test_cold_cache_reads_repository_once_and_writes_one_entry() {
        let cache = Arc::new(RecordingCache::default());
        let service = service(repo_returning(catalog(), 1), cache.clone());

        let summaries = service.list_cached().await.unwrap();

        let expected: Vec<ProductSummary> = catalog().iter().map(ProductSummary::from).collect();
        assert_eq!(summaries, expected);
        assert_eq!(
            cache.writes(),
            vec![(PRODUCTS_CACHE_KEY.to_string(), Duration::from_secs(3600))]
        );
    }

    #[tokio::test]
    async fn test_cold_cache_stores_json_projection() {
        let cache = Arc::new(RecordingCache::default());
        let service = service(repo_returning(vec![Product::new(1, "pen", 10.0)], 1), cache.clone());

        service.list_cached().await.unwrap();

        let stored = cache.get_raw(PRODUCTS_CACHE_KEY).await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&stored).unwrap();
        assert_eq!(json, serde_json::json!([{"id": 1, "name": "pen", "price": 10.0}]));
    }

    #[tokio::test]
    async fn test_warm_cache_skips_repository() {
        let cached = r#"[{"id":8,"name":"cached only","price":1.5}]"#;
        let cache = Arc::new(RecordingCache::with_entry(PRODUCTS_CACHE_KEY, cached));

        let mut repo = MockRepo::new();
        repo.expect_get_products().never();
        let service = service(repo, cache.clone());

        let summaries = service.list_cached().await.unwrap();

        assert_eq!(
            summaries,
            vec![ProductSummary {
                id: 8,
                name: "cached only".to_string(),
                price: 1.5,
            }]
        );
        assert!(cache.writes().is_empty());
    }

    #[tokio::test]
    async fn test_successive_calls_are_identical() {
        let cache = Arc::new(RecordingCache::default());
        let service = service(repo_returning(catalog(), 1), cache.clone());

        let first = service.list_cached().await.unwrap();
        let second = service.list_cached().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.writes().len(), 1);
    }

    #[tokio::test]
    async fn test_cached_list_keeps_repository_order() {
        let products = vec![
            Product::new(30, "c", 3.0),
            Product::new(10, "a", 1.0),
            Product::new(20, "b", 2.0),
        ];
        let cache = Arc::new(RecordingCache::default());
        let service = service(repo_returning(products, 1), cache);

        let ids: Vec<i64> = service.list_cached().await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }

    #[tokio::test]
    async fn test_empty_repository_caches_empty_list() {
        let cache = Arc::new(RecordingCache::default());
        let service = service(repo_returning(vec![], 1), cache.clone());

        assert!(service.list_cached().await.unwrap().is_empty());
        assert_eq!(
            cache.get_raw(PRODUCTS_CACHE_KEY).await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_repository_error_skips_cache_write() {
        let cache = Arc::new(RecordingCache::default());
        let service = service(failing_repo(), cache.clone());

        let err = service.list_cached().await.unwrap_err();

        assert!(matches!(err, CatalogError::Database(_)));
        assert!(cache.writes().is_empty());
    }

    #[tokio::test]
    async fn test_cache_read_error_is_returned() {
        let cache = Arc::new(RecordingCache {
            fail_get: true,
            ..RecordingCache::default()
        });
        let mut repo = MockRepo::new();
        repo.expect_get_products().never();
        let service = service(repo, cache);

        let err = service.list_cached().await.unwrap_err();
        assert_eq!(err.error_code(), "CACHE_ERROR");
    }

    #[tokio::test]
    async fn test_cache_write_error_is_returned() {
        let cache = Arc::new(RecordingCache {
            fail_set: true,
            ..RecordingCache::default()
        });
        let service = service(repo_returning(catalog(), 1), cache);

        let err = service.list_cached().await.unwrap_err();
        assert_eq!(err.to_string(), "Cache error: read-only replica");
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_is_serialization_error() {
        let cache = Arc::new(RecordingCache::with_entry(PRODUCTS_CACHE_KEY, "{not json"));
        let mut repo = MockRepo::new();
        repo.expect_get_products().never();
        let service = service(repo, cache);

        let err = service.list_cached().await.unwrap_err();
        assert!(matches!(err, CatalogError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_configured_ttl_is_used() {
        let cache = Arc::new(RecordingCache::default());
        let options = ProductServiceOptions {
            products_ttl: Duration::from_secs(90),
            ..fast_options()
        };
        let service = ProductServiceImpl::new(Arc::new(repo_returning(catalog(), 1)), cache.clone(), options);

        service.list_cached().await.unwrap();
        assert_eq!(cache.writes()[0].1, Duration::from_secs(90));
    }

    #[tokio::test]
    async fn test_concurrent_cold_misses_repopulate_identically() {
        let cache = Arc::new(RecordingCache::default());
        let mut repo = MockRepo::new();
        repo.expect_get_products()
            .times(1..=2)
            .returning(|| Ok(catalog()));
        let service = service(repo, cache.clone());

        let (first, second) = tokio::join!(service.list_cached(), service.list_cached());

        let first = first.unwrap();
        assert_eq!(first, second.unwrap());
        assert_eq!(first.len(), 3);
        let writes = cache.writes();
        assert!((1..=2).contains(&writes.len()), "writes: {writes:?}");
        assert!(writes.iter().all(|(key, _)| key == PRODUCTS_CACHE_KEY));
    }

    #[tokio::test]
    async fn test_out_of_range_ttl_fails_request_without_panicking() {
        let cache = Arc::new(MemoryCacheService::new());
        let options = ProductServiceOptions {
            products_ttl: Duration::from_secs(u64::MAX),
            ..fast_options()
        };
        let service = ProductServiceImpl::new(Arc::new(repo_returning(catalog(), 1)), cache.clone(), options);

        let err = service.list_cached().await.unwrap_err();

        assert_eq!(err.error_code(), "CACHE_ERROR");
        assert!(cache.is_empty().await);
    }

    // =========================================================================
    // list_processed
    // =========================================================================

    #[tokio::test]
    async fn test_processed_single_product() {
        let cache = Arc::new(RecordingCache::default());
        let service = service(repo_returning(vec![Product::new(1, "pen", 10.0)], 1), cache);

        let processed = service.list_processed().await.unwrap();

        assert_eq!(processed.len(), 1);
        assert_eq!(processed[0].id, 1);
        assert_eq!(processed[0].name, "PEN");
        assert!((processed[0].price - 11.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_processed_empty_repository() {
        let cache = Arc::new(RecordingCache::default());
        let service = service(repo_returning(vec![], 1), cache);

        assert!(service.list_processed().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_processed_bypasses_cache() {
        let cache = Arc::new(RecordingCache::with_entry(PRODUCTS_CACHE_KEY, "[]"));
        let service = service(repo_returning(catalog(), 2), cache.clone());

        assert_eq!(service.list_processed().await.unwrap().len(), 3);
        assert_eq!(service.list_processed().await.unwrap().len(), 3);
        assert!(cache.writes().is_empty());
    }

    #[tokio::test]
    async fn test_processed_keeps_input_order() {
        let cache = Arc::new(RecordingCache::default());
        let service = service(repo_returning(catalog(), 1), cache);

        let names: Vec<String> = service
            .list_processed()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["PEN", "NOTEBOOK", "STAPLER"]);
    }

    #[tokio::test]
    async fn test_processed_repository_error() {
        let cache = Arc::new(RecordingCache::default());
        let service = service(failing_repo(), cache.clone());

        let err = service.list_processed().await.unwrap_err();
        assert!(matches!(err, CatalogError::Database(_)));
        assert!(cache.writes().is_empty());
    }

    #[tokio::test]
    async fn test_single_failed_item_aborts_batch() {
        let products = vec![
            Product::new(1, "pen", 10.0),
            Product::new(2, "yacht", f64::MAX),
            Product::new(3, "stapler", 7.25),
        ];
        let cache = Arc::new(RecordingCache::default());
        let service = service(repo_returning(products, 1), cache);

        let err = service.list_processed().await.unwrap_err();
        assert!(matches!(err, CatalogError::Processing { product_id: 2, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_fan_out_runs_items_concurrently() {
        let products: Vec<Product> = (1..=50).map(|i| Product::new(i, "item", 1.0)).collect();
        let options = ProductServiceOptions {
            item_delay: Duration::from_millis(100),
            max_concurrency: 0,
            ..ProductServiceOptions::default()
        };
        let service = ProductServiceImpl::new(
            Arc::new(repo_returning(products, 1)),
            Arc::new(RecordingCache::default()),
            options,
        );

        let start = Instant::now();
        let processed = service.list_processed().await.unwrap();
        let elapsed = start.elapsed();

        assert_eq!(processed.len(), 50);
        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed < Duration::from_millis(200), "took {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrency_cap_limits_in_flight_items() {
        let products: Vec<Product> = (1..=20).map(|i| Product::new(i, "item", 1.0)).collect();
        let options = ProductServiceOptions {
            item_delay: Duration::from_millis(100),
            max_concurrency: 5,
            ..ProductServiceOptions::default()
        };
        let service = ProductServiceImpl::new(
            Arc::new(repo_returning(products, 1)),
            Arc::new(RecordingCache::default()),
            options,
        );

        let start = Instant::now();
        let processed = service.list_processed().await.unwrap();
        let elapsed = start.elapsed();

        assert_eq!(processed.len(), 20);
        assert!(elapsed >= Duration::from_millis(400), "took {elapsed:?}");
        assert!(elapsed < Duration::from_millis(500), "took {elapsed:?}");
    }

    #[test]
    fn test_options_from_config() {
        let cache = CacheConfig { products_ttl_secs: 60 };
        let processing = ProcessingConfig {
            item_delay_ms: 5,
            max_concurrency: 8,
        };

        let options = ProductServiceOptions::from_config(&cache, &processing);
        assert_eq!(options.products_ttl, Duration::from_secs(60));
        assert_eq!(options.item_delay, Duration::from_millis(5));
        assert_eq!(options.max_concurrency, 8);
        assert_eq!(ProductServiceOptions::default().products_ttl, Duration::from_secs(3600));
    }
}
