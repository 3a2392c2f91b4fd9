//! Product service trait definition.

use crate::dto::{ProcessedProduct, ProductSummary};
use async_trait::async_trait;
use catalog_core::CatalogResult;

/// Product listing service.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Lists product summaries through the cache.
    ///
    /// On a miss the repository is read, the projection is written to the
    /// cache, and the same payload is returned.
    async fn list_cached(&self) -> CatalogResult<Vec<ProductSummary>>;

    /// Lists every product after the processing transform, bypassing the
    /// cache. Output order matches repository order.
    async fn list_processed(&self) -> CatalogResult<Vec<ProcessedProduct>>;
}
