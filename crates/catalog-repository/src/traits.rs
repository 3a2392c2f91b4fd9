//! Repository trait definitions.

use async_trait::async_trait;
use catalog_core::{CatalogResult, Product};

/// Read access to the product store.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetches every product, in store order. No pagination or filtering.
    async fn get_products(&self) -> CatalogResult<Vec<Product>>;
}
