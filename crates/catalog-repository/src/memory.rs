//! Process-local product store.

use crate::traits::ProductRepository;
use async_trait::async_trait;
use catalog_core::{CatalogResult, Product};
use tracing::debug;

/// In-memory product repository, seeded at construction.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: Vec<Product>,
}

impl InMemoryProductRepository {
    /// Creates a repository holding `products` in the given order.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_products(&self) -> CatalogResult<Vec<Product>> {
        let products = self.products.clone();
        debug!("Fetched {} products from memory", products.len());
        Ok(products)
    }
}
