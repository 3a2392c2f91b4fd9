//! Product-related DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Projection of a product served by the cached list and stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductSummary {
    /// Store-assigned identifier.
    pub id: i64,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: f64,
}

/// A product after the processing transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProcessedProduct {
    /// Store-assigned identifier.
    pub id: i64,
    /// Product name, uppercased.
    pub name: String,
    /// Unit price with the markup applied.
    pub price: f64,
}
