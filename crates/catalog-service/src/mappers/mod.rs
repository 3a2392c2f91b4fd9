//! Entity-DTO mappers.

use crate::dto::{ProcessedProduct, ProductSummary};
use catalog_core::{CatalogError, CatalogResult, Product};

/// Multiplier applied to every price by the processing transform.
pub const PRICE_MARKUP: f64 = 1.10;

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.into_inner(),
            name: product.name.clone(),
            price: product.price,
        }
    }
}

impl TryFrom<&Product> for ProcessedProduct {
    type Error = CatalogError;

    /// Uppercases the name and applies [`PRICE_MARKUP`].
    ///
    /// Fails when the marked-up price is not a finite number.
    fn try_from(product: &Product) -> CatalogResult<Self> {
        let id = product.id.into_inner();
        let price = product.price * PRICE_MARKUP;

        if !price.is_finite() {
            return Err(CatalogError::processing(
                id,
                format!("price {} is not finite after markup", product.price),
            ));
        }

        Ok(Self {
            id,
            name: product.name.to_uppercase(),
            price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_projection() {
        let product = Product::new(4, "Desk Lamp", 24.99);
        let summary = ProductSummary::from(&product);
        assert_eq!(
            summary,
            ProductSummary {
                id: 4,
                name: "Desk Lamp".to_string(),
                price: 24.99,
            }
        );
    }

    #[test]
    fn test_summary_json_shape() {
        let summary = ProductSummary::from(&Product::new(1, "pen", 10.0));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "name": "pen", "price": 10.0}));
    }

    #[test]
    fn test_processed_uppercases_and_marks_up() {
        let processed = ProcessedProduct::try_from(&Product::new(1, "pen", 10.0)).unwrap();
        assert_eq!(processed.id, 1);
        assert_eq!(processed.name, "PEN");
        assert!((processed.price - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_processed_non_ascii_name() {
        let processed = ProcessedProduct::try_from(&Product::new(2, "straße", 0.0)).unwrap();
        assert_eq!(processed.name, "STRASSE");
        assert_eq!(processed.price, 0.0);
    }

    #[test]
    fn test_processed_overflowing_price_fails() {
        let err = ProcessedProduct::try_from(&Product::new(9, "yacht", f64::MAX)).unwrap_err();
        assert!(matches!(err, CatalogError::Processing { product_id: 9, .. }));
    }
}
