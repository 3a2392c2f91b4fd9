//! OpenAPI documentation configuration.

use crate::controllers::health_controller::{DependencyStatus, HealthResponse, ReadinessResponse};
use catalog_core::ErrorResponse;
use catalog_service::{ProcessedProduct, ProductSummary};
use utoipa::OpenApi;

/// OpenAPI documentation for the catalog API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog Service API",
        version = "1.0.0",
        description = "Product listing API with a cache-aside read path",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::product_controller::list_products,
        crate::controllers::product_controller::list_all_products,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ProductSummary,
            ProcessedProduct,
            ErrorResponse,
            HealthResponse,
            ReadinessResponse,
            DependencyStatus,
        )
    ),
    tags(
        (name = "products", description = "Product listing"),
        (name = "health", description = "Liveness and readiness")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_product_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/products"));
        assert!(doc.paths.paths.contains_key("/api/products/all"));
        assert!(doc.paths.paths.contains_key("/ready"));
    }
}
