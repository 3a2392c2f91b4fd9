//! Product listing controller.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::get, Router};
use catalog_service::{ProcessedProduct, ProductSummary};
use tracing::debug;

/// Creates the product router, nested under `/api/products`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/all", get(list_all_products))
}

/// List product summaries through the cache.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    responses(
        (status = 200, description = "Product summaries", body = [ProductSummary]),
        (status = 500, description = "Store, cache or serialization failure", body = catalog_core::ErrorResponse)
    )
)]
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<ProductSummary>> {
    debug!("List products request");

    let products = state.product_service.list_cached().await?;
    ok(products)
}

/// List every product after processing, bypassing the cache.
#[utoipa::path(
    get,
    path = "/api/products/all",
    tag = "products",
    responses(
        (status = 200, description = "Processed products", body = [ProcessedProduct]),
        (status = 500, description = "Store or processing failure", body = catalog_core::ErrorResponse)
    )
)]
pub async fn list_all_products(State(state): State<AppState>) -> ApiResult<Vec<ProcessedProduct>> {
    debug!("List all processed products request");

    let products = state.product_service.list_processed().await?;
    ok(products)
}
