//! Cache keys.

/// Single key under which the whole product list projection is cached.
///
/// There are no per-product entries and nothing invalidates this key before
/// its TTL runs out.
pub const PRODUCTS_CACHE_KEY: &str = "ProductsCacheKey";
