//! Caching infrastructure for the service layer.
//!
//! A string-valued cache abstraction with a Redis implementation and an
//! in-process implementation for single-node deployments.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_interface::CacheInterface;
pub use memory_cache::MemoryCacheService;
pub use redis_cache::RedisCacheService;
