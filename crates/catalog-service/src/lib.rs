//! # Catalog Service
//!
//! Product listing use cases: the cache-aside product list and the
//! per-item processing fan-out, plus the cache backends they run on.

pub mod cache;
pub mod dto;
pub mod mappers;
pub mod product_service;
pub mod r#impl;

pub use cache::*;
pub use dto::*;
pub use product_service::*;
pub use r#impl::*;
