//! # Catalog REST
//!
//! REST API layer using Axum for the catalog service.
//! Provides the product listing endpoints and health checks.

pub mod controllers;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
