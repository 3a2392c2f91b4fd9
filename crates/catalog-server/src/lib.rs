//! # Catalog Server Library
//!
//! Startup wiring for the catalog server: builds the product store, the
//! cache and the product service from configuration.

pub mod startup;
pub mod wiring;
