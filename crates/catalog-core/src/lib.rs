//! # Catalog Core
//!
//! Core types, traits, and error definitions for the catalog service.
//! Every other crate in the workspace builds on the product entity and the
//! unified error type defined here.

pub mod error;
pub mod product;
pub mod result;
pub mod traits;

pub use error::*;
pub use product::*;
pub use result::*;
pub use traits::*;
