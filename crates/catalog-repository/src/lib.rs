//! # Catalog Repository
//!
//! Data access for products:
//!
//! ```text
//! ProductService
//!   ↓  Arc<dyn ProductRepository>
//! MySqlProductRepository | InMemoryProductRepository
//!   ↓
//! MySQL (DatabasePool)
//! ```

pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use memory::InMemoryProductRepository;
pub use mysql::MySqlProductRepository;
pub use pool::*;
pub use traits::*;
