//! Data Transfer Objects (DTOs) for the service layer.

mod product_dto;

pub use product_dto::*;
