//! Catalog domain: products, categories, orders and reviews.
//!
//! Layering follows the repository pattern used across the workspace:
//! - `entity`: SeaORM persistence models
//! - `models`: domain types and HTTP DTOs
//! - `repository`: storage trait plus an in-memory implementation for tests
//! - `postgres`: SeaORM-backed repository implementation
//! - `service`: business rules on top of the repository traits
//! - `handlers`: Axum routes and OpenAPI documentation

pub mod categories;
pub mod error;
pub mod orders;
pub mod pagination;
pub mod products;
pub mod reviews;

pub use error::{CatalogError, CatalogResult};
pub use pagination::{Page, Pagination};
