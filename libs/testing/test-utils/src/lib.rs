//! Shared helpers for integration tests.

pub mod data;
pub mod postgres;

pub use data::TestDataBuilder;
pub use postgres::TestDatabase;
