pub mod entity;
pub mod models;

pub use models::{CreateReview, Review, ReviewDto};
