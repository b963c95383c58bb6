use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A rating left on a purchased order item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub order_item_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(order_item_id: Uuid, input: CreateReview) -> Self {
        Self {
            id: Uuid::now_v7(),
            order_item_id,
            rating: input.rating,
            comment: input.comment,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewDto {
    pub id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewDto {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    #[validate(range(min = 1, max = 5, message = "rating must be 1-5"))]
    pub rating: i32,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        let ok = CreateReview {
            rating: 5,
            comment: None,
        };
        assert!(ok.validate().is_ok());

        let low = CreateReview {
            rating: 0,
            comment: None,
        };
        assert!(low.validate().is_err());

        let high = CreateReview {
            rating: 6,
            comment: None,
        };
        assert!(high.validate().is_err());
    }
}
