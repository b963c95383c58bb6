use crate::products::models::ProductDto;
use crate::reviews::models::{Review, ReviewDto};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A placed order with its line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn new(input: CreateOrder) -> Self {
        let id = Uuid::now_v7();
        Self {
            id,
            created_at: Utc::now(),
            items: input
                .items
                .into_iter()
                .map(|item| OrderItem {
                    id: Uuid::now_v7(),
                    order_id: id,
                    product_id: item.product_id,
                    quantity: item.quantity,
                    review: None,
                })
                .collect(),
        }
    }
}

/// A line item within an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub review: Option<Review>,
}

/// Response shape for orders.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDto {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemDto>,
}

/// Line item response. References the parent by id and embeds the product
/// and review when available.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemDto {
    pub id: Uuid,
    pub order_id: Uuid,
    pub quantity: i32,
    pub product: Option<ProductDto>,
    pub review: Option<ReviewDto>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    #[validate(length(min = 1, message = "an order needs at least one item"), nested)]
    pub items: Vec<CreateOrderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderItem {
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_links_items_to_order() {
        let order = Order::new(CreateOrder {
            items: vec![
                CreateOrderItem {
                    product_id: Uuid::now_v7(),
                    quantity: 2,
                },
                CreateOrderItem {
                    product_id: Uuid::now_v7(),
                    quantity: 1,
                },
            ],
        });

        assert_eq!(order.items.len(), 2);
        assert!(order.items.iter().all(|item| item.order_id == order.id));
        assert!(order.items.iter().all(|item| item.review.is_none()));
    }

    #[test]
    fn test_empty_order_fails_validation() {
        let input = CreateOrder { items: vec![] };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_zero_quantity_fails_validation() {
        let input = CreateOrder {
            items: vec![CreateOrderItem {
                product_id: Uuid::now_v7(),
                quantity: 0,
            }],
        };
        assert!(input.validate().is_err());
    }
}
