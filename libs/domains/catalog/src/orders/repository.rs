use super::models::{CreateOrder, Order};
use crate::error::{CatalogError, CatalogResult};
use crate::pagination::{Page, Pagination};
use crate::reviews::models::{CreateReview, Review};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Storage abstraction for orders, their items and item reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, input: CreateOrder) -> CatalogResult<Order>;
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Order>>;
    async fn list(&self, page: Pagination) -> CatalogResult<Page<Order>>;
    /// Attach a review to an order item. Fails when the item does not exist
    /// or already has a review.
    async fn add_review(&self, order_item_id: Uuid, input: CreateReview) -> CatalogResult<Review>;
}

/// In-memory implementation for tests and local development.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, input: CreateOrder) -> CatalogResult<Order> {
        let order = Order::new(input);
        self.orders.write().await.insert(order.id, order.clone());
        Ok(order)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn list(&self, page: Pagination) -> CatalogResult<Page<Order>> {
        let orders = self.orders.read().await;
        let mut items: Vec<_> = orders.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = items.len() as u64;
        let items = items
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect();
        Ok(Page {
            items,
            total,
            limit: page.limit,
            offset: page.offset,
        })
    }

    async fn add_review(&self, order_item_id: Uuid, input: CreateReview) -> CatalogResult<Review> {
        let mut orders = self.orders.write().await;
        let item = orders
            .values_mut()
            .flat_map(|order| order.items.iter_mut())
            .find(|item| item.id == order_item_id)
            .ok_or(CatalogError::OrderItemNotFound(order_item_id))?;

        if item.review.is_some() {
            return Err(CatalogError::ReviewAlreadyExists(order_item_id));
        }

        let review = Review::new(order_item_id, input);
        item.review = Some(review.clone());
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::super::models::CreateOrderItem;
    use super::*;

    fn order_input() -> CreateOrder {
        CreateOrder {
            items: vec![CreateOrderItem {
                product_id: Uuid::now_v7(),
                quantity: 1,
            }],
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryOrderRepository::new();
        let created = repo.create(order_input()).await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.items.len(), 1);
    }

    #[tokio::test]
    async fn test_add_review_once() {
        let repo = InMemoryOrderRepository::new();
        let order = repo.create(order_input()).await.unwrap();
        let item_id = order.items[0].id;

        let review = repo
            .add_review(
                item_id,
                CreateReview {
                    rating: 4,
                    comment: Some("Great figure".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(review.rating, 4);

        let again = repo
            .add_review(
                item_id,
                CreateReview {
                    rating: 5,
                    comment: None,
                },
            )
            .await;
        assert!(matches!(again, Err(CatalogError::ReviewAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_add_review_to_missing_item() {
        let repo = InMemoryOrderRepository::new();
        let result = repo
            .add_review(
                Uuid::now_v7(),
                CreateReview {
                    rating: 3,
                    comment: None,
                },
            )
            .await;
        assert!(matches!(result, Err(CatalogError::OrderItemNotFound(_))));
    }
}
