use super::models::{CreateOrder, Order, OrderDto, OrderItemDto};
use super::repository::OrderRepository;
use crate::error::{CatalogError, CatalogResult};
use crate::pagination::{Page, Pagination};
use crate::products::repository::ProductRepository;
use crate::reviews::models::{CreateReview, ReviewDto};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Business logic for orders and item reviews.
///
/// Every referenced product must exist before an order is accepted.
pub struct OrderService<O: OrderRepository, P: ProductRepository> {
    orders: Arc<O>,
    products: Arc<P>,
}

impl<O: OrderRepository, P: ProductRepository> Clone for OrderService<O, P> {
    fn clone(&self) -> Self {
        Self {
            orders: Arc::clone(&self.orders),
            products: Arc::clone(&self.products),
        }
    }
}

impl<O: OrderRepository, P: ProductRepository> OrderService<O, P> {
    pub fn new(orders: O, products: P) -> Self {
        Self {
            orders: Arc::new(orders),
            products: Arc::new(products),
        }
    }

    async fn to_dto(&self, order: Order) -> CatalogResult<OrderDto> {
        let mut items = Vec::with_capacity(order.items.len());
        for item in order.items {
            let product = self
                .products
                .get_by_id(item.product_id)
                .await?
                .map(Into::into);
            items.push(OrderItemDto {
                id: item.id,
                order_id: item.order_id,
                quantity: item.quantity,
                product,
                review: item.review.map(ReviewDto::from),
            });
        }
        Ok(OrderDto {
            id: order.id,
            created_at: order.created_at,
            items,
        })
    }

    pub async fn create_order(&self, input: CreateOrder) -> CatalogResult<OrderDto> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        for item in &input.items {
            if self.products.get_by_id(item.product_id).await?.is_none() {
                return Err(CatalogError::ProductNotFound(item.product_id));
            }
        }

        let order = self.orders.create(input).await?;
        self.to_dto(order).await
    }

    pub async fn get_order(&self, id: Uuid) -> CatalogResult<OrderDto> {
        let order = self
            .orders
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::OrderNotFound(id))?;
        self.to_dto(order).await
    }

    pub async fn list_orders(&self, page: Pagination) -> CatalogResult<Page<OrderDto>> {
        let orders = self.orders.list(page).await?;
        let mut items = Vec::with_capacity(orders.items.len());
        for order in orders.items {
            items.push(self.to_dto(order).await?);
        }
        Ok(Page {
            items,
            total: orders.total,
            limit: orders.limit,
            offset: orders.offset,
        })
    }

    pub async fn add_review(
        &self,
        order_item_id: Uuid,
        input: CreateReview,
    ) -> CatalogResult<ReviewDto> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;
        let review = self.orders.add_review(order_item_id, input).await?;
        Ok(review.into())
    }
}
