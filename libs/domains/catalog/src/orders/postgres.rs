use super::models::{CreateOrder, Order, OrderItem};
use super::repository::OrderRepository;
use super::{entity, item_entity};
use crate::error::{db_err, CatalogError, CatalogResult};
use crate::pagination::{Page, Pagination};
use crate::reviews::entity as reviews;
use crate::reviews::models::{CreateReview, Review};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

/// SeaORM-backed order repository.
///
/// Orders and their items are written in one transaction; reads batch-fetch
/// items and reviews to avoid per-row queries.
#[derive(Clone)]
pub struct PgOrderRepository {
    db: DatabaseConnection,
}

impl PgOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_items(&self, order_ids: &[Uuid]) -> CatalogResult<Vec<OrderItem>> {
        let item_models = item_entity::Entity::find()
            .filter(item_entity::Column::OrderId.is_in(order_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let item_ids: Vec<Uuid> = item_models.iter().map(|item| item.id).collect();
        let mut reviews_by_item: HashMap<Uuid, Review> = reviews::Entity::find()
            .filter(reviews::Column::OrderItemId.is_in(item_ids))
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|model| (model.order_item_id, model.into()))
            .collect();

        Ok(item_models
            .into_iter()
            .map(|model| OrderItem {
                review: reviews_by_item.remove(&model.id),
                id: model.id,
                order_id: model.order_id,
                product_id: model.product_id,
                quantity: model.quantity,
            })
            .collect())
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, input: CreateOrder) -> CatalogResult<Order> {
        let order = Order::new(input);

        let txn = self.db.begin().await.map_err(db_err)?;

        entity::ActiveModel {
            id: Set(order.id),
            created_at: Set(order.created_at.into()),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        let items: Vec<item_entity::ActiveModel> = order
            .items
            .iter()
            .map(|item| item_entity::ActiveModel {
                id: Set(item.id),
                order_id: Set(item.order_id),
                product_id: Set(item.product_id),
                quantity: Set(item.quantity),
            })
            .collect();

        item_entity::Entity::insert_many(items)
            .exec(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        tracing::info!(order_id = %order.id, items = order.items.len(), "Created order");
        Ok(order)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Order>> {
        let Some(model) = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let items = self.load_items(&[model.id]).await?;
        Ok(Some(Order {
            id: model.id,
            created_at: model.created_at.into(),
            items,
        }))
    }

    async fn list(&self, page: Pagination) -> CatalogResult<Page<Order>> {
        let total = entity::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)?;

        let models = entity::Entity::find()
            .order_by_desc(entity::Column::CreatedAt)
            .limit(page.limit)
            .offset(page.offset)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let order_ids: Vec<Uuid> = models.iter().map(|model| model.id).collect();
        let mut items_by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        for item in self.load_items(&order_ids).await? {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        Ok(Page {
            items: models
                .into_iter()
                .map(|model| Order {
                    items: items_by_order.remove(&model.id).unwrap_or_default(),
                    id: model.id,
                    created_at: model.created_at.into(),
                })
                .collect(),
            total,
            limit: page.limit,
            offset: page.offset,
        })
    }

    async fn add_review(&self, order_item_id: Uuid, input: CreateReview) -> CatalogResult<Review> {
        item_entity::Entity::find_by_id(order_item_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(CatalogError::OrderItemNotFound(order_item_id))?;

        let existing = reviews::Entity::find()
            .filter(reviews::Column::OrderItemId.eq(order_item_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_some() {
            return Err(CatalogError::ReviewAlreadyExists(order_item_id));
        }

        let review = Review::new(order_item_id, input);
        reviews::ActiveModel {
            id: Set(review.id),
            order_item_id: Set(review.order_item_id),
            rating: Set(review.rating),
            comment: Set(review.comment.clone()),
            created_at: Set(review.created_at.into()),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        tracing::info!(order_item_id = %order_item_id, "Created review");
        Ok(review)
    }
}
