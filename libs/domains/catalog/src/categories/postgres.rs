use super::entity;
use super::models::{Category, CreateCategory, UpdateCategory};
use super::repository::CategoryRepository;
use crate::error::{db_err, CatalogError, CatalogResult};
use crate::pagination::{Page, Pagination};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Set,
};
use uuid::Uuid;

/// SeaORM-backed category repository.
#[derive(Clone)]
pub struct PgCategoryRepository {
    db: DatabaseConnection,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, input: CreateCategory) -> CatalogResult<Category> {
        let now = chrono::Utc::now();
        let model = entity::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            image_hash: Set(input.image_hash),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let model = model.insert(&self.db).await.map_err(db_err)?;
        tracing::info!(category_id = %model.id, "Created category");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, page: Pagination) -> CatalogResult<Page<Category>> {
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

        Ok(Page {
            items: models.into_iter().map(Into::into).collect(),
            total,
            limit: page.limit,
            offset: page.offset,
        })
    }

    async fn update(&self, id: Uuid, input: UpdateCategory) -> CatalogResult<Category> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(CatalogError::CategoryNotFound(id))?;

        let mut category: Category = model.into();
        category.apply_update(input);

        let model = entity::ActiveModel {
            id: Set(category.id),
            name: Set(category.name.clone()),
            image_hash: Set(category.image_hash.clone()),
            created_at: Set(category.created_at.into()),
            updated_at: Set(category.updated_at.into()),
        };

        let model = model.update(&self.db).await.map_err(db_err)?;
        tracing::info!(category_id = %model.id, "Updated category");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected > 0 {
            tracing::info!(category_id = %id, "Deleted category");
        }
        Ok(result.rows_affected > 0)
    }
}
