use super::entity;
use super::models::{CreateProduct, Product, UpdateProduct};
use super::repository::ProductRepository;
use crate::categories::entity as categories;
use crate::categories::models::Category;
use crate::error::{db_err, CatalogError, CatalogResult};
use crate::pagination::{Page, Pagination};
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

/// Escape LIKE metacharacters so the keyword matches literally.
fn like_escape(keyword: &str) -> String {
    keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// SeaORM-backed product repository.
///
/// Every read joins the category so domain products come back fully
/// resolved.
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn page_of(
        &self,
        filter: Option<SimpleExpr>,
        page: Pagination,
    ) -> CatalogResult<Page<Product>> {
        let mut count_query = entity::Entity::find();
        let mut query = entity::Entity::find();
        if let Some(filter) = filter {
            count_query = count_query.filter(filter.clone());
            query = query.filter(filter);
        }

        let total = count_query.count(&self.db).await.map_err(db_err)?;

        let rows = query
            .find_also_related(categories::Entity)
            .order_by_desc(entity::Column::CreatedAt)
            .limit(page.limit)
            .offset(page.offset)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Page {
            items: rows
                .into_iter()
                .map(|(model, category)| model.into_domain(category.map(Into::into)))
                .collect(),
            total,
            limit: page.limit,
            offset: page.offset,
        })
    }

    async fn all_matching(&self, filter: SimpleExpr) -> CatalogResult<Vec<Product>> {
        let rows = entity::Entity::find()
            .filter(filter)
            .find_also_related(categories::Entity)
            .order_by_desc(entity::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|(model, category)| model.into_domain(category.map(Into::into)))
            .collect())
    }

    fn active_model(product: &Product) -> entity::ActiveModel {
        entity::ActiveModel {
            id: Set(product.id),
            name: Set(product.name.clone()),
            description: Set(product.description.clone()),
            image_hash: Set(product.image_hash.clone()),
            price: Set(product.price),
            discount: Set(product.discount),
            stock: Set(product.stock),
            is_available: Set(product.is_available),
            is_new: Set(product.is_new),
            category_id: Set(product.category.as_ref().map(|c| c.id)),
            created_at: Set(product.created_at.into()),
            updated_at: Set(product.updated_at.into()),
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct, category: Category) -> CatalogResult<Product> {
        let product = Product::new(input, category);

        Self::active_model(&product)
            .insert(&self.db)
            .await
            .map_err(db_err)?;

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let row = entity::Entity::find_by_id(id)
            .find_also_related(categories::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(row.map(|(model, category)| model.into_domain(category.map(Into::into))))
    }

    async fn list(&self, page: Pagination) -> CatalogResult<Page<Product>> {
        self.page_of(None, page).await
    }

    async fn list_by_category(
        &self,
        category_id: Uuid,
        page: Pagination,
    ) -> CatalogResult<Page<Product>> {
        self.page_of(Some(entity::Column::CategoryId.eq(category_id)), page)
            .await
    }

    async fn search(&self, keyword: &str, page: Pagination) -> CatalogResult<Page<Product>> {
        let pattern = format!("%{}%", like_escape(&keyword.to_lowercase()));
        let filter = Expr::expr(Func::lower(Expr::col((
            entity::Entity,
            entity::Column::Name,
        ))))
        .like(LikeExpr::new(pattern).escape('\\'));

        self.page_of(Some(filter), page).await
    }

    async fn update(
        &self,
        id: Uuid,
        input: UpdateProduct,
        category: Option<Category>,
    ) -> CatalogResult<Product> {
        let (model, current_category) = entity::Entity::find_by_id(id)
            .find_also_related(categories::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(CatalogError::ProductNotFound(id))?;

        let mut product = model.into_domain(current_category.map(Into::into));
        product.apply_update(input, category);

        Self::active_model(&product)
            .update(&self.db)
            .await
            .map_err(db_err)?;

        tracing::info!(product_id = %product.id, "Updated product");
        Ok(product)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(result.rows_affected > 0)
    }

    async fn list_discounted(&self) -> CatalogResult<Vec<Product>> {
        self.all_matching(entity::Column::Discount.gt(0)).await
    }

    async fn list_new(&self) -> CatalogResult<Vec<Product>> {
        self.all_matching(entity::Column::IsNew.eq(true)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_escape_neutralizes_wildcards() {
        assert_eq!(like_escape("100%"), "100\\%");
        assert_eq!(like_escape("a_b"), "a\\_b");
        assert_eq!(like_escape("back\\slash"), "back\\\\slash");
        assert_eq!(like_escape("plain"), "plain");
    }
}
