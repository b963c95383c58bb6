use super::models::{CreateProduct, Product, UpdateProduct};
use crate::categories::models::Category;
use crate::error::{CatalogError, CatalogResult};
use crate::pagination::{Page, Pagination};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Storage abstraction for products.
///
/// Category resolution happens in the service layer; the repository receives
/// already validated categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, input: CreateProduct, category: Category) -> CatalogResult<Product>;
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;
    async fn list(&self, page: Pagination) -> CatalogResult<Page<Product>>;
    async fn list_by_category(
        &self,
        category_id: Uuid,
        page: Pagination,
    ) -> CatalogResult<Page<Product>>;
    async fn search(&self, keyword: &str, page: Pagination) -> CatalogResult<Page<Product>>;
    async fn update(
        &self,
        id: Uuid,
        input: UpdateProduct,
        category: Option<Category>,
    ) -> CatalogResult<Product>;
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
    async fn list_discounted(&self) -> CatalogResult<Vec<Product>>;
    async fn list_new(&self) -> CatalogResult<Vec<Product>>;
}

/// In-memory implementation for tests and local development.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn paginate(mut items: Vec<Product>, page: Pagination) -> Page<Product> {
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = items.len() as u64;
        let items = items
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect();
        Page {
            items,
            total,
            limit: page.limit,
            offset: page.offset,
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct, category: Category) -> CatalogResult<Product> {
        let product = Product::new(input, category);
        self.products
            .write()
            .await
            .insert(product.id, product.clone());
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn list(&self, page: Pagination) -> CatalogResult<Page<Product>> {
        let products = self.products.read().await;
        Ok(Self::paginate(products.values().cloned().collect(), page))
    }

    async fn list_by_category(
        &self,
        category_id: Uuid,
        page: Pagination,
    ) -> CatalogResult<Page<Product>> {
        let products = self.products.read().await;
        let items = products
            .values()
            .filter(|p| p.category.as_ref().is_some_and(|c| c.id == category_id))
            .cloned()
            .collect();
        Ok(Self::paginate(items, page))
    }

    async fn search(&self, keyword: &str, page: Pagination) -> CatalogResult<Page<Product>> {
        let keyword = keyword.to_lowercase();
        let products = self.products.read().await;
        let items = products
            .values()
            .filter(|p| p.name.to_lowercase().contains(&keyword))
            .cloned()
            .collect();
        Ok(Self::paginate(items, page))
    }

    async fn update(
        &self,
        id: Uuid,
        input: UpdateProduct,
        category: Option<Category>,
    ) -> CatalogResult<Product> {
        let mut products = self.products.write().await;
        let product = products
            .get_mut(&id)
            .ok_or(CatalogError::ProductNotFound(id))?;
        product.apply_update(input, category);
        Ok(product.clone())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        Ok(self.products.write().await.remove(&id).is_some())
    }

    async fn list_discounted(&self) -> CatalogResult<Vec<Product>> {
        let products = self.products.read().await;
        let mut items: Vec<_> = products
            .values()
            .filter(|p| p.discount > 0)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn list_new(&self) -> CatalogResult<Vec<Product>> {
        let products = self.products.read().await;
        let mut items: Vec<_> = products.values().filter(|p| p.is_new).cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }
}
