use super::models::{Category, CreateCategory, UpdateCategory};
use crate::error::{CatalogError, CatalogResult};
use crate::pagination::{Page, Pagination};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Storage abstraction for categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, input: CreateCategory) -> CatalogResult<Category>;
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>>;
    async fn list(&self, page: Pagination) -> CatalogResult<Page<Category>>;
    async fn update(&self, id: Uuid, input: UpdateCategory) -> CatalogResult<Category>;
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}

/// In-memory implementation for tests and local development.
#[derive(Clone, Default)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<HashMap<Uuid, Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, input: CreateCategory) -> CatalogResult<Category> {
        let category = Category::new(input);
        self.categories
            .write()
            .await
            .insert(category.id, category.clone());
        Ok(category)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        Ok(self.categories.read().await.get(&id).cloned())
    }

    async fn list(&self, page: Pagination) -> CatalogResult<Page<Category>> {
        let categories = self.categories.read().await;
        let mut items: Vec<_> = categories.values().cloned().collect();
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

    async fn update(&self, id: Uuid, input: UpdateCategory) -> CatalogResult<Category> {
        let mut categories = self.categories.write().await;
        let category = categories
            .get_mut(&id)
            .ok_or(CatalogError::CategoryNotFound(id))?;
        category.apply_update(input);
        Ok(category.clone())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        Ok(self.categories.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(name: &str) -> CreateCategory {
        CreateCategory {
            name: name.to_string(),
            image_hash: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryCategoryRepository::new();
        let created = repo.create(create_input("Figures")).await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryCategoryRepository::new();
        let result = repo
            .update(
                Uuid::now_v7(),
                UpdateCategory {
                    name: "Plushies".into(),
                    image_hash: None,
                },
            )
            .await;
        assert!(matches!(result, Err(CatalogError::CategoryNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let repo = InMemoryCategoryRepository::new();
        let created = repo.create(create_input("Figures")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let repo = InMemoryCategoryRepository::new();
        for i in 0..5 {
            repo.create(create_input(&format!("cat-{i}"))).await.unwrap();
        }

        let page = repo
            .list(Pagination {
                limit: 2,
                offset: 2,
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 5);
    }
}
