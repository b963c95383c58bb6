use super::models::{Category, CreateCategory, UpdateCategory};
use super::repository::CategoryRepository;
use crate::error::{CatalogError, CatalogResult};
use crate::pagination::{Page, Pagination};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Business logic for category management.
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> Clone for CategoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_category(&self, input: CreateCategory) -> CatalogResult<Category> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;
        self.repository.create(input).await
    }

    pub async fn get_category(&self, id: Uuid) -> CatalogResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    pub async fn list_categories(&self, page: Pagination) -> CatalogResult<Page<Category>> {
        self.repository.list(page).await
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        input: UpdateCategory,
    ) -> CatalogResult<Category> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;
        self.repository.update(id, input).await
    }

    pub async fn delete_category(&self, id: Uuid) -> CatalogResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(CatalogError::CategoryNotFound(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::repository::{InMemoryCategoryRepository, MockCategoryRepository};
    use super::*;

    fn service() -> CategoryService<InMemoryCategoryRepository> {
        CategoryService::new(InMemoryCategoryRepository::new())
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let result = service()
            .create_category(CreateCategory {
                name: String::new(),
                image_hash: None,
            })
            .await;
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let result = service().get_category(Uuid::now_v7()).await;
        assert!(matches!(result, Err(CatalogError::CategoryNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let result = service().delete_category(Uuid::now_v7()).await;
        assert!(matches!(result, Err(CatalogError::CategoryNotFound(_))));
    }

    #[tokio::test]
    async fn test_repository_errors_propagate() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_list()
            .returning(|_| Err(CatalogError::Internal("connection reset".into())));

        let service = CategoryService::new(repo);
        let result = service.list_categories(Pagination::default()).await;
        assert!(matches!(result, Err(CatalogError::Internal(_))));
    }
}
