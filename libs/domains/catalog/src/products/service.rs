use super::models::{CreateProduct, ProductDto, UpdateProduct};
use super::repository::ProductRepository;
use crate::categories::models::Category;
use crate::categories::repository::CategoryRepository;
use crate::error::{CatalogError, CatalogResult};
use crate::pagination::{Page, Pagination};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Business logic for the product catalog.
///
/// Owns category resolution: a product can only be created in, or moved to,
/// a category that exists.
pub struct ProductService<P: ProductRepository, C: CategoryRepository> {
    products: Arc<P>,
    categories: Arc<C>,
}

impl<P: ProductRepository, C: CategoryRepository> Clone for ProductService<P, C> {
    fn clone(&self) -> Self {
        Self {
            products: Arc::clone(&self.products),
            categories: Arc::clone(&self.categories),
        }
    }
}

impl<P: ProductRepository, C: CategoryRepository> ProductService<P, C> {
    pub fn new(products: P, categories: C) -> Self {
        Self {
            products: Arc::new(products),
            categories: Arc::new(categories),
        }
    }

    async fn resolve_category(&self, id: Uuid) -> CatalogResult<Category> {
        self.categories
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    pub async fn create_product(
        &self,
        input: CreateProduct,
        category_id: Uuid,
    ) -> CatalogResult<ProductDto> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let category = self.resolve_category(category_id).await?;
        let product = self.products.create(input, category).await?;
        Ok(product.into())
    }

    pub async fn get_product(&self, id: Uuid) -> CatalogResult<ProductDto> {
        self.products
            .get_by_id(id)
            .await?
            .map(Into::into)
            .ok_or(CatalogError::ProductNotFound(id))
    }

    pub async fn list_products(&self, page: Pagination) -> CatalogResult<Page<ProductDto>> {
        Ok(self.products.list(page).await?.map(Into::into))
    }

    /// Products in a category; the category must exist.
    pub async fn products_by_category(
        &self,
        category_id: Uuid,
        page: Pagination,
    ) -> CatalogResult<Page<ProductDto>> {
        let category = self.resolve_category(category_id).await?;
        Ok(self
            .products
            .list_by_category(category.id, page)
            .await?
            .map(Into::into))
    }

    /// Case-insensitive substring search over product names.
    pub async fn search_products(
        &self,
        keyword: &str,
        page: Pagination,
    ) -> CatalogResult<Page<ProductDto>> {
        Ok(self.products.search(keyword, page).await?.map(Into::into))
    }

    /// Full-field update. Re-resolves the category only when the request
    /// names one; an unknown category fails before anything is written.
    pub async fn update_product(
        &self,
        id: Uuid,
        input: UpdateProduct,
    ) -> CatalogResult<ProductDto> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let category = match input.category_id {
            Some(category_id) => Some(self.resolve_category(category_id).await?),
            None => None,
        };

        let product = self.products.update(id, input, category).await?;
        Ok(product.into())
    }

    pub async fn delete_product(&self, id: Uuid) -> CatalogResult<()> {
        if self.products.delete(id).await? {
            Ok(())
        } else {
            Err(CatalogError::ProductNotFound(id))
        }
    }

    pub async fn discounted_products(&self) -> CatalogResult<Vec<ProductDto>> {
        Ok(self
            .products
            .list_discounted()
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub async fn new_products(&self) -> CatalogResult<Vec<ProductDto>> {
        Ok(self
            .products
            .list_new()
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::repository::{InMemoryProductRepository, MockProductRepository};
    use super::*;
    use crate::categories::repository::{InMemoryCategoryRepository, MockCategoryRepository};
    use crate::categories::models::CreateCategory;

    async fn service_with_category() -> (
        ProductService<InMemoryProductRepository, InMemoryCategoryRepository>,
        Category,
    ) {
        let categories = InMemoryCategoryRepository::new();
        let category = categories
            .create(CreateCategory {
                name: "Figures".into(),
                image_hash: None,
            })
            .await
            .unwrap();

        let service = ProductService::new(InMemoryProductRepository::new(), categories);
        (service, category)
    }

    fn create_input(name: &str) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            description: String::new(),
            image_hash: None,
            price: 30.0,
            discount: 0,
            stock: 4,
            is_available: true,
            is_new: true,
        }
    }

    fn update_input(name: &str, category_id: Option<Uuid>) -> UpdateProduct {
        UpdateProduct {
            name: name.to_string(),
            description: String::new(),
            image_hash: None,
            price: 30.0,
            discount: 0,
            stock: 4,
            is_available: true,
            category_id,
        }
    }

    #[tokio::test]
    async fn test_create_with_valid_category_persists() {
        let (service, category) = service_with_category().await;

        let dto = service
            .create_product(create_input("Darth Vader"), category.id)
            .await
            .unwrap();

        assert_eq!(dto.category.as_ref().unwrap().id, category.id);
        let fetched = service.get_product(dto.id).await.unwrap();
        assert_eq!(fetched.name, "Darth Vader");
    }

    #[tokio::test]
    async fn test_create_with_unknown_category_fails() {
        let (service, _) = service_with_category().await;

        let result = service
            .create_product(create_input("Darth Vader"), Uuid::now_v7())
            .await;
        assert!(matches!(result, Err(CatalogError::CategoryNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_with_unknown_category_leaves_product_unchanged() {
        let (service, category) = service_with_category().await;
        let dto = service
            .create_product(create_input("Darth Vader"), category.id)
            .await
            .unwrap();

        let result = service
            .update_product(dto.id, update_input("Changed", Some(Uuid::now_v7())))
            .await;
        assert!(matches!(result, Err(CatalogError::CategoryNotFound(_))));

        let unchanged = service.get_product(dto.id).await.unwrap();
        assert_eq!(unchanged.name, "Darth Vader");
    }

    #[tokio::test]
    async fn test_update_without_category_keeps_existing() {
        let (service, category) = service_with_category().await;
        let dto = service
            .create_product(create_input("Darth Vader"), category.id)
            .await
            .unwrap();

        let updated = service
            .update_product(dto.id, update_input("Luke Skywalker", None))
            .await
            .unwrap();

        assert_eq!(updated.name, "Luke Skywalker");
        assert_eq!(updated.category.as_ref().unwrap().id, category.id);
        assert!(updated.is_new);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (service, _) = service_with_category().await;
        let result = service.delete_product(Uuid::now_v7()).await;
        assert!(matches!(result, Err(CatalogError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn test_by_category_requires_existing_category() {
        let (service, _) = service_with_category().await;
        let result = service
            .products_by_category(Uuid::now_v7(), Pagination::default())
            .await;
        assert!(matches!(result, Err(CatalogError::CategoryNotFound(_))));
    }

    #[tokio::test]
    async fn test_search_finds_substrings() {
        let (service, category) = service_with_category().await;
        service
            .create_product(create_input("Darth Vader"), category.id)
            .await
            .unwrap();
        service
            .create_product(create_input("Luke Skywalker"), category.id)
            .await
            .unwrap();

        let page = service
            .search_products("sky", Pagination::default())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Luke Skywalker");
    }

    #[tokio::test]
    async fn test_validation_runs_before_category_lookup() {
        let mut products = MockProductRepository::new();
        products.expect_create().never();
        let mut categories = MockCategoryRepository::new();
        categories.expect_get_by_id().never();

        let service = ProductService::new(products, categories);
        let mut input = create_input("Darth Vader");
        input.price = -10.0;

        let result = service.create_product(input, Uuid::now_v7()).await;
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }
}
