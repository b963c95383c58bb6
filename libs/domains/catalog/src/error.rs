use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Errors produced by the catalog services and repositories.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("Order not found: {0}")]
    OrderNotFound(Uuid),

    #[error("Order item not found: {0}")]
    OrderItemNotFound(Uuid),

    #[error("Order item {0} already has a review")]
    ReviewAlreadyExists(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Wrap a SeaORM error for the repository implementations.
pub(crate) fn db_err(e: sea_orm::DbErr) -> CatalogError {
    CatalogError::Internal(format!("Database error: {}", e))
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ProductNotFound(_)
            | CatalogError::CategoryNotFound(_)
            | CatalogError::OrderNotFound(_)
            | CatalogError::OrderItemNotFound(_) => AppError::NotFound(err.to_string()),
            CatalogError::ReviewAlreadyExists(_) => AppError::Conflict(err.to_string()),
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_not_found_maps_to_404() {
        let id = Uuid::now_v7();
        let response = CatalogError::ProductNotFound(id).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_review_conflict_maps_to_409() {
        let id = Uuid::now_v7();
        let response = CatalogError::ReviewAlreadyExists(id).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let response = CatalogError::Validation("price must be positive".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
