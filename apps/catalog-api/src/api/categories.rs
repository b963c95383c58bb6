use axum::Router;
use database::postgres::DatabaseConnection;
use domain_catalog::categories::{handlers, CategoryService, PgCategoryRepository};

pub fn router(db: DatabaseConnection) -> Router {
    let service = CategoryService::new(PgCategoryRepository::new(db));
    handlers::router(service)
}
