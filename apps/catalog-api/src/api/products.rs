use axum::Router;
use database::postgres::DatabaseConnection;
use domain_catalog::categories::PgCategoryRepository;
use domain_catalog::products::{handlers, PgProductRepository, ProductService};

pub fn router(db: DatabaseConnection) -> Router {
    let service = ProductService::new(
        PgProductRepository::new(db.clone()),
        PgCategoryRepository::new(db),
    );
    handlers::router(service)
}
