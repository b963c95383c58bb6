use axum::Router;
use database::postgres::DatabaseConnection;
use domain_catalog::orders::{handlers, OrderService, PgOrderRepository};
use domain_catalog::products::PgProductRepository;

pub fn router(db: DatabaseConnection) -> Router {
    let service = OrderService::new(
        PgOrderRepository::new(db.clone()),
        PgProductRepository::new(db),
    );
    handlers::router(service)
}
