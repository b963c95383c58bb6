pub mod categories;
pub mod health;
pub mod orders;
pub mod products;

use axum::Router;
use database::postgres::DatabaseConnection;

/// All domain routes, nested by `create_router` under `/api`.
pub fn routes(db: DatabaseConnection) -> Router {
    Router::new()
        .nest("/products", products::router(db.clone()))
        .nest("/categories", categories::router(db.clone()))
        .nest("/orders", orders::router(db))
}
