use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use database::postgres::{check_health, DatabaseConnection};
use serde_json::Value;

/// Readiness probe: verifies the database responds before reporting ready.
async fn ready(
    State(db): State<DatabaseConnection>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "database",
        Box::pin(async move { check_health(&db).await.map_err(|e| e.to_string()) }),
    )];

    run_health_checks(checks).await
}

pub fn router(db: DatabaseConnection) -> Router {
    Router::new().route("/ready", get(ready)).with_state(db)
}
