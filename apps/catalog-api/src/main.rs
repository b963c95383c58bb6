mod api;
mod config;
mod openapi;

use axum_helpers::{create_production_app, create_router, health_router};
use config::Config;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        "Starting {} v{} ({:?})",
        config.app.name, config.app.version, config.environment
    );

    let db = connect_from_config_with_retry(config.database.clone(), None).await?;
    run_migrations::<migration::Migrator>(&db, "catalog").await?;

    let router = create_router::<openapi::ApiDoc>(api::routes(db.clone()))
        .await?
        .merge(health_router(config.app))
        .merge(api::health::router(db.clone()));

    let cleanup_db = db;
    create_production_app(
        router,
        &config.server,
        Duration::from_secs(30),
        async move {
            if let Err(e) = cleanup_db.close().await {
                tracing::warn!("Error closing database connection: {e}");
            }
        },
    )
    .await?;

    info!("Shutdown complete");
    Ok(())
}
