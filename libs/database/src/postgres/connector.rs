use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{retry, retry_with_backoff, RetryConfig};

/// Connect to a PostgreSQL database with default pool settings
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    connect_from_config(PostgresConfig::new(database_url)).await
}

/// Connect using a PostgresConfig.
///
/// This is the recommended way to connect when using configuration:
///
/// ```ignore
/// use core_config::FromEnv;
/// use database::postgres::{connect_from_config, PostgresConfig};
///
/// let config = PostgresConfig::from_env()?;
/// let db = connect_from_config(config).await?;
/// ```
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(config.into_connect_options()).await
}

/// Connect with custom connection options
pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!("Successfully connected to PostgreSQL database");
    Ok(db)
}

/// Connect to PostgreSQL with automatic retry on failure.
///
/// Uses exponential backoff to ride out transient startup failures, e.g.
/// when the database container is still coming up.
pub async fn connect_with_retry(
    database_url: &str,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    connect_from_config_with_retry(PostgresConfig::new(database_url), retry_config).await
}

/// Connect from config with automatic retry on failure
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    let options = config.into_connect_options();

    match retry_config {
        Some(retry_config) => {
            retry_with_backoff(
                || {
                    let opts = options.clone();
                    connect_with_options(opts)
                },
                retry_config,
            )
            .await
        }
        None => {
            retry(|| {
                let opts = options.clone();
                connect_with_options(opts)
            })
            .await
        }
    }
}

/// Run pending migrations for the given migrator.
///
/// The `name` is only used for logging so multiple schemas can share one
/// log stream.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    name: &str,
) -> Result<(), DbErr> {
    info!("Running pending migrations for '{}'", name);
    M::up(db, None).await?;
    info!("Migrations for '{}' are up to date", name);
    Ok(())
}
