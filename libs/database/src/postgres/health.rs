use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

use crate::common::{DatabaseError, DatabaseResult};

/// Check database connectivity with a lightweight `SELECT 1`.
///
/// Used by the `/ready` endpoint.
pub async fn check_health(db: &DatabaseConnection) -> DatabaseResult<()> {
    db.query_one(Statement::from_string(
        db.get_database_backend(),
        "SELECT 1",
    ))
    .await
    .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))?;

    Ok(())
}
