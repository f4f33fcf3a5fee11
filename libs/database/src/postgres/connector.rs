use sea_orm::{Database, DatabaseConnection};
use tracing::{debug, info};

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult};

/// Open a connection pool using a PostgresConfig
///
/// A single attempt is made; callers decide whether a failure is fatal.
pub async fn connect_from_config(config: PostgresConfig) -> DatabaseResult<DatabaseConnection> {
    let max_connections = config.max_connections;
    let options = config.into_connect_options();

    let db = Database::connect(options)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!(max_connections, "Connected to PostgreSQL");
    Ok(db)
}

/// Check PostgreSQL health by pinging a pooled connection
pub async fn check_health(db: &DatabaseConnection) -> DatabaseResult<()> {
    debug!("Running PostgreSQL health check");

    db.ping()
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("PostgreSQL ping failed: {}", e)))
}
