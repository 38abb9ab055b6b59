//! Connection helpers over `sea_orm::Database`.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::Result;
use crate::config::PoolCfg;

/// Open a pooled connection, applying the pool knobs from `PoolCfg`.
///
/// # Errors
/// Returns `DbError::Sea` if the backend refuses the connection.
pub async fn connect(dsn: &str, pool: &PoolCfg) -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(dsn.to_owned());
    if let Some(n) = pool.max_conns {
        opts.max_connections(n);
    }
    if let Some(n) = pool.min_conns {
        opts.min_connections(n);
    }
    if let Some(t) = pool.acquire_timeout {
        opts.connect_timeout(t);
    }
    if let Some(t) = pool.idle_timeout {
        opts.idle_timeout(t);
    }
    if let Some(t) = pool.max_lifetime {
        opts.max_lifetime(t);
    }
    opts.sqlx_logging(pool.sqlx_logging);

    let db = Database::connect(opts).await?;
    tracing::debug!("database connection established");
    Ok(db)
}

/// Ping-based readiness probe for the pooled handle.
pub async fn is_ready(db: &DatabaseConnection) -> bool {
    match db.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "database readiness probe failed");
            false
        }
    }
}
