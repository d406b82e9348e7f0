//! Database connection bootstrap: connect, configure, migrate.

use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{db_url, DbKind};
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_INTERVAL_MS: u64 = 500;

/// Retry a connection attempt with fixed interval delays
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(
                        "connection_retry=success attempts={} interval_ms={}",
                        attempt, interval_ms
                    );
                }
                return Ok(result);
            }
            Err(e) if attempt < max_attempts => {
                warn!(
                    error = %e,
                    "connection_retry=failed attempt={} max_attempts={} interval_ms={}",
                    attempt, max_attempts, interval_ms
                );
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn connect_options(kind: DbKind, url: &str) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url.to_owned());
    opt.acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    match kind {
        // Every connection to sqlite::memory: is its own database, so the
        // pool must hold exactly one and never recycle it.
        DbKind::SqliteMemory => {
            opt.min_connections(1)
                .max_connections(1)
                .idle_timeout(Duration::from_secs(24 * 60 * 60))
                .max_lifetime(Duration::from_secs(24 * 60 * 60));
        }
        DbKind::SqliteFile => {
            opt.min_connections(1).max_connections(1);
        }
        DbKind::Postgres => {
            opt.min_connections(1).max_connections(10);
        }
    }
    opt
}

/// Connect without migrating.
pub async fn connect_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind)?;
    let opt = connect_options(kind, &url);

    // Only a server can be "not up yet"; local SQLite either opens or doesn't.
    let attempts = if kind == DbKind::Postgres {
        CONNECT_ATTEMPTS
    } else {
        1
    };

    retry_connection(
        || {
            let opt = opt.clone();
            async move {
                Database::connect(opt).await.map_err(|e| {
                    AppError::config(format!("failed to connect to {kind} database: {e}"))
                })
            }
        },
        attempts,
        CONNECT_INTERVAL_MS,
    )
    .await
}

/// Single entrypoint used by the binary and tests: connect, then migrate up.
pub async fn bootstrap_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    info!(db_kind = %kind, "bootstrap=start");

    let conn = connect_db(kind).await?;
    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("migration failed: {e}")))?;

    info!(db_kind = %kind, "bootstrap=ready");
    Ok(conn)
}
