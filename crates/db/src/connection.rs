//! SQLite pool construction.
//!
//! Pool sizing comes from [`DatabaseConfig`]; the session pragmas are
//! applied on every checkout so ad-hoc connections never miss them.

use std::time::Duration;

use quotewise_core::config::DatabaseConfig;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqliteConnection;

pub type DbPool = sqlx::SqlitePool;

/// How long a writer waits on a locked database before giving up.
pub const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Opens the application pool described by `database`.
pub async fn connect(database: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    open_pool(&database.url, database.max_connections, database.timeout_secs).await
}

/// Low-level entry point; tests use it for throwaway in-memory pools.
pub async fn open_pool(
    url: &str,
    max_connections: u32,
    acquire_timeout_secs: u64,
) -> Result<DbPool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(Duration::from_secs(acquire_timeout_secs.max(1)))
        .after_connect(|conn, _meta| Box::pin(configure_session(conn)))
        .connect(url)
        .await
}

async fn configure_session(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("PRAGMA foreign_keys = ON").execute(&mut *conn).await?;
    sqlx::query("PRAGMA journal_mode = WAL").execute(&mut *conn).await?;
    sqlx::query(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"))
        .execute(&mut *conn)
        .await?;
    Ok(())
}
