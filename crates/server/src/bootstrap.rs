use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use quotewise_core::config::{AppConfig, ConfigError, LoadOptions};
use quotewise_db::{connect, migrations, DbPool};
use thiserror::Error;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db_pool: DbPool,
    pub http: reqwest::Client,
}

pub struct Application {
    pub state: AppState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
    #[error("http client construction failed: {0}")]
    HttpClient(#[source] reqwest::Error),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(event_name = "system.bootstrap.start", "starting application bootstrap");

    let db_pool = connect(&config.database).await.map_err(BootstrapError::DatabaseConnect)?;
    info!(event_name = "system.bootstrap.database_connected", "database connection established");

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(event_name = "system.bootstrap.migrations_applied", "database migrations applied");

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.chat.timeout_secs))
        .build()
        .map_err(BootstrapError::HttpClient)?;

    Ok(Application { state: AppState { config: Arc::new(config), db_pool, http } })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(crate::quotes::routes())
        .merge(crate::chat::routes())
        .merge(crate::probes::routes())
        .merge(crate::health::routes())
        .with_state(state)
}
