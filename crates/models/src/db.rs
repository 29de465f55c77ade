use std::{env, time::Duration};

use anyhow::anyhow;
use configs::DatabaseConfig;
use once_cell::sync::Lazy;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

pub static DATABASE_URL: Lazy<Option<String>> = Lazy::new(|| {
    // Load .env if present
    let _ = dotenvy::dotenv();
    env::var("DATABASE_URL").ok().filter(|u| !u.trim().is_empty())
});

/// The configured URL wins; otherwise `DATABASE_URL` must be set.
fn resolve_url(configured: &str, from_env: Option<&str>) -> anyhow::Result<String> {
    if !configured.trim().is_empty() {
        return Ok(configured.to_string());
    }
    from_env
        .map(str::to_string)
        .ok_or_else(|| anyhow!("no database url configured; set database.url or DATABASE_URL"))
}

/// Connect with default pool settings to `DATABASE_URL`.
pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    let url = resolve_url("", DATABASE_URL.as_deref())?;
    let db = Database::connect(url).await?;
    Ok(db)
}

/// Connect using the pool settings from `[database]`.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let url = resolve_url(&cfg.url, DATABASE_URL.as_deref())?;
    let mut opts = ConnectOptions::new(url);
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await?;
    info!(max_connections = cfg.max_connections, min_connections = cfg.min_connections, "database pool ready");
    Ok(db)
}
