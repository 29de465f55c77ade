use std::sync::Arc;

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use service::media::CloudinaryUploader;
use service::news::SeaOrmNewsRepository;
use service::NewsService;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::ServerState;

/// Every origin, method and header is allowed.
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect storage, run pending migrations if enabled and wire the upload client.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None).await?;
        info!("migrations applied");
    }

    let repo = Arc::new(SeaOrmNewsRepository { db });
    let media = Arc::new(CloudinaryUploader::new(reqwest::Client::new(), cfg.media.clone()));
    let news = NewsService::new(repo, media, cfg.media.folder.clone());
    Ok(ServerState::new(news))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}

/// Public entry: load config, build the app and serve until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_and_validate()?;
    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors(), cfg.server.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    info!(addr = %listener.local_addr()?, "news catalog listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
