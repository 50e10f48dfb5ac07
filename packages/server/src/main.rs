use std::sync::Arc;

use anyhow::Context;
use tracing::{Level, info};

use folio_server::config::AppConfig;
use folio_server::state::AppState;
use folio_server::{build_router, database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load config")?;
    info!(
        default_language = %config.i18n.default_language,
        "Configuration loaded"
    );

    let db = database::init_db(&config.database)
        .await
        .context("Failed to connect to database")?;
    seed::seed_languages(&db)
        .await
        .context("Failed to seed languages")?;
    seed::ensure_indexes(&db).await;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        db,
        config: Arc::new(config),
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
