use std::sync::Arc;

use anyhow::Context;

use fa_stats::config::AppConfig;
use fa_stats::database::connection::get_db_client;
use fa_stats::database::mongo_store::MongoRecordStore;
use fa_stats::routes::build_router;
use fa_stats::services::team_stats_service::TeamStatsService;
use fa_stats::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;

    let db = get_db_client(&config)
        .await
        .context("failed to connect to the database")?;
    let store = Arc::new(MongoRecordStore::new(db));

    let service = TeamStatsService::new(store, config.cache_policy())
        .with_ranking_limit(config.ranking_default_limit);
    tracing::info!("✅ Team statistics service ready");

    let addr = config.bind_address();
    let app = build_router(AppState::new(service, config));

    tracing::info!("🚀 Server starting on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
