mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod profile;
mod ranking;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, ProviderKind};
use crate::db::create_pool;
use crate::llm_client::gemini::GeminiClient;
use crate::llm_client::openai::OpenAiClient;
use crate::llm_client::GenerationProvider;
use crate::ranking::store::{PgRankingStore, RankingStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing provider credential)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Disha API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize the generation provider binding selected by config
    let provider: Arc<dyn GenerationProvider> = match config.provider {
        ProviderKind::Gemini => Arc::new(GeminiClient::new(config.provider_api_key.clone())),
        ProviderKind::OpenAi => Arc::new(OpenAiClient::new(config.provider_api_key.clone())),
    };
    info!("Generation provider initialized: {}", provider.name());

    // Initialize the ranking store
    let store: Arc<dyn RankingStore> = Arc::new(PgRankingStore::new(db.clone()));

    // Build app state
    let state = AppState {
        db,
        provider,
        store,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
