use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::GenerationProvider;
use crate::ranking::store::RankingStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The generation provider and ranking store are trait objects constructed
/// once at startup and passed in — never ambient globals — so handlers and
/// the orchestrator stay testable with substitutes.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub provider: Arc<dyn GenerationProvider>,
    pub store: Arc<dyn RankingStore>,
    /// Kept for handlers that need deployment settings; currently only read
    /// at startup.
    #[allow(dead_code)]
    pub config: Config,
}
