pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::profile::handlers as profile_handlers;
use crate::ranking::handlers as ranking_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile API
        .route(
            "/api/v1/profile",
            put(profile_handlers::handle_save_profile),
        )
        .route(
            "/api/v1/profile/:user_id",
            get(profile_handlers::handle_get_profile),
        )
        // Ranking API
        .route(
            "/api/v1/rankings/generate",
            post(ranking_handlers::handle_generate_ranking),
        )
        .route(
            "/api/v1/rankings/:user_id",
            get(ranking_handlers::handle_get_ranking),
        )
        .with_state(state)
}
