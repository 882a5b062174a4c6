pub mod health;
pub mod metrics;
pub mod playlist;
pub mod suggestions;

use axum::routing::{get, post};
use axum::Router;

use crate::app_state::AppState;

/// API routes for the trip session.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/api/v1/playlist",
            post(playlist::submit_trip).get(playlist::get_generation),
        )
        .route("/api/v1/reset", post(playlist::reset))
        .route("/api/v1/suggestions", get(suggestions::get_suggestions))
        .route("/api/v1/suggestions/input", post(suggestions::destination_input))
        .route("/api/v1/suggestions/focus", post(suggestions::focus))
        .route("/api/v1/suggestions/blur", post(suggestions::blur))
        .route("/api/v1/suggestions/select", post(suggestions::select))
        .with_state(state)
}
