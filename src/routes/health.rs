use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::app_state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub generation: GenerationHealth,
}

#[derive(Serialize)]
pub struct GenerationHealth {
    pub status: &'static str,
    pub in_flight: bool,
}

/// GET /health — liveness plus a summary of the current generation.
///
/// External services are not probed; their failures surface through the
/// retry path instead.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let current = state.session.state();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        generation: GenerationHealth {
            status: current.status(),
            in_flight: current.is_pending(),
        },
    })
}
