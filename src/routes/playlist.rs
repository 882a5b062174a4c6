use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::app_state::AppState;
use crate::error::GenerationError;
use crate::models::api::{ErrorResponse, GenerationView, SubmitResponse};
use crate::models::trip::TripRequest;

/// POST /api/v1/playlist — Start generating a playlist for a trip.
pub async fn submit_trip(
    State(state): State<AppState>,
    Json(trip): Json<TripRequest>,
) -> Result<(StatusCode, Json<SubmitResponse>), (StatusCode, Json<ErrorResponse>)> {
    match state.session.submit(trip) {
        Ok(submission) => Ok((
            StatusCode::ACCEPTED,
            Json(SubmitResponse::started(submission.generation)),
        )),
        Err(e @ GenerationError::Validation(_)) => {
            tracing::info!(error = %e, "Rejected incomplete trip request");
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: e.user_message().to_string(),
                    details: Some(e.to_string()),
                }),
            ))
        }
        Err(e) => {
            tracing::error!(error = %e, "Unexpected failure starting generation");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.user_message().to_string(),
                    details: None,
                }),
            ))
        }
    }
}

/// GET /api/v1/playlist — Current generation state.
pub async fn get_generation(State(state): State<AppState>) -> Json<GenerationView> {
    Json(GenerationView::from(&state.session.snapshot()))
}

/// POST /api/v1/reset — Discard the playlist, cover, suggestions and errors.
pub async fn reset(State(state): State<AppState>) -> StatusCode {
    state.session.reset();
    StatusCode::NO_CONTENT
}
