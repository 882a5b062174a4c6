use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::app_state::AppState;
use crate::models::api::DestinationInput;
use crate::services::suggestions::SuggestionState;

/// POST /api/v1/suggestions/input — Latest destination keystroke.
pub async fn destination_input(
    State(state): State<AppState>,
    Json(input): Json<DestinationInput>,
) -> StatusCode {
    state.session.destination_input(&input.text);
    StatusCode::ACCEPTED
}

/// POST /api/v1/suggestions/focus
pub async fn focus(State(state): State<AppState>) -> Json<SuggestionState> {
    state.session.suggestions().focus();
    Json(state.session.current_suggestions())
}

/// POST /api/v1/suggestions/blur
pub async fn blur(State(state): State<AppState>) -> StatusCode {
    state.session.suggestions().blur();
    StatusCode::NO_CONTENT
}

/// GET /api/v1/suggestions — Current suggestion list and visibility.
pub async fn get_suggestions(State(state): State<AppState>) -> Json<SuggestionState> {
    Json(state.session.current_suggestions())
}

/// POST /api/v1/suggestions/select — A suggestion was picked.
pub async fn select(
    State(state): State<AppState>,
    Json(input): Json<DestinationInput>,
) -> Json<DestinationInput> {
    let text = state.session.suggestions().select(&input.text);
    Json(DestinationInput { text })
}
