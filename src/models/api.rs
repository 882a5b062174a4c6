use serde::{Deserialize, Serialize};

use crate::models::generation::{GenerationSnapshot, GenerationState};
use crate::models::playlist::PlaylistResult;

/// Response after submitting a trip for playlist generation.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub generation: u64,
    pub status: &'static str,
    pub message: String,
}

impl SubmitResponse {
    /// Acknowledge a run that has just entered the text stage.
    pub fn started(generation: u64) -> Self {
        Self {
            generation,
            status: GenerationState::SubmittingText.status(),
            message: "Playlist generation started".to_string(),
        }
    }
}

/// Body returned when a request is rejected.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Read-only view of the generation state for the presentation layer.
#[derive(Debug, Serialize)]
pub struct GenerationView {
    pub generation: u64,
    pub status: &'static str,
    pub playlist: Option<PlaylistResult>,
    /// `data:` URL of the cover image, once generated.
    pub cover_image: Option<String>,
    pub error: Option<String>,
}

impl From<&GenerationSnapshot> for GenerationView {
    fn from(snapshot: &GenerationSnapshot) -> Self {
        let state = &snapshot.state;
        Self {
            generation: snapshot.generation,
            status: state.status(),
            playlist: state.playlist().map(|p| p.as_ref().clone()),
            cover_image: state.cover().map(|c| c.data_url()),
            error: state.error().map(str::to_string),
        }
    }
}

/// Value of the destination input.
#[derive(Debug, Serialize, Deserialize)]
pub struct DestinationInput {
    pub text: String,
}
