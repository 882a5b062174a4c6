use std::sync::Arc;
use std::time::Duration;

use crate::error::GenerationError;
use crate::models::generation::{GenerationSnapshot, GenerationState};
use crate::models::trip::TripRequest;
use crate::services::cover_image::CoverImagePipeline;
use crate::services::generation::{GenerationMachine, Submission};
use crate::services::image_generation::ImageGenerator;
use crate::services::place_lookup::PlaceLookup;
use crate::services::playlist::PlaylistPipeline;
use crate::services::suggestions::{SuggestionDebouncer, SuggestionState};
use crate::services::text_generation::TextGenerator;

/// One user's trip-planning session: generation lifecycle plus the
/// destination suggestion side channel.
pub struct TripSession {
    generation: GenerationMachine,
    suggestions: SuggestionDebouncer,
}

impl TripSession {
    pub fn new(generation: GenerationMachine, suggestions: SuggestionDebouncer) -> Self {
        Self {
            generation,
            suggestions,
        }
    }

    /// Wire a session from the three service collaborators with default retry policies.
    pub fn from_services(
        text: Arc<dyn TextGenerator>,
        images: Arc<dyn ImageGenerator>,
        places: Arc<dyn PlaceLookup>,
        response_language: &str,
        quiet_period: Duration,
    ) -> Self {
        let generation = GenerationMachine::new(
            PlaylistPipeline::new(text, response_language),
            CoverImagePipeline::new(images),
        );
        let suggestions = SuggestionDebouncer::new(places, quiet_period);
        Self::new(generation, suggestions)
    }

    pub fn generation(&self) -> &GenerationMachine {
        &self.generation
    }

    pub fn suggestions(&self) -> &SuggestionDebouncer {
        &self.suggestions
    }

    pub fn snapshot(&self) -> GenerationSnapshot {
        self.generation.snapshot()
    }

    pub fn state(&self) -> GenerationState {
        self.generation.state()
    }

    pub fn current_suggestions(&self) -> SuggestionState {
        self.suggestions.current()
    }

    /// Start a new generation. Hides the suggestion list once the trip is accepted.
    pub fn submit(&self, trip: TripRequest) -> Result<Submission, GenerationError> {
        let submission = self.generation.submit(trip)?;
        self.suggestions.dismiss();
        Ok(submission)
    }

    /// Forward a keystroke from the destination input.
    pub fn destination_input(&self, text: &str) {
        self.suggestions.input(text);
    }

    /// Back to `Idle` with no playlist, cover, suggestions or error held.
    pub fn reset(&self) {
        self.generation.reset();
        self.suggestions.clear();
    }
}
