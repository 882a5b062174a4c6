use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;

use garde::Validate;

use crate::error::GenerationError;
use crate::models::generation::Stage;
use crate::models::playlist::{response_schema, PlaylistResult, SchemaError};
use crate::models::trip::TripRequest;
use crate::services::backoff::{retry_with_backoff, BackoffPolicy};
use crate::services::text_generation::{TextGenError, TextGenerator};

/// Number of songs requested per playlist.
pub const SONGS_PER_PLAYLIST: usize = 10;

const COVER_PROMPT_EXAMPLE: &str = "80s Japanese city pop album art, Hiroshi Nagai style, \
a coastal road at sunset, palm trees, pastel colors, nostalgic.";

/// Comma-separated labels in first-seen order, repeats dropped.
fn distinct_labels<T: Copy + Eq + Hash + Display>(items: &[T]) -> String {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(**item))
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the natural-language instruction for a trip.
///
/// `response_language` is the language the title, description and per-song
/// reasons are written in; the cover prompt is always requested in English.
pub fn build_prompt(trip: &TripRequest, response_language: &str) -> String {
    let activities = distinct_labels(&trip.activities);

    let genres = if trip.genres.is_empty() {
        "no preference, recommend a diverse mix".to_string()
    } else {
        distinct_labels(&trip.genres)
    };

    let start = trip
        .start_date
        .map(|d| d.to_string())
        .unwrap_or_default();
    let end = trip.end_date.map(|d| d.to_string()).unwrap_or_default();

    format!(
        "Destination: {destination}\n\
         Travel dates: from {start} to {end} (reflect the season)\n\
         Main activities: {activities}\n\
         Preferred genres: {genres}\n\
         \n\
         Based on the information above, recommend a playlist of {SONGS_PER_PLAYLIST} songs that suit this trip.\n\
         \n\
         Write all of the following text in {response_language}:\n\
         1. The playlist title (playlistTitle)\n\
         2. A short playlist description (playlistDescription)\n\
         3. The reason each song was recommended (reason)\n\
         \n\
         Also write an English prompt for generating a cover image that matches the mood (coverImagePrompt).\n\
         Example (Japanese city pop): '{COVER_PROMPT_EXAMPLE}'\n\
         \n\
         You must respond in the specified JSON format.",
        destination = trip.destination.trim(),
    )
}

/// Why a single text-generation attempt was rejected.
#[derive(Debug, thiserror::Error)]
pub enum PlaylistAttemptError {
    #[error(transparent)]
    Network(#[from] TextGenError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Trip request -> validated playlist, retried against the text-generation service.
pub struct PlaylistPipeline {
    generator: Arc<dyn TextGenerator>,
    policy: BackoffPolicy,
    response_language: String,
}

impl PlaylistPipeline {
    pub fn new(generator: Arc<dyn TextGenerator>, response_language: &str) -> Self {
        Self {
            generator,
            policy: BackoffPolicy::TEXT_GENERATION,
            response_language: response_language.to_string(),
        }
    }

    pub fn with_policy(mut self, policy: BackoffPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Generate a playlist for `trip`.
    ///
    /// Invalid trips fail before any network call. A response that does not
    /// match the playlist schema counts as a failed attempt, same as a
    /// transport error.
    pub async fn generate(&self, trip: &TripRequest) -> Result<PlaylistResult, GenerationError> {
        trip.validate()?;

        let prompt = build_prompt(trip, &self.response_language);
        let schema = response_schema();
        let start = std::time::Instant::now();

        let result = retry_with_backoff(self.policy, "text_generation", || async {
            let raw = self.generator.generate(&prompt, &schema).await?;
            let playlist = PlaylistResult::from_json(&raw)?;
            Ok::<_, PlaylistAttemptError>(playlist)
        })
        .await;

        metrics::histogram!("generation_stage_seconds", "stage" => "playlist")
            .record(start.elapsed().as_secs_f64());

        match result {
            Ok(playlist) => {
                tracing::info!(
                    title = %playlist.title,
                    songs = playlist.songs.len(),
                    "Playlist generated"
                );
                Ok(playlist)
            }
            Err(exhausted) => Err(GenerationError::exhausted(
                Stage::Playlist,
                exhausted.attempts,
                exhausted.last_error,
            )),
        }
    }
}
