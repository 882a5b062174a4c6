//! Coordinates the playlist and cover image pipelines.
//!
//! The machine owns a single [`GenerationSnapshot`] inside a `watch` channel.
//! Every submission and every reset bumps the snapshot's generation number; a
//! running pipeline carries the number it started with and its results are
//! applied only while that number is still current. In-flight calls from a
//! superseded run are left to finish and their results are dropped.

use std::sync::Arc;

use garde::Validate;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::GenerationError;
use crate::models::generation::{GenerationSnapshot, GenerationState};
use crate::models::trip::TripRequest;
use crate::services::cover_image::CoverImagePipeline;
use crate::services::playlist::PlaylistPipeline;

/// Handle to a started generation run.
pub struct Submission {
    pub generation: u64,
    pub task: JoinHandle<()>,
}

#[derive(Clone)]
pub struct GenerationMachine {
    inner: Arc<Inner>,
}

struct Inner {
    state: watch::Sender<GenerationSnapshot>,
    playlist: PlaylistPipeline,
    cover: CoverImagePipeline,
}

impl GenerationMachine {
    pub fn new(playlist: PlaylistPipeline, cover: CoverImagePipeline) -> Self {
        let (tx, _rx) = watch::channel(GenerationSnapshot::default());
        Self {
            inner: Arc::new(Inner {
                state: tx,
                playlist,
                cover,
            }),
        }
    }

    pub fn snapshot(&self) -> GenerationSnapshot {
        self.inner.state.borrow().clone()
    }

    pub fn state(&self) -> GenerationState {
        self.inner.state.borrow().state.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GenerationSnapshot> {
        self.inner.state.subscribe()
    }

    /// Start generating a playlist for `trip`, superseding any run in progress.
    ///
    /// An invalid trip is rejected here without touching the current state.
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, trip: TripRequest) -> Result<Submission, GenerationError> {
        trip.validate()?;

        let mut generation = 0;
        self.inner.state.send_modify(|s| {
            if s.state.is_pending() {
                tracing::info!(superseded = s.generation, "Superseding in-flight generation");
            }
            s.generation += 1;
            s.state = GenerationState::SubmittingText;
            generation = s.generation;
        });

        tracing::info!(
            generation,
            destination = %trip.destination,
            activities = trip.activities.len(),
            genres = trip.genres.len(),
            "Playlist generation submitted"
        );

        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move { inner.run(generation, trip).await });

        Ok(Submission { generation, task })
    }

    /// Return to `Idle`, dropping any held playlist and cover and orphaning
    /// in-flight work.
    pub fn reset(&self) {
        self.inner.state.send_modify(|s| {
            s.generation += 1;
            s.state = GenerationState::Idle;
        });
        tracing::info!("Generation state reset");
    }
}

impl Inner {
    async fn run(&self, generation: u64, trip: TripRequest) {
        let playlist = match self.playlist.generate(&trip).await {
            Ok(playlist) => Arc::new(playlist),
            Err(e) => {
                tracing::error!(generation, error = %e, "Playlist generation failed");
                self.apply(
                    generation,
                    GenerationState::TextFailed {
                        reason: e.user_message().to_string(),
                    },
                );
                return;
            }
        };

        let prompt = playlist.cover_image_prompt.trim().to_string();
        if prompt.is_empty() {
            self.apply(
                generation,
                GenerationState::Complete {
                    playlist,
                    cover: None,
                },
            );
            return;
        }

        let started_image = self.apply(
            generation,
            GenerationState::ImageGenerating {
                playlist: Arc::clone(&playlist),
            },
        );
        if !started_image {
            return;
        }

        let next = match self.cover.generate(&prompt).await {
            Ok(cover) => GenerationState::Complete {
                playlist,
                cover: Some(Arc::new(cover)),
            },
            Err(e) => {
                tracing::warn!(generation, error = %e, "Cover image generation failed, keeping playlist");
                GenerationState::ImageFailed {
                    playlist,
                    reason: e.user_message().to_string(),
                }
            }
        };
        self.apply(generation, next);
    }

    /// Replace the state if `generation` is still the active run.
    fn apply(&self, generation: u64, next: GenerationState) -> bool {
        let status = next.status();
        let applied = self.state.send_if_modified(|s| {
            if s.generation != generation {
                return false;
            }
            s.state = next;
            true
        });

        if applied {
            tracing::debug!(generation, status, "Generation state changed");
        } else {
            metrics::counter!("stale_results_discarded_total").increment(1);
            tracing::debug!(generation, status, "Discarding result from superseded generation");
        }
        applied
    }
}
