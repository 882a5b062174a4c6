use std::sync::Arc;

use serde::Serialize;
use strum::Display;

use crate::models::playlist::{CoverImage, PlaylistResult};

/// Which generation stage an outcome belongs to.
#[derive(Debug, Clone, Copy, Serialize, Display, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Playlist,
    Image,
}

/// Lifecycle of one playlist generation.
///
/// Every variant after `SubmittingText` except `TextFailed` carries the
/// playlist, so there is no way to observe an image stage without one.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GenerationState {
    #[default]
    Idle,
    SubmittingText,
    TextFailed {
        reason: String,
    },
    ImageGenerating {
        playlist: Arc<PlaylistResult>,
    },
    Complete {
        playlist: Arc<PlaylistResult>,
        cover: Option<Arc<CoverImage>>,
    },
    ImageFailed {
        playlist: Arc<PlaylistResult>,
        reason: String,
    },
}

impl GenerationState {
    /// Short tag used in API responses and logs.
    pub fn status(&self) -> &'static str {
        match self {
            GenerationState::Idle => "idle",
            GenerationState::SubmittingText => "submitting_text",
            GenerationState::TextFailed { .. } => "text_failed",
            GenerationState::ImageGenerating { .. } => "image_generating",
            GenerationState::Complete { .. } => "complete",
            GenerationState::ImageFailed { .. } => "image_failed",
        }
    }

    pub fn playlist(&self) -> Option<&Arc<PlaylistResult>> {
        match self {
            GenerationState::ImageGenerating { playlist }
            | GenerationState::Complete { playlist, .. }
            | GenerationState::ImageFailed { playlist, .. } => Some(playlist),
            _ => None,
        }
    }

    pub fn cover(&self) -> Option<&Arc<CoverImage>> {
        match self {
            GenerationState::Complete { cover, .. } => cover.as_ref(),
            _ => None,
        }
    }

    /// Human-readable failure message, if the last run failed at any stage.
    pub fn error(&self) -> Option<&str> {
        match self {
            GenerationState::TextFailed { reason } | GenerationState::ImageFailed { reason, .. } => {
                Some(reason)
            }
            _ => None,
        }
    }

    /// Whether a generation run is still expected to move this state.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            GenerationState::SubmittingText | GenerationState::ImageGenerating { .. }
        )
    }
}

/// State plus the identifier of the run allowed to mutate it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationSnapshot {
    pub generation: u64,
    pub state: GenerationState,
}
