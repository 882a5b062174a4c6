use crate::models::generation::Stage;

/// Terminal failure of a generation stage.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Invalid trip request: {0}")]
    Validation(#[from] garde::Report),

    #[error("{stage} generation gave up after {attempts} attempts")]
    Exhausted {
        stage: Stage,
        attempts: u32,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl GenerationError {
    pub fn exhausted<E>(stage: Stage, attempts: u32, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        GenerationError::Exhausted {
            stage,
            attempts,
            source: Box::new(source),
        }
    }

    /// The single message shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerationError::Validation(_) => "please fill in every field",
            GenerationError::Exhausted {
                stage: Stage::Playlist,
                ..
            } => "playlist generation failed",
            GenerationError::Exhausted {
                stage: Stage::Image,
                ..
            } => "cover image generation failed",
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            GenerationError::Validation(_) => None,
            GenerationError::Exhausted { stage, .. } => Some(*stage),
        }
    }
}
