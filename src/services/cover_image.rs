use std::sync::Arc;

use crate::error::GenerationError;
use crate::models::generation::Stage;
use crate::models::playlist::CoverImage;
use crate::services::backoff::{retry_with_backoff, BackoffPolicy};
use crate::services::image_generation::{ImageGenError, ImageGenerator};

/// Cover prompt -> single cover image, retried against the image-generation service.
pub struct CoverImagePipeline {
    generator: Arc<dyn ImageGenerator>,
    policy: BackoffPolicy,
}

impl CoverImagePipeline {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self {
            generator,
            policy: BackoffPolicy::IMAGE_GENERATION,
        }
    }

    pub fn with_policy(mut self, policy: BackoffPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Render the cover for `prompt`. An attempt only succeeds when the
    /// service returns exactly one image.
    pub async fn generate(&self, prompt: &str) -> Result<CoverImage, GenerationError> {
        let start = std::time::Instant::now();

        let result = retry_with_backoff(self.policy, "image_generation", || async {
            let mut images = self.generator.generate(prompt).await?;
            if images.len() != 1 {
                return Err(ImageGenError::ImageCount(images.len()));
            }
            Ok::<_, ImageGenError>(CoverImage::from_bytes(images.remove(0)))
        })
        .await;

        metrics::histogram!("generation_stage_seconds", "stage" => "image")
            .record(start.elapsed().as_secs_f64());

        match result {
            Ok(cover) => {
                tracing::info!(
                    bytes = cover.bytes.len(),
                    mime_type = cover.mime_type(),
                    "Cover image generated"
                );
                Ok(cover)
            }
            Err(exhausted) => Err(GenerationError::exhausted(
                Stage::Image,
                exhausted.attempts,
                exhausted.last_error,
            )),
        }
    }
}
