use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// A service that renders images from a text prompt.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Request a single sample for `prompt`; returns every decoded image payload received.
    async fn generate(&self, prompt: &str) -> Result<Vec<Vec<u8>>, ImageGenError>;
}

/// Client for the Imagen `predict` endpoint.
pub struct ImagenClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    instances: [Instance<'a>; 1],
    parameters: Parameters,
}

#[derive(Serialize)]
struct Instance<'a> {
    prompt: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Parameters {
    sample_count: u32,
}

#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
}

impl ImagenClient {
    pub fn new(http: Client, base_url: &str, model: &str, api_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

fn decode_predictions(response: PredictResponse) -> Result<Vec<Vec<u8>>, ImageGenError> {
    response
        .predictions
        .into_iter()
        .filter_map(|p| p.bytes_base64_encoded)
        .filter(|encoded| !encoded.is_empty())
        .map(|encoded| {
            base64::engine::general_purpose::STANDARD
                .decode(encoded)
                .map_err(ImageGenError::Decode)
        })
        .collect()
}

#[async_trait]
impl ImageGenerator for ImagenClient {
    async fn generate(&self, prompt: &str) -> Result<Vec<Vec<u8>>, ImageGenError> {
        let url = format!("{}/v1beta/models/{}:predict", self.base_url, self.model);

        let request_body = PredictRequest {
            instances: [Instance { prompt }],
            parameters: Parameters { sample_count: 1 },
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImageGenError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PredictResponse = response.json().await?;
        decode_predictions(parsed)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImageGenError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image generation returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Image payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Expected exactly one image in the response, got {0}")]
    ImageCount(usize),
}
