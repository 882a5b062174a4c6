//! Destination search against the OpenStreetMap Nominatim geocoder.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// A free-text place search returning display names, most relevant first.
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<String>, LookupError>;
}

/// Nominatim `/search` client.
pub struct NominatimClient {
    http: Client,
    base_url: String,
    limit: usize,
    language: String,
}

#[derive(Deserialize)]
struct Place {
    display_name: String,
}

impl NominatimClient {
    pub fn new(http: Client, base_url: &str, limit: usize, language: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            limit,
            language: language.to_string(),
        }
    }
}

#[async_trait]
impl PlaceLookup for NominatimClient {
    async fn search(&self, query: &str) -> Result<Vec<String>, LookupError> {
        let url = format!("{}/search", self.base_url);
        let limit = self.limit.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("accept-language", self.language.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        let places: Vec<Place> = response.json().await?;
        Ok(places.into_iter().map(|p| p.display_name).collect())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Place lookup returned HTTP {0}")]
    Status(u16),
}
