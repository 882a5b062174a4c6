use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::services::{
    build_http_client, image_generation::ImagenClient, place_lookup::NominatimClient,
    session::TripSession, text_generation::GeminiClient,
};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<TripSession>,
}

impl AppState {
    pub fn new(session: TripSession) -> Self {
        Self {
            session: Arc::new(session),
        }
    }

    /// Build the session and its service clients from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let http = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.http_timeout_secs),
        )?;

        let text = GeminiClient::new(
            http.clone(),
            &config.gemini_base_url,
            &config.text_model,
            &config.gemini_api_key,
        );
        let images = ImagenClient::new(
            http.clone(),
            &config.gemini_base_url,
            &config.image_model,
            &config.gemini_api_key,
        );
        let places = NominatimClient::new(
            http,
            &config.nominatim_base_url,
            config.suggestion_limit,
            &config.lookup_language,
        );

        let session = TripSession::from_services(
            Arc::new(text),
            Arc::new(images),
            Arc::new(places),
            &config.response_language,
            Duration::from_millis(config.suggestion_quiet_ms),
        );

        Ok(Self::new(session))
    }
}
