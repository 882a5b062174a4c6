use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Server bind address (e.g., "0.0.0.0:3000").
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Google Generative Language API key. An empty key is passed through as-is.
    #[serde(default)]
    pub gemini_api_key: String,

    /// Base URL of the Generative Language API
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,

    /// Model used for playlist text generation
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Model used for cover image generation
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Base URL of the Nominatim geocoder
    #[serde(default = "default_nominatim_base_url")]
    pub nominatim_base_url: String,

    /// `accept-language` hint sent with place lookups
    #[serde(default = "default_lookup_language")]
    pub lookup_language: String,

    /// Language the playlist title, description and song reasons are written in
    #[serde(default = "default_response_language")]
    pub response_language: String,

    /// Maximum number of destination suggestions
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// Quiet period after the last keystroke before a lookup is issued
    #[serde(default = "default_suggestion_quiet_ms")]
    pub suggestion_quiet_ms: u64,

    /// Per-request timeout for outbound HTTP calls
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// User-Agent sent to external services (Nominatim requires one)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_text_model() -> String {
    "gemini-2.5-flash-preview-05-20".to_string()
}

fn default_image_model() -> String {
    "imagen-3.0-generate-002".to_string()
}

fn default_nominatim_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_lookup_language() -> String {
    "ko".to_string()
}

fn default_response_language() -> String {
    "Korean".to_string()
}

fn default_suggestion_limit() -> usize {
    5
}

fn default_suggestion_quiet_ms() -> u64 {
    300
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("triply/", env!("CARGO_PKG_VERSION")).to_string()
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }
}
