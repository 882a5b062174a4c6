pub mod backoff;
pub mod cover_image;
pub mod generation;
pub mod image_generation;
pub mod place_lookup;
pub mod playlist;
pub mod session;
pub mod suggestions;
pub mod text_generation;

#[cfg(test)]
pub(crate) mod testing;

use std::time::Duration;

/// Build the HTTP client shared by all outbound service clients.
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
}
