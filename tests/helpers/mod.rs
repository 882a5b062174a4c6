//! Test helper utilities: in-memory service fakes and fixtures

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;

use triply::models::trip::{Activity, Genre, TripRequest};
use triply::services::image_generation::{ImageGenError, ImageGenerator};
use triply::services::place_lookup::{LookupError, PlaceLookup};
use triply::services::text_generation::{TextGenError, TextGenerator};

/// PNG signature bytes; enough for the cover encoding to be sniffed as PNG.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub fn trip(destination: &str) -> TripRequest {
    TripRequest {
        destination: destination.to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 12, 20),
        end_date: NaiveDate::from_ymd_opt(2026, 12, 27),
        activities: vec![Activity::City, Activity::Food],
        genres: vec![Genre::Jazz],
    }
}

pub fn playlist_json(title: &str, song_count: usize) -> String {
    let songs: Vec<serde_json::Value> = (1..=song_count)
        .map(|i| {
            serde_json::json!({
                "title": format!("Track {i:02}"),
                "artist": format!("Band {i:02}"),
                "reason": format!("Reason number {i}"),
            })
        })
        .collect();
    serde_json::json!({
        "playlistTitle": title,
        "playlistDescription": "Snowy streets and warm cafes",
        "coverImagePrompt": "winter city at night, jazz club neon, film grain",
        "songs": songs,
    })
    .to_string()
}

/// Text-generation fake keyed by destination: the response for a trip is
/// chosen by whichever configured destination appears in the instruction.
pub struct TextByDestination {
    routes: Vec<(String, Duration, Option<String>)>,
    calls: AtomicUsize,
}

impl TextByDestination {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Answer trips to `destination` with `json` after `delay`.
    pub fn ok(mut self, destination: &str, delay: Duration, json: String) -> Self {
        self.routes.push((destination.to_string(), delay, Some(json)));
        self
    }

    /// Fail every attempt for `destination` after `delay`.
    pub fn failing(mut self, destination: &str, delay: Duration) -> Self {
        self.routes.push((destination.to_string(), delay, None));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for TextByDestination {
    async fn generate(
        &self,
        instruction: &str,
        _schema: &serde_json::Value,
    ) -> Result<String, TextGenError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let route = self
            .routes
            .iter()
            .find(|(destination, _, _)| instruction.contains(destination.as_str()));

        match route {
            Some((_, delay, reply)) => {
                tokio::time::sleep(*delay).await;
                reply.clone().ok_or(TextGenError::NoCandidate)
            }
            None => Err(TextGenError::NoCandidate),
        }
    }
}

/// Image-generation fake replaying a script; an exhausted script keeps failing.
pub struct ImageScript {
    replies: Mutex<VecDeque<Result<Vec<Vec<u8>>, ImageGenError>>>,
    calls: AtomicUsize,
}

impl ImageScript {
    pub fn new(replies: Vec<Result<Vec<Vec<u8>>, ImageGenError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn succeeding(times: usize) -> Self {
        Self::new((0..times).map(|_| Ok(vec![PNG_SIGNATURE.to_vec()])).collect())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageGenerator for ImageScript {
    async fn generate(&self, _prompt: &str) -> Result<Vec<Vec<u8>>, ImageGenError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies.lock().pop_front().unwrap_or(Ok(Vec::new()))
    }
}

/// Place lookup fake that records queries.
pub struct Places {
    queries: Mutex<Vec<String>>,
}

impl Places {
    pub fn new() -> Self {
        Self {
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl PlaceLookup for Places {
    async fn search(&self, query: &str) -> Result<Vec<String>, LookupError> {
        self.queries.lock().push(query.to_string());
        Ok(vec![format!("{query}, Japan"), format!("{query}-shi")])
    }
}
