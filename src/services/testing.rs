//! Scripted in-memory stand-ins for the external services.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use chrono::NaiveDate;
use parking_lot::Mutex;

use crate::models::trip::{Activity, Genre, TripRequest};
use crate::services::image_generation::{ImageGenError, ImageGenerator};
use crate::services::place_lookup::{LookupError, PlaceLookup};
use crate::services::text_generation::{TextGenError, TextGenerator};

pub(crate) const PNG_1X1: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

pub(crate) fn png_bytes() -> Vec<u8> {
    base64::engine::general_purpose::STANDARD
        .decode(PNG_1X1)
        .unwrap()
}

pub(crate) fn sample_trip() -> TripRequest {
    TripRequest {
        destination: "Jeju Island".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 8, 10),
        end_date: NaiveDate::from_ymd_opt(2026, 8, 14),
        activities: vec![Activity::Relax, Activity::Nature],
        genres: vec![Genre::Kpop, Genre::Lofi],
    }
}

pub(crate) fn playlist_json(title: &str, song_count: usize) -> String {
    let songs: Vec<serde_json::Value> = (1..=song_count)
        .map(|i| {
            serde_json::json!({
                "title": format!("{title} track {i}"),
                "artist": format!("Artist {i}"),
                "reason": "fits the sea breeze",
            })
        })
        .collect();
    serde_json::json!({
        "playlistTitle": title,
        "playlistDescription": format!("{title} description"),
        "coverImagePrompt": format!("album art for {title}"),
        "songs": songs,
    })
    .to_string()
}

/// Replays a fixed script, then either repeats a success or keeps failing.
pub(crate) struct ScriptedText {
    script: Mutex<VecDeque<Result<String, TextGenError>>>,
    repeat: Option<String>,
    delays: Mutex<VecDeque<Duration>>,
    calls: AtomicUsize,
    last_schema: Mutex<Option<serde_json::Value>>,
}

impl ScriptedText {
    pub(crate) fn new(script: Vec<Result<String, TextGenError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            repeat: None,
            delays: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            last_schema: Mutex::new(None),
        }
    }

    pub(crate) fn always_ok(json: impl Into<String>) -> Self {
        Self {
            repeat: Some(json.into()),
            ..Self::new(vec![])
        }
    }

    pub(crate) fn failing() -> Self {
        Self::new(vec![])
    }

    /// Sleep for the given durations on successive calls before answering.
    pub(crate) fn with_delays(self, delays: Vec<Duration>) -> Self {
        *self.delays.lock() = delays.into();
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_schema(&self) -> Option<serde_json::Value> {
        self.last_schema.lock().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedText {
    async fn generate(
        &self,
        _instruction: &str,
        schema: &serde_json::Value,
    ) -> Result<String, TextGenError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_schema.lock() = Some(schema.clone());

        let delay = self.delays.lock().pop_front();
        let reply = self.script.lock().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Some(reply) => reply,
            None => match &self.repeat {
                Some(json) => Ok(json.clone()),
                None => Err(TextGenError::Status {
                    status: 503,
                    body: "model overloaded".to_string(),
                }),
            },
        }
    }
}

/// Image counterpart of [`ScriptedText`].
pub(crate) struct ScriptedImages {
    script: Mutex<VecDeque<Result<Vec<Vec<u8>>, ImageGenError>>>,
    repeat: Option<Vec<Vec<u8>>>,
    delays: Mutex<VecDeque<Duration>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedImages {
    pub(crate) fn new(script: Vec<Result<Vec<Vec<u8>>, ImageGenError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            repeat: None,
            delays: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn always_ok(images: Vec<Vec<u8>>) -> Self {
        Self {
            repeat: Some(images),
            ..Self::new(vec![])
        }
    }

    pub(crate) fn failing() -> Self {
        Self::new(vec![])
    }

    pub(crate) fn with_delays(self, delays: Vec<Duration>) -> Self {
        *self.delays.lock() = delays.into();
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl ImageGenerator for ScriptedImages {
    async fn generate(&self, prompt: &str) -> Result<Vec<Vec<u8>>, ImageGenError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(prompt.to_string());

        let delay = self.delays.lock().pop_front();
        let reply = self.script.lock().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Some(reply) => reply,
            None => match &self.repeat {
                Some(images) => Ok(images.clone()),
                None => Err(ImageGenError::Status {
                    status: 500,
                    body: "internal error".to_string(),
                }),
            },
        }
    }
}

/// Records every query; answers with `"{query}, Somewhere"` unless told to fail.
pub(crate) struct RecordingLookup {
    queries: Mutex<Vec<String>>,
    fail: bool,
    delay: Option<Duration>,
}

impl RecordingLookup {
    pub(crate) fn new() -> Self {
        Self {
            queries: Mutex::new(Vec::new()),
            fail: false,
            delay: None,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub(crate) fn with_delay(self, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..self
        }
    }

    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl PlaceLookup for RecordingLookup {
    async fn search(&self, query: &str) -> Result<Vec<String>, LookupError> {
        self.queries.lock().push(query.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(LookupError::Status(503));
        }
        Ok(vec![
            format!("{query}, Somewhere"),
            format!("{query}, Elsewhere"),
        ])
    }
}
