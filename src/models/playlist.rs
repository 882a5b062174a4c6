use base64::Engine;
use garde::Validate;
use image::ImageFormat;
use serde::{Deserialize, Serialize};

/// A single recommended track.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct Song {
    #[garde(length(min = 1))]
    pub title: String,

    #[garde(length(min = 1))]
    pub artist: String,

    #[garde(length(min = 1))]
    pub reason: String,
}

/// Structured playlist produced by the text-generation service.
///
/// Field names on the wire follow the response schema sent with every
/// generation request. Songs are kept in the ranked order the service returned.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct PlaylistResult {
    #[serde(rename = "playlistTitle")]
    #[garde(length(min = 1))]
    pub title: String,

    #[serde(rename = "playlistDescription")]
    #[garde(length(min = 1))]
    pub description: String,

    /// English-language instruction for the image-generation service.
    #[serde(rename = "coverImagePrompt")]
    #[garde(skip)]
    pub cover_image_prompt: String,

    #[garde(length(min = 1), dive)]
    pub songs: Vec<Song>,
}

impl PlaylistResult {
    /// Parse and validate the raw JSON text returned by the text-generation service.
    pub fn from_json(raw: &str) -> Result<Self, SchemaError> {
        let playlist: PlaylistResult = serde_json::from_str(raw)?;
        playlist.validate()?;
        Ok(playlist)
    }
}

/// Output schema attached to every playlist generation request.
pub fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "playlistTitle": { "type": "STRING" },
            "playlistDescription": { "type": "STRING" },
            "coverImagePrompt": { "type": "STRING" },
            "songs": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "artist": { "type": "STRING" },
                        "reason": { "type": "STRING" }
                    },
                    "required": ["title", "artist", "reason"]
                }
            }
        },
        "required": ["playlistTitle", "playlistDescription", "coverImagePrompt", "songs"]
    })
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Response is not valid playlist JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response is missing required playlist fields: {0}")]
    Invalid(#[from] garde::Report),
}

/// Generated cover art for a playlist.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

impl CoverImage {
    /// Wrap raw image bytes, sniffing the encoding from the payload.
    ///
    /// The image service only produces PNG, so unrecognised bytes are tagged as PNG.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let format = image::guess_format(&bytes).unwrap_or(ImageFormat::Png);
        Self { bytes, format }
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// `data:` URL suitable for direct embedding by a presentation layer.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type(),
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}
