//! Dictionary service response model.
//!
//! The service answers `GET .../entries/en/<word>` with one of two bodies:
//!
//! ```text
//! { "title": "No Definitions Found", "message": "...", "resolution": "..." }
//! [ { "word": "cat", "phonetics": [{ "audio": "https://..." }],
//!     "meanings": [{ "definitions": [{ "definition": "..." }] }] } ]
//! ```
//!
//! Bodies are validated here, once, into [`DictionaryResponse`]. Anything that
//! matches neither shape is a [`ProtocolError`].

use serde::Deserialize;
use thiserror::Error;

/// A validated service answer.
#[derive(Debug, Clone, PartialEq)]
pub enum DictionaryResponse {
    /// The service has no entry for the word. Not an error.
    NotFound(NotFound),
    /// First lexical entry of the answer.
    Found(Entry),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotFound {
    pub title: String,
    pub message: Option<String>,
}

/// The parts of the first entry that wordbook displays.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Headword as spelled by the service.
    pub word: String,
    /// First definition of the first meaning.
    pub definition: String,
    /// Audio of the first phonetic transcription, if it has a non-empty one.
    pub audio_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("response is not a dictionary body: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("response contains no entries")]
    NoEntries,
    #[error("entry {word:?} has no definition")]
    NoDefinition { word: String },
}

// ── Wire shapes ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireBody {
    NotFound(WireNotFound),
    Entries(Vec<WireEntry>),
}

#[derive(Debug, Deserialize)]
struct WireNotFound {
    title: String,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireEntry {
    word: String,
    #[serde(default)]
    phonetics: Vec<WirePhonetic>,
    meanings: Vec<WireMeaning>,
}

#[derive(Debug, Deserialize)]
struct WirePhonetic {
    #[serde(default)]
    audio: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireMeaning {
    definitions: Vec<WireDefinition>,
}

#[derive(Debug, Deserialize)]
struct WireDefinition {
    definition: String,
}

impl DictionaryResponse {
    /// Validate a raw response body.
    pub fn parse(body: &[u8]) -> Result<Self, ProtocolError> {
        match serde_json::from_slice::<WireBody>(body)? {
            WireBody::NotFound(nf) => Ok(Self::NotFound(NotFound {
                title: nf.title,
                message: nf.message,
            })),
            WireBody::Entries(entries) => {
                let first = entries.into_iter().next().ok_or(ProtocolError::NoEntries)?;
                let definition = first
                    .meanings
                    .into_iter()
                    .next()
                    .and_then(|m| m.definitions.into_iter().next())
                    .map(|d| d.definition)
                    .ok_or_else(|| ProtocolError::NoDefinition {
                        word: first.word.clone(),
                    })?;
                let audio_url = first
                    .phonetics
                    .into_iter()
                    .next()
                    .and_then(|p| p.audio)
                    .filter(|a| !a.is_empty());
                Ok(Self::Found(Entry {
                    word: first.word,
                    definition,
                    audio_url,
                }))
            }
        }
    }
}
