//! Recognizer output as consumed at the ASR boundary.
//!
//! The JSON shape matches what word-timestamping Whisper front-ends emit:
//! a list of segments, each with its text and (optionally) its words.

use crate::error::Result;
use crate::types::{Cue, WordToken};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A recognizer-level segment with its constituent word tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    /// Word tokens in time order. Empty when the recognizer ran without
    /// word timestamps.
    #[serde(default)]
    pub words: Vec<WordToken>,
}

impl TranscriptSegment {
    /// The segment as a single cue, raw text and own timestamps.
    pub fn to_cue(&self) -> Cue {
        Cue::new(self.start, self.end, self.text.clone())
    }
}

/// A complete recognizer transcript.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transcript {
    /// Detected or forced language code, if the recognizer reported one.
    #[serde(default)]
    pub language: Option<String>,
    /// Audio duration in seconds, if known.
    #[serde(default)]
    pub duration: Option<f64>,
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Parse a transcript from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a transcript from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// All word tokens across segments, in order.
    pub fn all_words(&self) -> Vec<WordToken> {
        self.segments
            .iter()
            .flat_map(|s| s.words.iter().cloned())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
