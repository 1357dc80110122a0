//! Data types shared by the segmenter, aligner, and render boundary.

use serde::{Deserialize, Serialize};

/// The smallest timestamped unit produced by the recognizer.
///
/// `text` is kept exactly as the recognizer emitted it, including any leading
/// space and trailing punctuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordToken {
    #[serde(alias = "word")]
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

impl WordToken {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// A timestamped caption block.
///
/// Text is raw (punctuation retained) everywhere inside the pipeline; it is
/// normalized only when rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Cue {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Build a cue from a non-empty run of tokens.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_tokens(tokens: &[WordToken]) -> Option<Self> {
        let first = tokens.first()?;
        let last = tokens.last()?;
        Some(Self {
            start: first.start,
            end: last.end,
            text: tokens.iter().map(|t| t.text.as_str()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_tokens_takes_first_start_and_last_end() {
        let tokens = vec![
            WordToken::new(" 오늘은", 1.0, 1.4),
            WordToken::new(" 날씨가", 1.5, 2.0),
            WordToken::new(" 좋네요.", 2.1, 2.9),
        ];
        let cue = Cue::from_tokens(&tokens).unwrap();
        assert_eq!(cue.start, 1.0);
        assert_eq!(cue.end, 2.9);
        assert_eq!(cue.text, " 오늘은 날씨가 좋네요.");
    }

    #[test]
    fn from_tokens_empty_is_none() {
        assert!(Cue::from_tokens(&[]).is_none());
    }

    #[test]
    fn word_token_accepts_word_alias() {
        let token: WordToken =
            serde_json::from_str(r#"{"word": " hello", "start": 0.5, "end": 0.9}"#).unwrap();
        assert_eq!(token.text, " hello");
        assert_eq!(token.start, 0.5);
    }
}
