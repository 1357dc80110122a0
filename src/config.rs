//! Configuration file, environment overrides, and component config builders.

use crate::align::AlignerConfig;
use crate::defaults;
use crate::error::{Result, ScriptcueError};
use crate::lexicon::Lexicon;
use crate::prompt::PromptConfig;
use crate::segment::SegmenterConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub segmenter: SegmenterSection,
    pub prompt: PromptSection,
    pub alignment: AlignmentSection,
    pub correction: CorrectionSection,
}

/// Cue segmentation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SegmenterSection {
    pub char_budget: usize,
    pub force_break_marks: Vec<char>,
}

/// Priming prompt configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PromptSection {
    pub language: String,
    pub limit: usize,
    pub char_ceiling: usize,
    pub min_term_chars: usize,
    /// Added to the language's built-in stop words.
    pub extra_stop_words: Vec<String>,
    /// Replaces the language's built-in suffix list when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffixes: Option<Vec<String>>,
}

/// Script alignment configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlignmentSection {
    pub enabled: bool,
    pub window_size: usize,
    pub threshold: f64,
}

/// External correction configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CorrectionSection {
    /// Command line that reads SRT on stdin and writes corrected SRT to stdout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl Default for SegmenterSection {
    fn default() -> Self {
        Self {
            char_budget: defaults::CHAR_BUDGET,
            force_break_marks: defaults::FORCE_BREAK_MARKS.to_vec(),
        }
    }
}

impl Default for PromptSection {
    fn default() -> Self {
        Self {
            language: defaults::DEFAULT_LANGUAGE.to_string(),
            limit: defaults::PROMPT_LIMIT,
            char_ceiling: defaults::PROMPT_CHAR_CEILING,
            min_term_chars: defaults::MIN_TERM_CHARS,
            extra_stop_words: Vec::new(),
            suffixes: None,
        }
    }
}

impl Default for AlignmentSection {
    fn default() -> Self {
        Self {
            enabled: true,
            window_size: defaults::WINDOW_SIZE,
            threshold: defaults::ACCEPTANCE_THRESHOLD,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text and validate it.
    ///
    /// Missing fields use default values.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file is missing, contains invalid TOML,
    /// or holds out-of-range values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ScriptcueError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ScriptcueError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents).map_err(|e| ScriptcueError::ConfigParse {
            message: format!("{}: {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(ScriptcueError::ConfigFileNotFound { .. }) => {
                log::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - SCRIPTCUE_CHAR_BUDGET → segmenter.char_budget
    /// - SCRIPTCUE_LANGUAGE → prompt.language
    /// - SCRIPTCUE_PROMPT_LIMIT → prompt.limit
    /// - SCRIPTCUE_WINDOW_SIZE → alignment.window_size
    ///
    /// Empty values and values that do not parse as a positive number are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(budget) = env_positive("SCRIPTCUE_CHAR_BUDGET") {
            self.segmenter.char_budget = budget;
        }

        if let Ok(language) = std::env::var("SCRIPTCUE_LANGUAGE")
            && !language.is_empty()
        {
            self.prompt.language = language;
        }

        if let Some(limit) = env_positive("SCRIPTCUE_PROMPT_LIMIT") {
            self.prompt.limit = limit;
        }

        if let Some(window) = env_positive("SCRIPTCUE_WINDOW_SIZE") {
            self.alignment.window_size = window;
        }

        self
    }

    /// Check value ranges the components rely on.
    pub fn validate(&self) -> Result<()> {
        if self.segmenter.char_budget == 0 {
            return Err(invalid("segmenter.char_budget", "must be at least 1"));
        }
        if self.prompt.char_ceiling == 0 {
            return Err(invalid("prompt.char_ceiling", "must be at least 1"));
        }
        if self.alignment.window_size == 0 {
            return Err(invalid("alignment.window_size", "must be at least 1"));
        }
        if !(0.0..=100.0).contains(&self.alignment.threshold) {
            return Err(invalid(
                "alignment.threshold",
                &format!("must be between 0 and 100, got {}", self.alignment.threshold),
            ));
        }
        Ok(())
    }

    /// Serialize to TOML, as written by `config init`.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ScriptcueError::Other(e.to_string()))
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/scriptcue/config.toml on Linux, or a relative
    /// `scriptcue/config.toml` when no config directory is known.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_default()
            .join("scriptcue")
            .join("config.toml")
    }

    pub fn segmenter_config(&self) -> SegmenterConfig {
        SegmenterConfig {
            char_budget: self.segmenter.char_budget,
            force_break_marks: self.segmenter.force_break_marks.clone(),
        }
    }

    pub fn prompt_config(&self) -> PromptConfig {
        PromptConfig {
            limit: self.prompt.limit,
            char_ceiling: self.prompt.char_ceiling,
            min_term_chars: self.prompt.min_term_chars,
        }
    }

    pub fn aligner_config(&self) -> AlignerConfig {
        AlignerConfig {
            window_size: self.alignment.window_size,
            threshold: self.alignment.threshold,
        }
    }

    /// Lexicon for the configured language with the configured overrides applied.
    pub fn lexicon(&self) -> Lexicon {
        let lexicon = Lexicon::for_language(&self.prompt.language)
            .with_extra_stop_words(self.prompt.extra_stop_words.iter().cloned());
        match &self.prompt.suffixes {
            Some(suffixes) => lexicon.with_suffixes(suffixes.iter().cloned()),
            None => lexicon,
        }
    }
}

fn env_positive(key: &str) -> Option<usize> {
    let value = std::env::var(key).ok()?;
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            if !value.is_empty() {
                log::warn!("ignoring {key}={value:?}: expected a positive integer");
            }
            None
        }
    }
}

fn invalid(key: &str, message: &str) -> ScriptcueError {
    ScriptcueError::ConfigInvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
