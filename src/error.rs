//! Error types for scriptcue.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptcueError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Input errors
    #[error("Failed to parse transcript: {0}")]
    TranscriptParse(#[from] serde_json::Error),

    #[error("Malformed SRT at line {line}: {message}")]
    SrtParse { line: usize, message: String },

    // Correction boundary errors
    #[error("Correction command not found: {command}")]
    CorrectorNotFound { command: String },

    #[error("Correction failed: {message}")]
    Correction { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, ScriptcueError>;
