//! scriptcue - Script-aware subtitle generation
//!
//! Turns word-timestamped recognizer output into short subtitle cues, snaps
//! cue text to a reference script, and builds recognizer priming prompts from
//! that script.

// Enforce error handling discipline
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod align;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod correction;
pub mod defaults;
pub mod error;
pub mod lexicon;
pub mod output;
pub mod pipeline;
pub mod prompt;
pub mod segment;
pub mod srt;
pub mod text;
pub mod transcript;
pub mod types;

// Core data
pub use transcript::{Transcript, TranscriptSegment};
pub use types::{Cue, WordToken};

// Components
pub use align::{Aligner, AlignerConfig, AlignmentCursor, AlignmentSummary};
pub use lexicon::Lexicon;
pub use prompt::{PromptConfig, PromptExtractor};
pub use segment::{Segmenter, SegmenterConfig};

// Correction boundary
pub use correction::corrector::{CommandCorrector, Corrector, PassthroughCorrector};
pub use correction::station::{CorrectionOutcome, CorrectionStation, correct_cues};

// Pipeline
pub use pipeline::{PipelineOutput, SubtitlePipeline};

// Error handling
pub use error::{Result, ScriptcueError};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
