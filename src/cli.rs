//! Command-line interface for scriptcue
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Script-aware subtitle generation from word-timestamped transcripts
#[derive(Parser, Debug)]
#[command(
    name = "scriptcue",
    version,
    about = "Script-aware subtitle generation from word-timestamped transcripts"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: run summaries, -vv: per-cue decisions)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default log filter for the verbosity flags; `RUST_LOG` still wins.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the recognizer priming prompt extracted from a script
    Prompt {
        /// Reference script (plain text)
        #[arg(long, value_name = "FILE")]
        script: PathBuf,

        /// Maximum number of terms (default: from config)
        #[arg(long, value_name = "N")]
        limit: Option<usize>,

        /// Lexicon language code (default: from config). Examples: ko, en
        #[arg(long, value_name = "LANG")]
        language: Option<String>,
    },

    /// Build SRT subtitles from a transcript, optionally aligned to a script
    Subtitles {
        /// Recognizer transcript (JSON with segments and word timestamps)
        #[arg(long, value_name = "FILE")]
        transcript: PathBuf,

        /// Reference script to align cue text against
        #[arg(long, value_name = "FILE")]
        script: Option<PathBuf>,

        /// Character budget per cue (default: from config)
        #[arg(long, value_name = "N")]
        max_chars: Option<usize>,

        /// Skip script alignment even when a script is given
        #[arg(long)]
        no_align: bool,

        /// Write SRT here instead of stdout
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Snap the text of an existing SRT file to a reference script
    Align {
        /// SRT file to align
        #[arg(long, value_name = "FILE")]
        srt: PathBuf,

        /// Reference script (plain text)
        #[arg(long, value_name = "FILE")]
        script: PathBuf,

        /// Write aligned SRT here instead of stdout
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Pass an SRT file through an external correction command
    Correct {
        /// SRT file to correct
        #[arg(long, value_name = "FILE")]
        srt: PathBuf,

        /// Command reading SRT on stdin and writing SRT to stdout (default: from config)
        #[arg(long, value_name = "CMD")]
        command: Option<String>,

        /// Write corrected SRT here instead of stdout
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// View and create configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
