//! Default configuration constants for scriptcue.
//!
//! Shared by the config layer and by the components' own `Default` impls so
//! the two never drift apart.

/// Default maximum number of visible (normalized) characters per cue.
///
/// 16 characters fits one line of Hangul subtitles on a 1080p frame.
pub const CHAR_BUDGET: usize = 16;

/// Marks that force a cue break right after the token that ends with them.
pub const FORCE_BREAK_MARKS: &[char] = &['.', '?'];

/// Default number of terms kept in the priming prompt.
pub const PROMPT_LIMIT: usize = 50;

/// Hard ceiling on the priming prompt length, in characters.
///
/// Recognizers truncate their initial prompt; keeping the whole list under
/// this ceiling means no term is cut in half on their side either.
pub const PROMPT_CHAR_CEILING: usize = 800;

/// Terms (and stems) shorter than this are dropped from the prompt.
pub const MIN_TERM_CHARS: usize = 2;

/// Default lexicon language for the prompt extractor.
pub const DEFAULT_LANGUAGE: &str = "ko";

/// Number of script sentences searched ahead of the alignment cursor.
pub const WINDOW_SIZE: usize = 20;

/// Similarity (0-100) a candidate must strictly exceed to be replaced.
pub const ACCEPTANCE_THRESHOLD: f64 = 80.0;

/// Separator between prompt terms.
pub const PROMPT_JOINER: &str = ", ";
