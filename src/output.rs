//! Terminal rendering of correction diffs and run summaries.
//! Used by the `correct` and `subtitles` commands.

use crate::align::AlignmentSummary;
use crate::correction::diff::{CueDiff, DiffOp, word_diff};

const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";
const STRIKETHROUGH: &str = "\x1b[9m";

/// Render a word-level correction diff: deleted words in brackets, then the replacement.
///
/// With `color`, deletions are struck through and dimmed and insertions are green.
pub fn format_word_diff(original: &str, corrected: &str, color: bool) -> String {
    let ops = word_diff(original, corrected);
    let mut out = String::new();

    let mut first = true;
    let mut prev_was_delete = false;
    for op in &ops {
        // No space between Delete->Insert (they form a replacement pair)
        if !(first || prev_was_delete && matches!(op, DiffOp::Insert(_))) {
            out.push(' ');
        }
        first = false;
        prev_was_delete = matches!(op, DiffOp::Delete(_));
        match (op, color) {
            (DiffOp::Equal(w), _) => out.push_str(w),
            (DiffOp::Delete(w), true) => {
                out.push_str(&format!("{STRIKETHROUGH}{DIM}[{w}]{RESET}"));
            }
            (DiffOp::Delete(w), false) => out.push_str(&format!("[{w}]")),
            (DiffOp::Insert(w), true) => out.push_str(&format!("{GREEN}{w}{RESET}")),
            (DiffOp::Insert(w), false) => out.push_str(w),
        }
    }

    out
}

/// One line per changed cue, prefixed with its SRT index.
pub fn format_cue_diff(diff: &CueDiff, color: bool) -> String {
    let body = format_word_diff(&diff.original, &diff.corrected, color);
    if color {
        format!("{DIM}#{}{RESET} {body}", diff.index)
    } else {
        format!("#{} {body}", diff.index)
    }
}

/// Short human summary of an alignment run.
pub fn format_alignment_summary(summary: &AlignmentSummary) -> String {
    format!(
        "aligned {} cues to script ({} sentences, stopped at sentence {})",
        summary.substitutions, summary.sentences, summary.cursor.position
    )
}
