//! Text normalization shared by every component.
//!
//! Cue and token text stays raw inside the pipeline. Anything that measures
//! visible length, or renders text for display, goes through [`normalize`].

/// Punctuation removed by [`normalize`]: terminators, separators, and the
/// single quote mark.
pub const STRIPPED_PUNCTUATION: &[char] = &['.', '?', '!', '-', ';', ':', ',', '\''];

fn is_stripped(ch: char) -> bool {
    STRIPPED_PUNCTUATION.contains(&ch)
}

/// Remove the fixed punctuation set, then trim surrounding whitespace.
///
/// Inner whitespace and every other character (Hangul, CJK, digits, double
/// quotes, ...) are kept verbatim. Idempotent.
pub fn normalize(text: &str) -> String {
    let stripped: String = text.chars().filter(|ch| !is_stripped(*ch)).collect();
    stripped.trim().to_string()
}

/// Number of characters that would be visible after [`normalize`].
///
/// Counts Unicode scalar values, so one Hangul syllable is one character.
pub fn visible_len(text: &str) -> usize {
    normalize(text).chars().count()
}

/// Whether the raw text, ignoring trailing whitespace, ends with one of `marks`.
pub fn ends_with_any(text: &str, marks: &[char]) -> bool {
    text.trim_end()
        .chars()
        .next_back()
        .is_some_and(|ch| marks.contains(&ch))
}
