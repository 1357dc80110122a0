//! Word-stream segmentation: packs timestamped word tokens into cues.
//!
//! Cues are closed when the next token would push the visible length over
//! the character budget, or right after a token ending in a force-break mark
//! (sentence end). The force-break rule wins over the budget, so a cue may be
//! shorter than the budget. Tokens are never split, so a single token longer
//! than the budget still becomes its own cue.
//!
//! Token order is trusted: out-of-order timestamps produce cues with inverted
//! or overlapping ranges rather than an error.

use crate::defaults;
use crate::text;
use crate::transcript::TranscriptSegment;
use crate::types::{Cue, WordToken};
use std::ops::Range;

/// Configuration for the segmenter.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmenterConfig {
    /// Maximum visible characters per cue (after normalization).
    pub char_budget: usize,
    /// A cue is closed right after a token whose raw text ends with one of these.
    pub force_break_marks: Vec<char>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            char_budget: defaults::CHAR_BUDGET,
            force_break_marks: defaults::FORCE_BREAK_MARKS.to_vec(),
        }
    }
}

/// Splits word-token streams into budget-bounded cues.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Segmenter with the given budget and the default force-break marks.
    pub fn with_budget(char_budget: usize) -> Self {
        Self::new(SegmenterConfig {
            char_budget,
            ..SegmenterConfig::default()
        })
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Whether already-grouped raw text fits the budget as is.
    pub fn fits(&self, raw_text: &str) -> bool {
        text::visible_len(raw_text) <= self.config.char_budget
    }

    /// Partition `tokens` into contiguous index ranges, one per cue.
    ///
    /// The ranges cover `0..tokens.len()` in order with no gaps or overlap.
    pub fn group_ranges(&self, tokens: &[WordToken]) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let mut group_start = 0;
        // Shape of the open group's punctuation-stripped text, kept as counts
        // so each append costs only the new token's length.
        let mut group = Span::default();

        for (i, token) in tokens.iter().enumerate() {
            let token_span = Span::of(&strip_punctuation(&token.text));

            if i > group_start {
                let candidate_len = group.join(token_span).visible_len();
                let over_budget = candidate_len > self.config.char_budget;
                let sentence_end =
                    text::ends_with_any(&tokens[i - 1].text, &self.config.force_break_marks);

                if over_budget || sentence_end {
                    log::trace!(
                        "closing cue at token {i}: over_budget={over_budget} sentence_end={sentence_end}"
                    );
                    ranges.push(group_start..i);
                    group_start = i;
                    group = Span::default();
                }
            }

            group = group.join(token_span);
        }

        if group_start < tokens.len() {
            ranges.push(group_start..tokens.len());
        }

        ranges
    }

    /// Pack an ordered token stream into cues. Empty input yields no cues.
    pub fn segment(&self, tokens: &[WordToken]) -> Vec<Cue> {
        self.group_ranges(tokens)
            .into_iter()
            .filter_map(|range| Cue::from_tokens(&tokens[range]))
            .collect()
    }

    /// Apply the whole-cue fallback over recognizer segments.
    ///
    /// Segments whose text already fits the budget pass through unchanged.
    /// Longer segments are re-segmented from their own word tokens; a long
    /// segment without tokens has nothing to split on and passes through too.
    pub fn resegment(&self, segments: &[TranscriptSegment]) -> Vec<Cue> {
        let mut cues = Vec::with_capacity(segments.len());

        for segment in segments {
            if self.fits(&segment.text) {
                cues.push(segment.to_cue());
            } else if segment.words.is_empty() {
                log::debug!(
                    "segment at {:.2}s exceeds {} chars but has no word timestamps, keeping it whole",
                    segment.start,
                    self.config.char_budget
                );
                cues.push(segment.to_cue());
            } else {
                let split = self.segment(&segment.words);
                log::debug!(
                    "segment at {:.2}s split into {} cues",
                    segment.start,
                    split.len()
                );
                cues.extend(split);
            }
        }

        cues
    }
}

fn strip_punctuation(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !text::STRIPPED_PUNCTUATION.contains(ch))
        .collect()
}

/// Character counts of a string: total, leading whitespace, trailing whitespace.
///
/// An all-whitespace span has `leading == trailing == len`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Span {
    len: usize,
    leading: usize,
    trailing: usize,
}

impl Span {
    fn of(s: &str) -> Self {
        let len = s.chars().count();
        let leading = s.chars().take_while(|c| c.is_whitespace()).count();
        let trailing = if leading == len {
            len
        } else {
            s.chars().rev().take_while(|c| c.is_whitespace()).count()
        };
        Self {
            len,
            leading,
            trailing,
        }
    }

    fn is_blank(&self) -> bool {
        self.leading == self.len
    }

    /// Span of the concatenation `self + next`.
    fn join(self, next: Span) -> Self {
        Self {
            len: self.len + next.len,
            leading: if self.is_blank() {
                self.len + next.leading
            } else {
                self.leading
            },
            trailing: if next.is_blank() {
                next.len + self.trailing
            } else {
                next.trailing
            },
        }
    }

    /// Length once leading and trailing whitespace are trimmed.
    fn visible_len(&self) -> usize {
        if self.is_blank() {
            0
        } else {
            self.len - self.leading - self.trailing
        }
    }
}
