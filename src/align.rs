//! Sliding-window alignment of transcribed cues against a reference script.
//!
//! The script is split into sentences once. Each cue is fuzzy-matched only
//! against a bounded window of sentences starting at the cursor; a good
//! enough match replaces the cue text with the script sentence and moves the
//! cursor past it. A poor match changes nothing, so the same window is tried
//! again for the next cue.
//!
//! The window keeps a noisy cue from jumping to a coincidentally similar
//! sentence far away. The price: after a skipped stretch longer than the
//! window, alignment cannot recover.

use crate::defaults;
use crate::types::Cue;

/// Position in the script sentence list. Only ever moves forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct AlignmentCursor {
    pub position: usize,
}

impl AlignmentCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// No match committed yet.
    pub fn is_unanchored(&self) -> bool {
        self.position == 0
    }
}

/// Configuration for the aligner.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignerConfig {
    /// Number of sentences searched from the cursor.
    pub window_size: usize,
    /// Score (0-100) a match must strictly exceed to be accepted.
    pub threshold: f64,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            window_size: defaults::WINDOW_SIZE,
            threshold: defaults::ACCEPTANCE_THRESHOLD,
        }
    }
}

/// Result of aligning one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// Script sentence on a match, otherwise the candidate unchanged.
    pub text: String,
    /// Cursor to pass to the next call.
    pub cursor: AlignmentCursor,
    /// Absolute sentence index and score of the accepted match.
    pub matched: Option<(usize, f64)>,
}

/// Outcome of aligning a whole cue list.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentSummary {
    pub cursor: AlignmentCursor,
    pub substitutions: usize,
    pub sentences: usize,
}

/// Split a reference script into sentences.
///
/// Splits on runs of `.`, `?`, `!` and on newlines, trims every fragment and
/// drops empty ones.
pub fn split_sentences(script: &str) -> Vec<String> {
    script
        .split(|ch: char| matches!(ch, '.' | '?' | '!' | '\n'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalized indel similarity of two strings on a 0-100 scale.
///
/// `100 * (1 - (insertions + deletions) / (len_a + len_b))` over chars, which
/// equals `200 * lcs / (len_a + len_b)`. Two empty strings score 100.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(&a, &b) as f64 / total as f64
}

/// Length of the longest common subsequence, two-row table.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let n = b.len();
    let mut prev = vec![0usize; n + 1];
    let mut curr = vec![0usize; n + 1];

    for ca in a {
        for j in 1..=n {
            curr[j] = if *ca == b[j - 1] {
                prev[j - 1] + 1
            } else {
                prev[j].max(curr[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Matches candidate texts against script sentences, window by window.
#[derive(Debug, Clone)]
pub struct Aligner {
    sentences: Vec<String>,
    config: AlignerConfig,
}

impl Aligner {
    pub fn new(sentences: Vec<String>, config: AlignerConfig) -> Self {
        Self { sentences, config }
    }

    /// Aligner over `script` split into sentences.
    pub fn from_script(script: &str, config: AlignerConfig) -> Self {
        Self::new(split_sentences(script), config)
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn config(&self) -> &AlignerConfig {
        &self.config
    }

    /// Sentences searched for a cursor at `cursor`.
    pub fn window(&self, cursor: AlignmentCursor) -> &[String] {
        let start = cursor.position.min(self.sentences.len());
        let end = start
            .saturating_add(self.config.window_size)
            .min(self.sentences.len());
        &self.sentences[start..end]
    }

    /// Align one candidate text.
    ///
    /// On a score above the threshold returns the sentence text and a cursor
    /// one past the match; otherwise returns `candidate` and `cursor` as given.
    pub fn align(&self, candidate: &str, cursor: AlignmentCursor) -> Alignment {
        let unchanged = Alignment {
            text: candidate.to_string(),
            cursor,
            matched: None,
        };

        let window = self.window(cursor);
        // Highest score wins, earliest sentence on ties.
        let mut best: Option<(usize, f64)> = None;
        for (i, sentence) in window.iter().enumerate() {
            let score = similarity(candidate, sentence);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((i, score));
            }
        }

        let Some((offset, score)) = best else {
            return unchanged;
        };

        if score > self.config.threshold {
            let index = cursor.position + offset;
            log::debug!("aligned {candidate:?} to sentence {index} (score {score:.1})");
            Alignment {
                text: window[offset].clone(),
                cursor: AlignmentCursor {
                    position: index + 1,
                },
                matched: Some((index, score)),
            }
        } else {
            log::trace!("no match for {candidate:?} (best score {score:.1})");
            unchanged
        }
    }

    /// Align every cue in order, threading the cursor through.
    ///
    /// Timestamps are never touched; only cue text may be replaced.
    pub fn align_cues(&self, cues: &mut [Cue], cursor: AlignmentCursor) -> AlignmentSummary {
        let mut cursor = cursor;
        let mut substitutions = 0;

        for cue in cues.iter_mut() {
            let result = self.align(cue.text.trim(), cursor);
            if result.matched.is_some() {
                cue.text = result.text;
                substitutions += 1;
            }
            cursor = result.cursor;
        }

        log::info!(
            "aligned {substitutions}/{} cues against {} script sentences",
            cues.len(),
            self.sentences.len()
        );

        AlignmentSummary {
            cursor,
            substitutions,
            sentences: self.sentences.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = "1. 안녕하세요.
    2. 저는 김민중입니다.
    3. 오늘은 날씨가 좋네요.
    4. 내일도 좋을까요?
    5. 아마 그럴겁니다.";

    fn aligner(window_size: usize) -> Aligner {
        Aligner::new(
            split_sentences("안녕하세요. 저는 김민중입니다.\n오늘은 날씨가 좋네요. 내일도 좋을까요? 아마 그럴겁니다."),
            AlignerConfig {
                window_size,
                threshold: 80.0,
            },
        )
    }

    #[test]
    fn split_on_terminators_and_newlines() {
        let sentences = split_sentences(
            "안녕하세요! 저는 김민중입니다. \n    오늘은 날씨가 참 좋네요? 그렇죠!\n    내일은 비가 올까요.",
        );
        assert_eq!(
            sentences,
            vec![
                "안녕하세요",
                "저는 김민중입니다",
                "오늘은 날씨가 참 좋네요",
                "그렇죠",
                "내일은 비가 올까요",
            ]
        );
    }

    #[test]
    fn split_discards_empty_fragments() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("...\n\n?!").is_empty());
        assert_eq!(split_sentences("하나...둘?!"), vec!["하나", "둘"]);
    }

    #[test]
    fn numbered_script_keeps_numbers_as_fragments() {
        let sentences = split_sentences(SCRIPT);
        assert_eq!(sentences[0], "1");
        assert_eq!(sentences[1], "안녕하세요");
    }

    #[test]
    fn similarity_bounds() {
        assert_eq!(similarity("같다", "같다"), 100.0);
        assert_eq!(similarity("", ""), 100.0);
        assert_eq!(similarity("abc", ""), 0.0);
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn similarity_matches_indel_ratio() {
        // lcs("kitten", "sitting") = 4 ("ittn"), 200 * 4 / 13
        let score = similarity("kitten", "sitting");
        assert!((score - 61.538).abs() < 0.01, "got {score}");
    }

    #[test]
    fn exact_match_advances_past_sentence() {
        let aligner = aligner(2);
        let result = aligner.align("안녕하세요", AlignmentCursor::new());
        assert_eq!(result.text, "안녕하세요");
        assert_eq!(result.cursor.position, 1);
        assert_eq!(result.matched.map(|(i, _)| i), Some(0));
    }

    #[test]
    fn fuzzy_match_substitutes_script_text() {
        let aligner = aligner(5);
        let result = aligner.align("오늘은 날씨가 좋내요", AlignmentCursor::new());
        assert_eq!(result.text, "오늘은 날씨가 좋네요");
        assert_eq!(result.cursor.position, 3);
    }

    #[test]
    fn skipping_within_window() {
        let aligner = aligner(2);
        let first = aligner.align("안녕하세요", AlignmentCursor::new());
        // Window at 1 is ["저는 김민중입니다", "오늘은 날씨가 좋네요"].
        let second = aligner.align("오늘은 날씨가 좋네요", first.cursor);
        assert_eq!(second.text, "오늘은 날씨가 좋네요");
        assert_eq!(second.cursor.position, 3);
    }

    #[test]
    fn sentences_behind_cursor_are_not_matched() {
        let aligner = aligner(2);
        let cursor = AlignmentCursor { position: 3 };
        let result = aligner.align("저는 김민중입니다", cursor);
        assert_eq!(result.text, "저는 김민중입니다");
        assert_eq!(result.cursor, cursor);
        assert!(result.matched.is_none());
    }

    #[test]
    fn sentences_beyond_window_are_not_matched() {
        let aligner = aligner(1);
        let result = aligner.align("아마 그럴겁니다", AlignmentCursor::new());
        assert!(result.matched.is_none());
        assert_eq!(result.cursor.position, 0);
    }

    #[test]
    fn poor_match_leaves_text_and_cursor() {
        let aligner = aligner(20);
        let cursor = AlignmentCursor { position: 1 };
        let result = aligner.align("완전히 다른 문장", cursor);
        assert_eq!(result.text, "완전히 다른 문장");
        assert_eq!(result.cursor, cursor);
    }

    #[test]
    fn score_equal_to_threshold_is_rejected() {
        // "abcd" vs "abcdx": 200 * 4 / 9 = 88.9; threshold set exactly there.
        let score = similarity("abcd", "abcdx");
        let aligner = Aligner::new(
            vec!["abcdx".to_string()],
            AlignerConfig {
                window_size: 5,
                threshold: score,
            },
        );
        let result = aligner.align("abcd", AlignmentCursor::new());
        assert!(result.matched.is_none());
    }

    #[test]
    fn exhausted_script_returns_input_unchanged() {
        let aligner = aligner(20);
        let end = AlignmentCursor {
            position: aligner.sentences().len(),
        };
        for candidate in ["안녕하세요", "아마 그럴겁니다", ""] {
            let result = aligner.align(candidate, end);
            assert_eq!(result.text, candidate);
            assert_eq!(result.cursor, end);
        }
    }

    #[test]
    fn empty_script_never_matches() {
        let aligner = Aligner::from_script("", AlignerConfig::default());
        let result = aligner.align("아무거나", AlignmentCursor::new());
        assert_eq!(result.text, "아무거나");
        assert!(result.cursor.is_unanchored());
    }

    #[test]
    fn cursor_is_monotonic_and_bounded() {
        let aligner = aligner(3);
        let candidates = [
            "안녕하세요",
            "잡음",
            "저는 김민중입니다",
            "안녕하세요",
            "오늘은 날씨가 좋네요",
            "내일도 좋을까요",
            "아마 그럴겁니다",
            "아마 그럴겁니다",
        ];
        let mut cursor = AlignmentCursor::new();
        for candidate in candidates {
            let next = aligner.align(candidate, cursor).cursor;
            assert!(next >= cursor, "cursor went backwards: {cursor:?} -> {next:?}");
            assert!(next.position <= aligner.sentences().len());
            cursor = next;
        }
        assert_eq!(cursor.position, aligner.sentences().len());
    }

    #[test]
    fn align_cues_replaces_text_and_keeps_timing() {
        let aligner = aligner(20);
        let mut cues = vec![
            Cue::new(0.0, 1.0, " 안녕하세요."),
            Cue::new(1.0, 2.0, " 잡음 잡음"),
            Cue::new(2.0, 3.0, " 저는 김민중 입니다"),
        ];
        let summary = aligner.align_cues(&mut cues, AlignmentCursor::new());
        assert_eq!(cues[0].text, "안녕하세요");
        assert_eq!(cues[1].text, " 잡음 잡음");
        assert_eq!(cues[2].text, "저는 김민중입니다");
        assert_eq!(cues[2].start, 2.0);
        assert_eq!(cues[2].end, 3.0);
        assert_eq!(summary.substitutions, 2);
        assert_eq!(summary.cursor.position, 2);
        assert_eq!(summary.sentences, 5);
    }
}
