//! Per-language word tables used by the prompt extractor.
//!
//! The static catalog holds only data. [`Lexicon`] is the prepared form the
//! extractor runs against: a stop-word set and a suffix list ordered
//! longest-first, because suffix matching is greedy and the first hit wins.

use std::collections::HashSet;

/// Static stop-word and suffix tables for one language.
#[derive(Debug, Clone, PartialEq)]
pub struct LexiconInfo {
    /// Language code (e.g., "ko", "en").
    pub language: &'static str,
    /// Human-readable display name.
    pub display_name: &'static str,
    /// Discourse connectors and fillers with no value as priming terms.
    pub stop_words: &'static [&'static str],
    /// Trailing particles and endings stripped before counting.
    pub suffixes: &'static [&'static str],
}

const KO_STOP_WORDS: &[&str] = &[
    "거죠", "거예요", "그런데", "그리고", "그건", "하지만", "그래서",
];

const KO_SUFFIXES: &[&str] = &[
    // three syllables
    "에게서", "에서는", "에서도", "이라는", "이라고", "으로는", "으로도", "까지는", "까지도",
    "부터는", "부터도", "에게는", "에게도", "한테는", "한테도", "께서는", "입니다", "습니다",
    "합니다", "하고는",
    // two syllables
    "에게", "에서", "으로", "까지", "부터", "한테", "께서", "처럼", "하고", "이나", "이랑", "이라",
    "와는", "과는",
    // one syllable
    "은", "는", "이", "가", "을", "를", "의", "에", "로", "와", "과", "도", "만", "나", "랑", "야",
    "여", "라", "고",
];

const EN_STOP_WORDS: &[&str] = &[
    "the", "and", "but", "so", "then", "because", "however", "also", "this", "that", "these",
    "those", "with", "from", "into", "about", "just", "really", "actually", "basically", "okay",
    "well", "like", "you", "know", "is", "are", "was", "were", "it", "of", "to", "in", "on",
    "for", "an", "as", "at", "be", "or", "we", "they", "he", "she",
];

/// Available lexicons, ordered by language code.
pub const LEXICONS: &[LexiconInfo] = &[
    LexiconInfo {
        language: "en",
        display_name: "English",
        stop_words: EN_STOP_WORDS,
        suffixes: &[],
    },
    LexiconInfo {
        language: "ko",
        display_name: "Korean",
        stop_words: KO_STOP_WORDS,
        suffixes: KO_SUFFIXES,
    },
];

/// Look up a lexicon by language code.
pub fn get_lexicon(lang: &str) -> Option<&'static LexiconInfo> {
    LEXICONS.iter().find(|l| l.language == lang)
}

/// List all available lexicons.
pub fn list_lexicons() -> &'static [LexiconInfo] {
    LEXICONS
}

/// Check if a lexicon exists for the given language.
pub fn has_lexicon(lang: &str) -> bool {
    LEXICONS.iter().any(|l| l.language == lang)
}

/// Prepared stop words and suffixes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexicon {
    stop_words: HashSet<String>,
    /// Longest first, duplicates removed, ties in input order.
    suffixes: Vec<String>,
}

impl Lexicon {
    /// Build a lexicon from arbitrary tables.
    pub fn new<S, T>(stop_words: S, suffixes: T) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        let mut ordered: Vec<String> = Vec::new();
        for suffix in suffixes {
            let suffix = suffix.into();
            if !suffix.is_empty() && !ordered.contains(&suffix) {
                ordered.push(suffix);
            }
        }
        // Stable sort keeps input order among equal lengths.
        ordered.sort_by_key(|s| std::cmp::Reverse(s.chars().count()));

        Self {
            stop_words: stop_words.into_iter().map(Into::into).collect(),
            suffixes: ordered,
        }
    }

    /// Prepare the static tables for a catalog entry.
    pub fn from_info(info: &LexiconInfo) -> Self {
        Self::new(
            info.stop_words.iter().copied(),
            info.suffixes.iter().copied(),
        )
    }

    /// Prepared lexicon for `lang`, or an empty one when no table exists.
    pub fn for_language(lang: &str) -> Self {
        match get_lexicon(lang) {
            Some(info) => Self::from_info(info),
            None => {
                log::warn!("no lexicon for language '{lang}', using empty stop-word and suffix tables");
                Self::default()
            }
        }
    }

    /// Add stop words on top of the existing set.
    pub fn with_extra_stop_words<I>(mut self, extra: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.stop_words.extend(extra.into_iter().map(Into::into));
        self
    }

    /// Replace the suffix list, re-sorting it longest-first.
    pub fn with_suffixes<I>(self, suffixes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::new(self.stop_words, suffixes)
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Strip at most one suffix from `word`.
    ///
    /// Tries suffixes longest-first and removes the first that matches while
    /// leaving a non-empty stem. Returns `word` unchanged when none applies.
    pub fn strip_suffix<'a>(&self, word: &'a str) -> &'a str {
        for suffix in &self.suffixes {
            if let Some(stem) = word.strip_suffix(suffix.as_str())
                && !stem.is_empty()
            {
                return stem;
            }
        }
        word
    }
}
