//! Priming-prompt extraction from a reference script.
//!
//! Reduces a script to a short, comma-joined list of its most frequent terms
//! so the recognizer is biased toward names and jargon the script uses.
//! Particles attached to nouns are stripped first, otherwise "학교에서",
//! "학교는" and "학교가" would be counted as three different words.

use crate::defaults;
use crate::lexicon::Lexicon;
use std::collections::HashMap;

/// Configuration for the prompt extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptConfig {
    /// Maximum number of terms considered.
    pub limit: usize,
    /// Hard ceiling on the joined prompt length, in characters.
    pub char_ceiling: usize,
    /// Words and stems shorter than this are dropped.
    pub min_term_chars: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            limit: defaults::PROMPT_LIMIT,
            char_ceiling: defaults::PROMPT_CHAR_CEILING,
            min_term_chars: defaults::MIN_TERM_CHARS,
        }
    }
}

/// A distinct stripped term and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTerm {
    pub surface: String,
    pub frequency: usize,
}

/// Builds priming prompts from scripts.
#[derive(Debug, Clone)]
pub struct PromptExtractor {
    config: PromptConfig,
    lexicon: Lexicon,
}

impl PromptExtractor {
    pub fn new(config: PromptConfig, lexicon: Lexicon) -> Self {
        Self { config, lexicon }
    }

    /// Extractor with default limits and the lexicon for `language`.
    pub fn for_language(language: &str) -> Self {
        Self::new(PromptConfig::default(), Lexicon::for_language(language))
    }

    pub fn config(&self) -> &PromptConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Count stripped terms, most frequent first.
    ///
    /// Equal frequencies keep first-seen order. Not limited: callers take
    /// as many as they need.
    pub fn rank_terms(&self, script: &str) -> Vec<PromptTerm> {
        let min = self.config.min_term_chars;
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();

        for word in word_runs(script) {
            if word.chars().count() < min || self.lexicon.is_stop_word(word) {
                continue;
            }
            let stem = self.lexicon.strip_suffix(word);
            if stem.chars().count() < min {
                continue;
            }
            let count = counts.entry(stem).or_insert(0);
            if *count == 0 {
                order.push(stem);
            }
            *count += 1;
        }

        let mut terms: Vec<PromptTerm> = order
            .into_iter()
            .map(|stem| PromptTerm {
                surface: stem.to_string(),
                frequency: counts.get(stem).copied().unwrap_or(0),
            })
            .collect();
        // Stable: first-seen order survives among equal counts.
        terms.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        terms
    }

    /// The top `limit` terms that fit under the character ceiling.
    ///
    /// Each accepted term reserves its length plus the joiner; the first term
    /// that would overflow stops the list, so no term is ever cut short.
    pub fn select_terms(&self, script: &str) -> Vec<PromptTerm> {
        let joiner_len = defaults::PROMPT_JOINER.chars().count();
        let mut used = 0;
        let mut selected = Vec::new();

        for term in self.rank_terms(script).into_iter().take(self.config.limit) {
            let cost = term.surface.chars().count() + joiner_len;
            if used + cost > self.config.char_ceiling {
                log::debug!(
                    "prompt ceiling of {} chars reached after {} terms",
                    self.config.char_ceiling,
                    selected.len()
                );
                break;
            }
            used += cost;
            selected.push(term);
        }

        selected
    }

    /// The priming prompt for `script`, or `None` when it yields no terms.
    pub fn extract(&self, script: &str) -> Option<String> {
        if script.trim().is_empty() {
            return None;
        }
        let terms = self.select_terms(script);
        if terms.is_empty() {
            return None;
        }
        log::info!("extracted {} prompt terms", terms.len());
        Some(
            terms
                .iter()
                .map(|t| t.surface.as_str())
                .collect::<Vec<_>>()
                .join(defaults::PROMPT_JOINER),
        )
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Maximal runs of word characters (letters of any script, digits, `_`).
fn word_runs(text: &str) -> impl Iterator<Item = &str> {
    text.split(|ch: char| !is_word_char(ch))
        .filter(|run| !run.is_empty())
}
