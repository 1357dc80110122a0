//! CorrectionStation: sends rendered subtitles through a corrector.

use crate::correction::corrector::Corrector;
use crate::correction::diff::{CueDiff, diff_cues};
use crate::srt;
use crate::types::Cue;

/// Result of one correction pass.
#[derive(Debug, Clone, PartialEq)]
pub enum CorrectionOutcome {
    /// The response was usable. Timestamps are the originals.
    Corrected { cues: Vec<Cue>, diffs: Vec<CueDiff> },
    /// The response was unusable; the caller keeps its cues.
    Fallback { reason: String },
}

impl CorrectionOutcome {
    /// Cues to keep: the corrected ones, or `original` on fallback.
    pub fn into_cues(self, original: &[Cue]) -> Vec<Cue> {
        match self {
            Self::Corrected { cues, .. } => cues,
            Self::Fallback { .. } => original.to_vec(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Render `cues` as SRT, pass them through `corrector`, and read the response back.
///
/// Empty responses, corrector errors, malformed SRT, and a changed cue count
/// all produce [`CorrectionOutcome::Fallback`]. Diffs compare against the
/// normalized text the corrector was actually shown.
pub fn correct_cues(cues: &[Cue], corrector: &mut dyn Corrector) -> CorrectionOutcome {
    if cues.is_empty() {
        return CorrectionOutcome::Corrected {
            cues: Vec::new(),
            diffs: Vec::new(),
        };
    }

    let rendered = srt::render(cues);
    let response = match corrector.correct(&rendered) {
        Ok(response) if response.trim().is_empty() => {
            return fallback(corrector.name(), "empty response".to_string());
        }
        Ok(response) => response,
        Err(e) => return fallback(corrector.name(), e.to_string()),
    };

    let parsed = match srt::parse(&response) {
        Ok(parsed) => parsed,
        Err(e) => return fallback(corrector.name(), format!("unreadable response: {e}")),
    };

    if parsed.len() != cues.len() {
        return fallback(
            corrector.name(),
            format!("expected {} cues, got {}", cues.len(), parsed.len()),
        );
    }

    let shown: Vec<Cue> = cues
        .iter()
        .map(|c| Cue::new(c.start, c.end, srt::block_text(&c.text)))
        .collect();
    let corrected: Vec<Cue> = cues
        .iter()
        .zip(&parsed)
        .map(|(orig, new)| Cue::new(orig.start, orig.end, new.text.trim()))
        .collect();
    let diffs = diff_cues(&shown, &corrected);

    log::info!(
        "{} changed {} of {} cues",
        corrector.name(),
        diffs.len(),
        cues.len()
    );

    CorrectionOutcome::Corrected {
        cues: corrected,
        diffs,
    }
}

fn fallback(name: &str, reason: String) -> CorrectionOutcome {
    log::warn!("{name} correction failed: {reason}, keeping original cues");
    CorrectionOutcome::Fallback { reason }
}

/// Pipeline stage owning a corrector.
pub struct CorrectionStation {
    corrector: Box<dyn Corrector>,
}

impl CorrectionStation {
    /// Create a new CorrectionStation with the given corrector.
    pub fn new(corrector: Box<dyn Corrector>) -> Self {
        Self { corrector }
    }

    pub fn corrector_name(&self) -> &str {
        self.corrector.name()
    }

    /// Correct `cues`, falling back to them unchanged on any failure.
    pub fn process(&mut self, cues: &[Cue]) -> CorrectionOutcome {
        correct_cues(cues, self.corrector.as_mut())
    }
}
