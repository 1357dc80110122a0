//! Subtitle pipeline implementation.
//!
//! Orchestrates the transcript-to-subtitle flow:
//! resegment → align (optional) → correct (optional)

use crate::align::{Aligner, AlignerConfig, AlignmentCursor, AlignmentSummary};
use crate::config::Config;
use crate::correction::corrector::{CommandCorrector, Corrector, PassthroughCorrector};
use crate::correction::station::{CorrectionOutcome, CorrectionStation};
use crate::prompt::PromptExtractor;
use crate::segment::Segmenter;
use crate::transcript::Transcript;
use crate::types::Cue;

/// Cues produced by one run, plus the alignment summary when alignment ran.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub cues: Vec<Cue>,
    pub alignment: Option<AlignmentSummary>,
}

/// Turns recognizer transcripts into subtitle cues.
#[derive(Debug, Clone)]
pub struct SubtitlePipeline {
    segmenter: Segmenter,
    aligner_config: AlignerConfig,
    align_enabled: bool,
    extractor: PromptExtractor,
}

impl SubtitlePipeline {
    pub fn new(
        segmenter: Segmenter,
        aligner_config: AlignerConfig,
        align_enabled: bool,
        extractor: PromptExtractor,
    ) -> Self {
        Self {
            segmenter,
            aligner_config,
            align_enabled,
            extractor,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Segmenter::new(config.segmenter_config()),
            config.aligner_config(),
            config.alignment.enabled,
            PromptExtractor::new(config.prompt_config(), config.lexicon()),
        )
    }

    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    pub fn align_enabled(&self) -> bool {
        self.align_enabled
    }

    /// Priming prompt for `script`, or `None` when it yields no terms.
    pub fn prompt_for(&self, script: &str) -> Option<String> {
        self.extractor.extract(script)
    }

    /// Resegment the transcript, then align against `script` when enabled.
    ///
    /// A missing or blank script skips alignment.
    pub fn run(&self, transcript: &Transcript, script: Option<&str>) -> PipelineOutput {
        let mut cues = self.segmenter.resegment(&transcript.segments);
        log::info!(
            "{} transcript segments ({} word tokens) became {} cues",
            transcript.segments.len(),
            transcript.all_words().len(),
            cues.len()
        );

        let alignment = match script {
            Some(script) if self.align_enabled => self.align(&mut cues, script),
            _ => None,
        };

        PipelineOutput { cues, alignment }
    }

    /// Align existing cues against `script` from the start of the script.
    ///
    /// Ignores the enabled flag; returns `None` for a blank script.
    pub fn align(&self, cues: &mut [Cue], script: &str) -> Option<AlignmentSummary> {
        if script.trim().is_empty() {
            return None;
        }
        let aligner = Aligner::from_script(script, self.aligner_config.clone());
        Some(aligner.align_cues(cues, AlignmentCursor::new()))
    }

    /// Send `cues` through `station`, keeping them when correction falls back.
    pub fn correct(&self, cues: &[Cue], station: &mut CorrectionStation) -> CorrectionOutcome {
        station.process(cues)
    }
}

/// Corrector for an optional command line: the command when set, passthrough otherwise.
pub fn build_corrector(command: Option<&str>) -> Box<dyn Corrector> {
    match command.and_then(CommandCorrector::from_command_line) {
        Some(corrector) => Box::new(corrector),
        None => Box::new(PassthroughCorrector),
    }
}
