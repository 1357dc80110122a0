//! End-to-end tests: transcript JSON in, SRT out.

use scriptcue::config::Config;
use scriptcue::correction::corrector::{Corrector, PassthroughCorrector};
use scriptcue::correction::station::{CorrectionOutcome, correct_cues};
use scriptcue::pipeline::SubtitlePipeline;
use scriptcue::srt;
use scriptcue::text;
use scriptcue::transcript::Transcript;
use std::io::Write;
use tempfile::NamedTempFile;

const TRANSCRIPT_JSON: &str = r#"{
  "language": "ko",
  "duration": 9.0,
  "segments": [
    {
      "start": 0.0,
      "end": 1.2,
      "text": " 안녕하세요.",
      "words": [ { "word": " 안녕하세요.", "start": 0.0, "end": 1.2 } ]
    },
    {
      "start": 1.4,
      "end": 6.0,
      "text": " 저는 김민종입니다. 오늘은 날씨가 정말 좋네요.",
      "words": [
        { "word": " 저는", "start": 1.4, "end": 1.8 },
        { "word": " 김민종입니다.", "start": 1.8, "end": 2.9 },
        { "word": " 오늘은", "start": 3.1, "end": 3.6 },
        { "word": " 날씨가", "start": 3.6, "end": 4.2 },
        { "word": " 정말", "start": 4.2, "end": 4.8 },
        { "word": " 좋네요.", "start": 4.8, "end": 6.0 }
      ]
    },
    {
      "start": 6.5,
      "end": 9.0,
      "text": " 이 문장은 대본에 전혀 없는 완전히 다른 이야기입니다"
    }
  ]
}"#;

const SCRIPT: &str = "안녕하세요. 저는 김민중입니다.\n오늘은 날씨가 정말 좋네요!";

fn load_transcript() -> Transcript {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(TRANSCRIPT_JSON.as_bytes()).unwrap();
    Transcript::load(file.path()).unwrap()
}

#[test]
fn transcript_to_aligned_srt() {
    let transcript = load_transcript();
    assert_eq!(transcript.language.as_deref(), Some("ko"));
    assert_eq!(transcript.all_words().len(), 7);

    let pipeline = SubtitlePipeline::from_config(&Config::default());
    let output = pipeline.run(&transcript, Some(SCRIPT));

    let texts: Vec<&str> = output.cues.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "안녕하세요",
            "저는 김민중입니다",
            "오늘은 날씨가 정말 좋네요",
            " 이 문장은 대본에 전혀 없는 완전히 다른 이야기입니다",
        ]
    );

    let summary = output.alignment.unwrap();
    assert_eq!(summary.substitutions, 3);
    assert_eq!(summary.cursor.position, 3);

    let rendered = srt::render(&output.cues);
    assert!(rendered.starts_with("1\n00:00:00,000 --> 00:00:01,200\n안녕하세요\n\n"));
    assert!(rendered.contains("2\n00:00:01,400 --> 00:00:02,900\n저는 김민중입니다\n\n"));
    assert!(rendered.contains("3\n00:00:03,100 --> 00:00:06,000\n오늘은 날씨가 정말 좋네요\n\n"));
    assert!(rendered.contains("4\n00:00:06,500 --> 00:00:09,000\n"));
}

#[test]
fn cues_respect_budget_when_words_are_available() {
    let mut config = Config::default();
    config.segmenter.char_budget = 8;
    let pipeline = SubtitlePipeline::from_config(&config);
    let output = pipeline.run(&load_transcript(), None);

    // The last segment has no word timestamps and stays whole.
    let (last, rest) = output.cues.split_last().unwrap();
    assert!(text::visible_len(&last.text) > 8);
    for cue in rest {
        assert!(
            text::visible_len(&cue.text) <= 8,
            "cue over budget: {:?}",
            cue.text
        );
    }
}

#[test]
fn srt_survives_passthrough_correction() {
    let pipeline = SubtitlePipeline::from_config(&Config::default());
    let output = pipeline.run(&load_transcript(), Some(SCRIPT));

    let mut corrector = PassthroughCorrector;
    assert_eq!(corrector.name(), "passthrough");
    match correct_cues(&output.cues, &mut corrector) {
        CorrectionOutcome::Corrected { cues, diffs } => {
            assert!(diffs.is_empty(), "unexpected diffs: {diffs:?}");
            assert_eq!(srt::render(&cues), srt::render(&output.cues));
        }
        CorrectionOutcome::Fallback { reason } => panic!("unexpected fallback: {reason}"),
    }
}

#[test]
fn rendered_srt_parses_back() {
    let pipeline = SubtitlePipeline::from_config(&Config::default());
    let output = pipeline.run(&load_transcript(), None);
    let parsed = srt::parse(&srt::render(&output.cues)).unwrap();

    assert_eq!(parsed.len(), output.cues.len());
    for (parsed, original) in parsed.iter().zip(&output.cues) {
        assert!((parsed.start - original.start).abs() < 1e-9);
        assert!((parsed.end - original.end).abs() < 1e-9);
        assert_eq!(parsed.text, text::normalize(&original.text));
    }
}

#[test]
fn prompt_from_script_file_config() {
    let mut config_file = NamedTempFile::new().unwrap();
    config_file
        .write_all("[prompt]\nlimit = 2\nextra_stop_words = [\"정말\"]\n".as_bytes())
        .unwrap();
    let config = Config::load(config_file.path()).unwrap();
    assert_eq!(config.prompt.extra_stop_words, vec!["정말"]);

    let pipeline = SubtitlePipeline::from_config(&config);
    let prompt = pipeline
        .prompt_for("정말 정말 정말 학교에서 학교가 학교는 선생님은 선생님이 학생")
        .unwrap();
    assert_eq!(prompt, "학교, 선생님");
}
