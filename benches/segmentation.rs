use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use scriptcue::align::{Aligner, AlignerConfig, AlignmentCursor};
use scriptcue::prompt::PromptExtractor;
use scriptcue::segment::Segmenter;
use scriptcue::types::{Cue, WordToken};
use std::hint::black_box;

const WORDS: &[&str] = &[
    "오늘은", "날씨가", "정말", "좋네요.", "우리는", "학교에서", "공부를", "합니다.", "내일도",
    "좋을까요?", "아마", "그럴겁니다.",
];

/// Synthetic token stream of `n` words, 0.4 s apart.
fn token_stream(n: usize) -> Vec<WordToken> {
    (0..n)
        .map(|i| {
            let start = i as f64 * 0.4;
            WordToken::new(format!(" {}", WORDS[i % WORDS.len()]), start, start + 0.35)
        })
        .collect()
}

fn script(sentences: usize) -> String {
    (0..sentences)
        .map(|i| format!("문장 번호 {i} 입니다. "))
        .collect()
}

fn bench_segment(c: &mut Criterion) {
    let segmenter = Segmenter::default();
    let mut group = c.benchmark_group("segment");
    for n in [100, 1_000, 10_000] {
        let tokens = token_stream(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &tokens, |b, tokens| {
            b.iter(|| segmenter.segment(black_box(tokens)))
        });
    }
    group.finish();
}

/// One open group the whole way: no sentence marks, no budget closes.
fn bench_segment_unbounded(c: &mut Criterion) {
    let segmenter = Segmenter::with_budget(usize::MAX);
    let mut group = c.benchmark_group("segment_unbounded");
    for n in [1_000, 10_000, 100_000] {
        let tokens: Vec<WordToken> = (0..n)
            .map(|i| WordToken::new(" 가", i as f64, i as f64 + 0.5))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &tokens, |b, tokens| {
            b.iter(|| segmenter.group_ranges(black_box(tokens)))
        });
    }
    group.finish();
}

fn bench_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("align_cues");
    for sentences in [100, 1_000] {
        let aligner = Aligner::from_script(&script(sentences), AlignerConfig::default());
        let cues: Vec<Cue> = (0..sentences)
            .map(|i| Cue::new(i as f64, i as f64 + 1.0, format!("문장 번호 {i} 임니다")))
            .collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(sentences),
            &cues,
            |b, cues| {
                b.iter(|| {
                    let mut cues = cues.clone();
                    aligner.align_cues(black_box(&mut cues), AlignmentCursor::new())
                })
            },
        );
    }
    group.finish();
}

fn bench_prompt(c: &mut Criterion) {
    let extractor = PromptExtractor::for_language("ko");
    let text: String = token_stream(5_000)
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    c.bench_function("prompt_extract_5000_words", |b| {
        b.iter(|| extractor.extract(black_box(&text)))
    });
}

criterion_group!(
    benches,
    bench_segment,
    bench_segment_unbounded,
    bench_align,
    bench_prompt
);
criterion_main!(benches);
