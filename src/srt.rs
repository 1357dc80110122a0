//! SRT serialization at the render boundary.
//!
//! [`render`] (through [`block_text`]) is where cue text is normalized. [`parse`] reads SRT
//! back, which is how text returned by external correction services
//! re-enters the pipeline.

use crate::error::{Result, ScriptcueError};
use crate::text;
use crate::types::Cue;

/// Format seconds as `HH:MM:SS,mmm`.
///
/// Negative and non-finite inputs clamp to zero. Milliseconds are rounded,
/// so 1.9996 s becomes `00:00:02,000`.
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    };
    let total_ms = (seconds * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let s = total_secs % 60;
    let m = (total_secs / 60) % 60;
    let h = total_secs / 3600;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

/// Parse `HH:MM:SS,mmm` (a `.` separator is accepted too) into seconds.
pub fn parse_timestamp(stamp: &str) -> Option<f64> {
    let stamp = stamp.trim();
    let (hms, ms) = stamp.split_once([',', '.'])?;
    let mut parts = hms.split(':');
    let h: u64 = parts.next()?.trim().parse().ok()?;
    let m: u64 = parts.next()?.trim().parse().ok()?;
    let s: u64 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() || m >= 60 || s >= 60 {
        return None;
    }
    let ms: u64 = ms.trim().parse().ok()?;
    if ms >= 1000 {
        return None;
    }
    Some((h * 3600 + m * 60 + s) as f64 + ms as f64 / 1000.0)
}

/// Cue text as it is written into an SRT block.
///
/// Normalizes, then drops lines that normalization left blank, since a blank
/// line inside a block would end it early.
pub fn block_text(raw: &str) -> String {
    text::normalize(raw)
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render cues as SRT, normalizing each cue's text.
pub fn render(cues: &[Cue]) -> String {
    let mut out = String::new();
    for (i, cue) in cues.iter().enumerate() {
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            format_timestamp(cue.start),
            format_timestamp(cue.end),
            block_text(&cue.text)
        ));
    }
    out
}

/// Parse SRT text into cues.
///
/// Accepts CRLF line endings, a leading BOM, extra blank lines between
/// blocks, and multi-line cue text (joined with `\n`). Index numbers are read
/// but not checked for sequence.
pub fn parse(input: &str) -> Result<Vec<Cue>> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let lines: Vec<&str> = input.lines().map(|l| l.trim_end_matches('\r')).collect();
    let mut cues = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].trim().is_empty() {
            i += 1;
            continue;
        }

        let index_line = i + 1;
        if lines[i].trim().parse::<u64>().is_err() {
            return Err(ScriptcueError::SrtParse {
                line: index_line,
                message: format!("expected cue index, found {:?}", lines[i]),
            });
        }
        i += 1;

        let timing = lines.get(i).ok_or_else(|| ScriptcueError::SrtParse {
            line: i + 1,
            message: "missing timing line".to_string(),
        })?;
        let (start, end) = parse_timing(timing).ok_or_else(|| ScriptcueError::SrtParse {
            line: i + 1,
            message: format!("malformed timing line {timing:?}"),
        })?;
        i += 1;

        let mut text_lines = Vec::new();
        while i < lines.len() && !lines[i].trim().is_empty() {
            text_lines.push(lines[i]);
            i += 1;
        }

        cues.push(Cue::new(start, end, text_lines.join("\n")));
    }

    Ok(cues)
}

fn parse_timing(line: &str) -> Option<(f64, f64)> {
    let (start, end) = line.split_once("-->")?;
    // Some writers append position hints after the end time.
    let end = end.split_whitespace().next()?;
    Some((parse_timestamp(start)?, parse_timestamp(end)?))
}
