//! Cue-level and word-level differences between original and corrected text.

use crate::types::Cue;

/// One cue whose text changed during correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueDiff {
    /// 1-based cue index, matching the SRT numbering.
    pub index: usize,
    pub original: String,
    pub corrected: String,
}

/// Word-level diff operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOp<'a> {
    /// Word present in both old and new (unchanged).
    Equal(&'a str),
    /// Word only in old (deleted/replaced).
    Delete(&'a str),
    /// Word only in new (inserted/replacement).
    Insert(&'a str),
}

/// Cues at the same position whose text differs.
///
/// Compares pairwise up to the shorter list; callers check counts first.
pub fn diff_cues(original: &[Cue], corrected: &[Cue]) -> Vec<CueDiff> {
    original
        .iter()
        .zip(corrected)
        .enumerate()
        .filter(|(_, (old, new))| old.text != new.text)
        .map(|(i, (old, new))| CueDiff {
            index: i + 1,
            original: old.text.clone(),
            corrected: new.text.clone(),
        })
        .collect()
}

/// Compute the longest common subsequence of two word slices.
/// Returns a list of (old_idx, new_idx) pairs for matched words.
fn lcs_indices(old_words: &[&str], new_words: &[&str]) -> Vec<(usize, usize)> {
    let m = old_words.len();
    let n = new_words.len();

    let mut table = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            if old_words[i - 1] == new_words[j - 1] {
                table[i][j] = table[i - 1][j - 1] + 1;
            } else {
                table[i][j] = table[i - 1][j].max(table[i][j - 1]);
            }
        }
    }

    let mut matches = Vec::new();
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if old_words[i - 1] == new_words[j - 1] {
            matches.push((i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if table[i - 1][j] >= table[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    matches.reverse();
    matches
}

/// Produce a word-level diff between two texts split on whitespace.
pub fn word_diff<'a>(old: &'a str, new: &'a str) -> Vec<DiffOp<'a>> {
    let old_words: Vec<&str> = old.split_whitespace().collect();
    let new_words: Vec<&str> = new.split_whitespace().collect();
    let matches = lcs_indices(&old_words, &new_words);
    let mut ops = Vec::new();

    let mut oi = 0;
    let mut ni = 0;

    for &(om, nm) in &matches {
        while oi < om {
            ops.push(DiffOp::Delete(old_words[oi]));
            oi += 1;
        }
        while ni < nm {
            ops.push(DiffOp::Insert(new_words[ni]));
            ni += 1;
        }
        ops.push(DiffOp::Equal(new_words[nm]));
        oi = om + 1;
        ni = nm + 1;
    }

    ops.extend(old_words[oi..].iter().map(|&w| DiffOp::Delete(w)));
    ops.extend(new_words[ni..].iter().map(|&w| DiffOp::Insert(w)));
    ops
}
