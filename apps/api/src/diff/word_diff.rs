//! Word-level diff between an original text and its rewrite.
//!
//! Both texts are split on whitespace and aligned with a longest-common-subsequence
//! table using exact word equality. Every rewritten word outside the LCS is flagged
//! as changed. Line breaks of the rewritten text are kept as `line_lengths` so the
//! caller can rebuild paragraphs from the flat word list.
//!
//! Time and memory are O(m·n); callers bound the word counts before calling.

use serde::{Deserialize, Serialize};

/// Flat rewritten word list with a per-word change flag.
///
/// Invariants: `mask.len() == words.len()` and `line_lengths.iter().sum() == words.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDiff {
    pub words: Vec<String>,
    /// `true` = not carried over from the original.
    pub mask: Vec<bool>,
    /// Word count of each line of the rewritten text, blank lines included as 0.
    pub line_lengths: Vec<usize>,
}

/// A rewritten word paired with its change flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffWord<'a> {
    pub text: &'a str,
    pub changed: bool,
}

impl WordDiff {
    /// Re-segments the flat word list by the rewritten text's line breaks.
    pub fn lines(&self) -> Vec<Vec<DiffWord<'_>>> {
        let mut lines = Vec::with_capacity(self.line_lengths.len());
        let mut start = 0;
        for &len in &self.line_lengths {
            let end = start + len;
            lines.push(
                self.words[start..end]
                    .iter()
                    .zip(&self.mask[start..end])
                    .map(|(text, &changed)| DiffWord {
                        text: text.as_str(),
                        changed,
                    })
                    .collect(),
            );
            start = end;
        }
        lines
    }

    pub fn changed_count(&self) -> usize {
        self.mask.iter().filter(|&&changed| changed).count()
    }
}

/// Number of whitespace-separated words in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Computes the change mask of `rewritten` against `original`.
pub fn diff_words(original: &str, rewritten: &str) -> WordDiff {
    let old: Vec<&str> = original.split_whitespace().collect();

    let mut words = Vec::new();
    let mut line_lengths = Vec::new();
    for line in rewritten.lines() {
        let before = words.len();
        words.extend(line.split_whitespace().map(str::to_string));
        line_lengths.push(words.len() - before);
    }

    let new: Vec<&str> = words.iter().map(String::as_str).collect();
    let kept = lcs_kept_positions(&old, &new);
    let mask = kept.into_iter().map(|kept| !kept).collect();

    WordDiff {
        words,
        mask,
        line_lengths,
    }
}

/// LCS length table, `(m + 1) x (n + 1)`, stored row-major.
struct LcsTable {
    cols: usize,
    cells: Vec<u32>,
}

impl LcsTable {
    fn build(old: &[&str], new: &[&str]) -> Self {
        let cols = new.len() + 1;
        let mut cells = vec![0_u32; (old.len() + 1) * cols];
        for i in 1..=old.len() {
            for j in 1..=new.len() {
                cells[i * cols + j] = if old[i - 1] == new[j - 1] {
                    cells[(i - 1) * cols + (j - 1)] + 1
                } else {
                    cells[(i - 1) * cols + j].max(cells[i * cols + (j - 1)])
                };
            }
        }
        Self { cols, cells }
    }

    fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.cols + j]
    }
}

/// Marks which positions of `new` take part in the LCS with `old`.
///
/// Backtracking prefers stepping back in `old` when both neighbours tie. The other
/// direction yields an alignment of the same length with different words flagged;
/// this one is fixed so output is stable.
fn lcs_kept_positions(old: &[&str], new: &[&str]) -> Vec<bool> {
    let mut kept = vec![false; new.len()];
    if old.is_empty() || new.is_empty() {
        return kept;
    }

    let table = LcsTable::build(old, new);
    let (mut i, mut j) = (old.len(), new.len());
    while i > 0 && j > 0 {
        if old[i - 1] == new[j - 1] {
            kept[j - 1] = true;
            i -= 1;
            j -= 1;
        } else if table.get(i - 1, j) >= table.get(i, j - 1) {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    kept
}
