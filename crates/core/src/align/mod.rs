//! Alignment between a reference token sequence and a hypothesis.
//!
//! One generic edit-distance implementation serves both granularities the
//! evaluator needs: word tokens for WER and the word-information KPIs,
//! and characters for CER.

mod counts;
mod distance;

use serde::{Deserialize, Serialize};

pub use counts::edit_counts;
pub use distance::edit_distance;

/// Edit operations recovered from an optimal alignment.
///
/// Invariants: `hits + substitutions + deletions == reference_len` and
/// `hits + substitutions + insertions == hypothesis_len`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditCounts {
    pub hits: usize,
    pub substitutions: usize,
    pub deletions: usize,
    pub insertions: usize,
    pub reference_len: usize,
    pub hypothesis_len: usize,
}

impl EditCounts {
    /// Total edit operations (S + D + I) along the traced path.
    pub fn edits(&self) -> usize {
        self.substitutions + self.deletions + self.insertions
    }

    /// Merge counts from another alignment into this one.
    pub fn add(&mut self, other: &EditCounts) {
        self.hits += other.hits;
        self.substitutions += other.substitutions;
        self.deletions += other.deletions;
        self.insertions += other.insertions;
        self.reference_len += other.reference_len;
        self.hypothesis_len += other.hypothesis_len;
    }
}

/// Split text into word tokens on whitespace.
pub fn word_tokens(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Split text into character tokens.
pub fn char_tokens(text: &str) -> Vec<char> {
    text.chars().collect()
}
