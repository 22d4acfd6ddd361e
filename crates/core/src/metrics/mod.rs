//! Per-sample measurement and the derived summary rates.

mod aggregate;

use crate::align::{char_tokens, edit_counts, edit_distance, word_tokens, EditCounts};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use aggregate::MetricAggregator;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    #[error("no reference {family} accumulated, rates are undefined")]
    EmptyReference { family: &'static str },
}

/// Scalar alignment results for one evaluated sample.
///
/// Created once per sample and never mutated afterwards; the aggregator
/// consumes these by summation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SampleMetrics {
    pub word_distance: usize,
    pub word_count: usize,
    pub char_distance: usize,
    pub char_count: usize,
    pub word_edits: EditCounts,
}

impl SampleMetrics {
    /// Align `hypothesis` against `reference` at word and character
    /// granularity.
    pub fn measure(reference: &str, hypothesis: &str) -> Self {
        let ref_words = word_tokens(reference);
        let hyp_words = word_tokens(hypothesis);
        let ref_chars = char_tokens(reference);
        let hyp_chars = char_tokens(hypothesis);

        Self {
            word_distance: edit_distance(&ref_words, &hyp_words),
            word_count: ref_words.len(),
            char_distance: edit_distance(&ref_chars, &hyp_chars),
            char_count: ref_chars.len(),
            word_edits: edit_counts(&ref_words, &hyp_words),
        }
    }

    /// Rates for this sample alone, same formulas as the aggregate.
    pub fn rates(&self) -> Result<EvalReport, MetricsError> {
        let mut agg = MetricAggregator::new();
        agg.accumulate(self);
        agg.finalize()
    }
}

/// Summary rates over everything accumulated so far.
///
/// `wer` is normalized raw word edit distance; `wer_alt` is the
/// edit-count formulation `(S+D+I)/(H+S+D)`. The two can diverge when an
/// optimal alignment is not unique, so both are reported.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct EvalReport {
    pub wer: f64,
    pub cer: f64,
    pub wer_alt: f64,
    pub mer: f64,
    pub wip: f64,
    pub wil: f64,
}

impl EvalReport {
    /// Name-to-value view for logging/reporting collaborators.
    pub fn as_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("wer", self.wer),
            ("cer", self.cer),
            ("wer_alt", self.wer_alt),
            ("mer", self.mer),
            ("wip", self.wip),
            ("wil", self.wil),
        ])
    }
}

pub(crate) fn derive_rates(
    word_distance: usize,
    word_count: usize,
    char_distance: usize,
    char_count: usize,
    edits: &EditCounts,
) -> Result<EvalReport, MetricsError> {
    if word_count == 0 {
        return Err(MetricsError::EmptyReference { family: "words" });
    }
    if char_count == 0 {
        return Err(MetricsError::EmptyReference {
            family: "characters",
        });
    }

    let hits = edits.hits as f64;
    let errors = edits.edits() as f64;
    // H + S + D equals the accumulated reference word count, which the
    // guards above keep nonzero.
    let aligned_ref = (edits.hits + edits.substitutions + edits.deletions) as f64;
    let aligned_all = aligned_ref + edits.insertions as f64;

    let wip = if edits.hypothesis_len == 0 {
        0.0
    } else {
        (hits / edits.reference_len as f64) * (hits / edits.hypothesis_len as f64)
    };

    Ok(EvalReport {
        wer: word_distance as f64 / word_count as f64,
        cer: char_distance as f64 / char_count as f64,
        wer_alt: errors / aligned_ref,
        mer: errors / aligned_all,
        wip,
        wil: 1.0 - wip,
    })
}
