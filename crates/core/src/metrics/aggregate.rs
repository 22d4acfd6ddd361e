use super::{derive_rates, EvalReport, MetricsError, SampleMetrics};
use crate::align::EditCounts;

/// Running totals across an evaluation run.
///
/// One aggregator instance is constructed per run and owned by a single
/// writer; accumulation is plain integer summation, so the final rates
/// do not depend on sample order. Division happens only in
/// [`MetricAggregator::finalize`].
#[derive(Clone, Debug, Default)]
pub struct MetricAggregator {
    word_distance: usize,
    word_count: usize,
    char_distance: usize,
    char_count: usize,
    edits: EditCounts,
    samples: usize,
}

impl MetricAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sample's counts into the running totals.
    pub fn accumulate(&mut self, sample: &SampleMetrics) {
        self.word_distance += sample.word_distance;
        self.word_count += sample.word_count;
        self.char_distance += sample.char_distance;
        self.char_count += sample.char_count;
        self.edits.add(&sample.word_edits);
        self.samples += 1;
    }

    /// Fold a whole batch of samples into the running totals.
    pub fn accumulate_batch<'a>(&mut self, batch: impl IntoIterator<Item = &'a SampleMetrics>) {
        for sample in batch {
            self.accumulate(sample);
        }
    }

    /// Number of samples accumulated so far.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Derive the summary rates from the accumulated totals.
    pub fn finalize(&self) -> Result<EvalReport, MetricsError> {
        derive_rates(
            self.word_distance,
            self.word_count,
            self.char_distance,
            self.char_count,
            &self.edits,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn sample(reference: &str, hypothesis: &str) -> SampleMetrics {
        SampleMetrics::measure(reference, hypothesis)
    }

    #[test]
    fn aggregate_wer_over_two_samples() {
        let mut agg = MetricAggregator::new();
        agg.accumulate(&sample("the cat sat", "the cat sit"));
        agg.accumulate(&sample("hello world", "hello world"));
        let report = agg.finalize().expect("non-empty totals");
        // 1 word error over 5 reference words.
        assert!((report.wer - 0.2).abs() < EPS);
        assert_eq!(agg.samples(), 2);
    }

    #[test]
    fn accumulation_is_order_independent() {
        let s1 = sample("the cat sat", "the cat sit");
        let s2 = sample("a quick brown fox", "a quick fox");

        let mut forward = MetricAggregator::new();
        forward.accumulate_batch([&s1, &s2]);

        let mut reverse = MetricAggregator::new();
        reverse.accumulate(&s2);
        reverse.accumulate(&s1);

        let a = forward.finalize().expect("rates");
        let b = reverse.finalize().expect("rates");
        assert_eq!(a, b);
    }

    #[test]
    fn batch_accumulation_matches_per_sample() {
        let samples = vec![
            sample("one two three", "one two tree"),
            sample("four five", "four five six"),
        ];

        let mut batched = MetricAggregator::new();
        batched.accumulate_batch(&samples);

        let mut singly = MetricAggregator::new();
        for s in &samples {
            singly.accumulate(s);
        }

        assert_eq!(
            batched.finalize().expect("rates"),
            singly.finalize().expect("rates")
        );
    }

    #[test]
    fn finalize_without_samples_fails() {
        let agg = MetricAggregator::new();
        let err = agg.finalize().expect_err("no accumulated reference");
        assert_eq!(err, MetricsError::EmptyReference { family: "words" });
    }

    #[test]
    fn wer_and_wer_alt_agree_on_unambiguous_alignments() {
        let mut agg = MetricAggregator::new();
        agg.accumulate(&sample("the cat sat", "the cat sit"));
        agg.accumulate(&sample("a b c", "a b"));
        let report = agg.finalize().expect("rates");
        assert!((report.wer - report.wer_alt).abs() < EPS);
    }

    #[test]
    fn degenerate_empty_hypothesis_batch() {
        let mut agg = MetricAggregator::new();
        agg.accumulate(&sample("the cat sat", ""));
        let report = agg.finalize().expect("rates");
        assert_eq!(report.wip, 0.0);
        assert_eq!(report.wil, 1.0);
        assert!((report.mer - 1.0).abs() < EPS);
    }
}
