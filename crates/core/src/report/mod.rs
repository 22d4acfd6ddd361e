//! Structured logging of per-sample and summary metrics.

use crate::metrics::EvalReport;

/// Format a rate with the four decimals the evaluation logs use.
pub fn format_rate(rate: f64) -> String {
    format!("{rate:.4}")
}

/// Format a rate as a percentage string.
pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Log one sample's transcripts and rates.
pub fn log_sample(id: &str, reference: &str, hypothesis: &str, rates: &EvalReport) {
    tracing::info!(
        sample = id,
        wer = %format_rate(rates.wer),
        cer = %format_rate(rates.cer),
        mer = %format_rate(rates.mer),
        wil = %format_rate(rates.wil),
        wip = %format_rate(rates.wip),
        reference,
        hypothesis,
        "sample metrics"
    );
}

/// Log the summary rates for a finished evaluation run.
pub fn log_summary(samples: usize, rates: &EvalReport) {
    tracing::info!(
        samples,
        wer = %format_rate(rates.wer),
        cer = %format_rate(rates.cer),
        wer_alt = %format_rate(rates.wer_alt),
        mer = %format_rate(rates.mer),
        wip = %format_rate(rates.wip),
        wil = %format_rate(rates.wil),
        "evaluation summary"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_formatting() {
        assert_eq!(format_rate(0.0), "0.0000");
        assert_eq!(format_rate(1.0 / 3.0), "0.3333");
        assert_eq!(format_rate(1.0), "1.0000");
    }

    #[test]
    fn percent_formatting() {
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(0.15), "15.0%");
        assert_eq!(format_percent(0.333), "33.3%");
    }
}
