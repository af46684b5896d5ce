//! Parse timing and throughput.

use std::time::Duration;

/// Metrics for one parser instance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseMetrics {
    /// Time spent inside `parse_statement` calls, in milliseconds.
    pub parse_duration_ms: f64,
    /// Tokens consumed, including the final EOF.
    pub tokens_processed: usize,
    /// `tokens_processed` divided by the parse duration; zero when no time
    /// was measured.
    pub tokens_per_second: f64,
    /// Number of errors recorded.
    pub error_count: usize,
}

impl ParseMetrics {
    /// Builds metrics from raw counters.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(duration: Duration, tokens_processed: usize, error_count: usize) -> Self {
        let seconds = duration.as_secs_f64();
        let tokens_per_second = if seconds > 0.0 {
            tokens_processed as f64 / seconds
        } else {
            0.0
        };
        Self {
            parse_duration_ms: seconds * 1000.0,
            tokens_processed,
            tokens_per_second,
            error_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throughput() {
        let metrics = ParseMetrics::new(Duration::from_millis(500), 100, 1);
        assert!((metrics.parse_duration_ms - 500.0).abs() < 1e-9);
        assert!((metrics.tokens_per_second - 200.0).abs() < 1e-9);
        assert_eq!(metrics.error_count, 1);
    }

    #[test]
    fn test_zero_duration() {
        let metrics = ParseMetrics::new(Duration::ZERO, 10, 0);
        assert_eq!(metrics.tokens_per_second, 0.0);
        assert_eq!(metrics.tokens_processed, 10);
    }
}
