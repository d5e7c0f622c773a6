use hdrhistogram::Histogram;

use crate::error::MetricsError;

/// Highest latency tracked for percentiles: one hour, in milliseconds.
const MAX_TRACKED_LATENCY_MS: u64 = 3_600_000;
const SIGNIFICANT_DIGITS: u8 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatencyPercentiles {
    pub p50: u64,
    pub p90: u64,
    pub p99: u64,
}

/// Iteration latency distribution in milliseconds, bounded to
/// `1..=MAX_TRACKED_LATENCY_MS`.
#[derive(Debug, Clone)]
pub struct LatencyHistogram {
    hist: Histogram<u64>,
}

impl LatencyHistogram {
    /// # Errors
    ///
    /// Returns `MetricsError::Histogram` if the bounds are rejected.
    pub fn new() -> Result<Self, MetricsError> {
        let hist = Histogram::<u64>::new_with_bounds(1, MAX_TRACKED_LATENCY_MS, SIGNIFICANT_DIGITS)
            .map_err(|err| MetricsError::Histogram {
                context: "create latency histogram",
                source: Box::new(err),
            })?;
        Ok(Self { hist })
    }

    /// Sub-millisecond samples count as 1ms.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::Histogram` for a sample above the tracked
    /// range.
    pub fn record(&mut self, latency_ms: u64) -> Result<(), MetricsError> {
        self.hist
            .record(latency_ms.max(1))
            .map_err(|err| MetricsError::Histogram {
                context: "record latency",
                source: Box::new(err),
            })
    }

    #[must_use]
    pub fn percentiles(&self) -> LatencyPercentiles {
        if self.hist.is_empty() {
            return LatencyPercentiles::default();
        }
        LatencyPercentiles {
            p50: self.hist.value_at_quantile(0.5),
            p90: self.hist.value_at_quantile(0.9),
            p99: self.hist.value_at_quantile(0.99),
        }
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.hist.len()
    }
}
