use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use tracing::warn;

use crate::domain::{CheckResult, ProtocolKind};

use super::histogram::LatencyHistogram;

/// Key used in [`RunSummary::statuses`] for iterations that never got a
/// status back.
pub const TRANSPORT_ERROR_KEY: &str = "transport_error";

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct LabelCounts {
    pub passed: u64,
    pub failed: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub protocol: ProtocolKind,
    pub target: String,
    pub virtual_users: u64,
    pub peak_active_vus: u64,
    pub abandoned_vus: u64,
    pub elapsed_ms: u64,
    pub total_checks: u64,
    pub passed_checks: u64,
    pub failed_checks: u64,
    pub transport_errors: u64,
    pub retried_requests: u64,
    pub received_bytes: u64,
    pub statuses: BTreeMap<String, u64>,
    pub checks: BTreeMap<String, LabelCounts>,
    pub min_latency_ms: u64,
    pub avg_latency_ms: u64,
    pub max_latency_ms: u64,
    pub p50_latency_ms: u64,
    pub p90_latency_ms: u64,
    pub p99_latency_ms: u64,
}

impl RunSummary {
    /// Passed checks as a percentage scaled by 100 (`9950` = 99.50%).
    #[must_use]
    pub fn pass_rate_x100(&self) -> u64 {
        if self.total_checks == 0 {
            return 0;
        }
        let scaled = u128::from(self.passed_checks)
            .saturating_mul(10_000)
            .checked_div(u128::from(self.total_checks))
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }

    /// Iterations per second scaled by 100.
    #[must_use]
    pub fn avg_rps_x100(&self) -> u64 {
        let elapsed_ms = u128::from(self.elapsed_ms.max(1));
        let scaled = u128::from(self.total_checks)
            .saturating_mul(100_000)
            .checked_div(elapsed_ms)
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }
}

/// Facts about the run that the sink cannot observe from check results.
#[derive(Debug, Clone)]
pub struct RunMeta {
    pub protocol: ProtocolKind,
    pub target: String,
    pub virtual_users: u64,
    pub peak_active_vus: u64,
    pub abandoned_vus: u64,
    pub elapsed: Duration,
}

/// Folds check results into counters as they arrive.
#[derive(Debug)]
pub struct SummaryAccumulator {
    histogram: Option<LatencyHistogram>,
    total: u64,
    passed: u64,
    transport_errors: u64,
    retried: u64,
    received_bytes: u64,
    statuses: BTreeMap<String, u64>,
    checks: BTreeMap<String, LabelCounts>,
    min_latency_ms: u64,
    max_latency_ms: u64,
    latency_sum_ms: u128,
}

impl Default for SummaryAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryAccumulator {
    #[must_use]
    pub fn new() -> Self {
        let histogram = match LatencyHistogram::new() {
            Ok(histogram) => Some(histogram),
            Err(err) => {
                warn!("Latency percentiles disabled: {}", err);
                None
            }
        };
        Self {
            histogram,
            total: 0,
            passed: 0,
            transport_errors: 0,
            retried: 0,
            received_bytes: 0,
            statuses: BTreeMap::new(),
            checks: BTreeMap::new(),
            min_latency_ms: u64::MAX,
            max_latency_ms: 0,
            latency_sum_ms: 0,
        }
    }

    pub fn record(&mut self, result: &CheckResult) {
        self.total = self.total.saturating_add(1);
        if result.passed {
            self.passed = self.passed.saturating_add(1);
        }
        if result.attempts > 1 {
            self.retried = self.retried.saturating_add(1);
        }
        self.received_bytes = self.received_bytes.saturating_add(result.response_bytes);

        let status_key = match result.status {
            Some(status) => status.to_string(),
            None => {
                self.transport_errors = self.transport_errors.saturating_add(1);
                TRANSPORT_ERROR_KEY.to_owned()
            }
        };
        let count = self.statuses.entry(status_key).or_insert(0);
        *count = count.saturating_add(1);

        let label = self.checks.entry(result.label.clone()).or_default();
        if result.passed {
            label.passed = label.passed.saturating_add(1);
        } else {
            label.failed = label.failed.saturating_add(1);
        }

        let latency_ms = u64::try_from(result.latency.as_millis()).unwrap_or(u64::MAX);
        self.min_latency_ms = self.min_latency_ms.min(latency_ms);
        self.max_latency_ms = self.max_latency_ms.max(latency_ms);
        self.latency_sum_ms = self.latency_sum_ms.saturating_add(u128::from(latency_ms));
        if let Some(histogram) = self.histogram.as_mut()
            && let Err(err) = histogram.record(latency_ms)
        {
            warn!("{}", err);
        }
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub fn finish(self, meta: RunMeta) -> RunSummary {
        let percentiles = self
            .histogram
            .as_ref()
            .map(LatencyHistogram::percentiles)
            .unwrap_or_default();
        let avg_latency_ms = self
            .latency_sum_ms
            .checked_div(u128::from(self.total))
            .and_then(|avg| u64::try_from(avg).ok())
            .unwrap_or(0);
        let min_latency_ms = if self.total == 0 {
            0
        } else {
            self.min_latency_ms
        };

        RunSummary {
            protocol: meta.protocol,
            target: meta.target,
            virtual_users: meta.virtual_users,
            peak_active_vus: meta.peak_active_vus,
            abandoned_vus: meta.abandoned_vus,
            elapsed_ms: u64::try_from(meta.elapsed.as_millis()).unwrap_or(u64::MAX),
            total_checks: self.total,
            passed_checks: self.passed,
            failed_checks: self.total.saturating_sub(self.passed),
            transport_errors: self.transport_errors,
            retried_requests: self.retried,
            received_bytes: self.received_bytes,
            statuses: self.statuses,
            checks: self.checks,
            min_latency_ms,
            avg_latency_ms,
            max_latency_ms: self.max_latency_ms,
            p50_latency_ms: percentiles.p50,
            p90_latency_ms: percentiles.p90,
            p99_latency_ms: percentiles.p99,
        }
    }
}
