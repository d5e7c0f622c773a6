use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counts virtual users currently inside their iteration loop and remembers
/// the highest value seen.
#[derive(Debug, Default)]
pub(super) struct ActiveGauge {
    current: AtomicU64,
    peak: AtomicU64,
    started: AtomicU64,
}

impl ActiveGauge {
    pub(super) fn enter(self: &Arc<Self>) -> ActiveGuard {
        let now = self
            .current
            .fetch_add(1, Ordering::AcqRel)
            .saturating_add(1);
        self.peak.fetch_max(now, Ordering::AcqRel);
        self.started.fetch_add(1, Ordering::Relaxed);
        ActiveGuard {
            gauge: Arc::clone(self),
        }
    }

    pub(super) fn current(&self) -> u64 {
        self.current.load(Ordering::Acquire)
    }

    pub(super) fn peak(&self) -> u64 {
        self.peak.load(Ordering::Acquire)
    }

    pub(super) fn started(&self) -> u64 {
        self.started.load(Ordering::Relaxed)
    }
}

/// Decrements the gauge on drop, including when the task is aborted.
pub(super) struct ActiveGuard {
    gauge: Arc<ActiveGauge>,
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.gauge.current.fetch_sub(1, Ordering::AcqRel);
    }
}
