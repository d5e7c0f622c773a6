//! Result sink: a channel-fed single consumer that appends check results
//! from every virtual user.
mod histogram;
mod summary;


use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::CheckResult;

pub use histogram::{LatencyHistogram, LatencyPercentiles};
pub use summary::{LabelCounts, RunMeta, RunSummary, SummaryAccumulator, TRANSPORT_ERROR_KEY};

/// Channel capacity between virtual users and the collector. Workers wait on
/// a full channel rather than drop results.
pub const RESULT_CHANNEL_CAPACITY: usize = 10_000;

pub type ResultSender = mpsc::Sender<CheckResult>;

/// Everything the collector saw once every sender has been dropped.
#[derive(Debug)]
pub struct CollectedResults {
    pub accumulator: SummaryAccumulator,
    /// Individual results, kept only when retention was requested.
    pub retained: Vec<CheckResult>,
}

/// Spawns the collector task. It finishes when the last [`ResultSender`]
/// clone is dropped.
#[must_use]
pub fn setup_result_collector(retain: bool) -> (ResultSender, JoinHandle<CollectedResults>) {
    let (results_tx, mut results_rx) = mpsc::channel::<CheckResult>(RESULT_CHANNEL_CAPACITY);
    let handle = tokio::spawn(async move {
        let mut accumulator = SummaryAccumulator::new();
        let mut retained = Vec::new();
        while let Some(result) = results_rx.recv().await {
            accumulator.record(&result);
            if retain {
                retained.push(result);
            }
        }
        CollectedResults {
            accumulator,
            retained,
        }
    });
    (results_tx, handle)
}
