use std::sync::Arc;

use tracing::info;

use crate::domain::CheckResult;
use crate::error::AppResult;
use crate::scheduler::run_scheduler;
use crate::shutdown::ShutdownSender;
use crate::sink::{RunMeta, RunSummary, setup_result_collector};
use crate::transport::Transport;
use crate::workload::RequestExecutor;

use super::plan::RunPlan;

#[derive(Debug)]
pub struct RunOutcome {
    pub summary: RunSummary,
    /// Every check of the run, only filled when retention was requested.
    pub results: Vec<CheckResult>,
}

/// Runs a plan against an already built transport and folds the results
/// into a summary.
///
/// # Errors
///
/// Returns an error when the preflight fails or the collector task dies.
pub async fn run_local(
    plan: &RunPlan,
    transport: Arc<dyn Transport>,
    shutdown_tx: &ShutdownSender,
    retain_results: bool,
) -> AppResult<RunOutcome> {
    let protocol = transport.protocol();
    let target = transport.target().to_owned();
    let executor = Arc::new(RequestExecutor::new(
        Arc::new(plan.template.clone()),
        transport,
        plan.executor.clone(),
    ));

    let (results_tx, collector) = setup_result_collector(retain_results);
    let scheduled = run_scheduler(
        plan.scheduler.clone(),
        Arc::clone(&executor),
        results_tx,
        shutdown_tx,
    )
    .await;
    let collected = collector.await?;
    let stats = scheduled?;

    info!(
        "Run finished after {:?}: {} check(s), peak {} active VU(s).",
        stats.elapsed,
        collected.accumulator.total(),
        stats.peak_active_vus
    );

    let summary = collected.accumulator.finish(RunMeta {
        protocol,
        target,
        virtual_users: plan.scheduler.profile.virtual_users(),
        peak_active_vus: stats.peak_active_vus,
        abandoned_vus: stats.abandoned_vus,
        elapsed: stats.elapsed,
    });
    Ok(RunOutcome {
        summary,
        results: collected.retained,
    })
}
