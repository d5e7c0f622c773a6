//! Virtual user scheduler: keeps the configured number of workers looping
//! over the request executor until the run's deadline or a stop signal.
mod gauge;
mod ramp;


use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until, timeout_at};
use tracing::{debug, error, info, warn};

use crate::domain::{Iteration, LoadProfile};
use crate::error::AppResult;
use crate::shutdown::{ShutdownSender, shutdown_requested};
use crate::sink::ResultSender;
use crate::workload::RequestExecutor;

use gauge::ActiveGauge;
use ramp::spawn_ramp_driver;

/// Mixes the virtual user id into the run seed so every worker draws from
/// its own reproducible stream.
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub profile: LoadProfile,
    pub grace_period: Duration,
    pub seed: Option<u64>,
    pub preflight: bool,
}

/// What the scheduler observed, beyond the individual check results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub elapsed: Duration,
    pub peak_active_vus: u64,
    pub started_vus: u64,
    pub abandoned_vus: u64,
}

/// Runs the load profile to completion.
///
/// Every worker is spawned up front and parked on a semaphore; the ramp
/// driver releases them. The run stops when the profile duration elapses or
/// when something else sends on `shutdown_tx`. A stop that arrives during
/// preflight ends the run before any worker is spawned. Workers still busy
/// once the grace period is over are aborted.
///
/// # Errors
///
/// Returns an error when the preflight request cannot reach the target.
pub async fn run_scheduler(
    config: SchedulerConfig,
    executor: Arc<RequestExecutor>,
    results_tx: ResultSender,
    shutdown_tx: &ShutdownSender,
) -> AppResult<RunStats> {
    let profile = config.profile;
    let mut shutdown_rx = shutdown_tx.subscribe();
    if config.preflight {
        let mut rng = vu_rng(config.seed, 0);
        tokio::select! {
            _ = shutdown_rx.recv() => {
                info!("Stop requested during preflight; no virtual users started.");
                return Ok(RunStats::default());
            }
            outcome = executor.preflight(&mut rng) => {
                if let Err(err) = outcome {
                    error!("{}", err);
                    drop(shutdown_tx.send(()));
                    return Err(err);
                }
            }
        }
        debug!("Preflight to {} succeeded.", executor.transport().target());
    }

    let virtual_users = profile.virtual_users();
    let permits = Arc::new(Semaphore::new(0));
    let gauge = Arc::new(ActiveGauge::default());
    let capacity = usize::try_from(virtual_users).unwrap_or(0);
    let mut worker_handles: Vec<JoinHandle<()>> = Vec::with_capacity(capacity);

    info!(
        "Starting {} virtual user(s) against {} for {:?} ({} ramp).",
        virtual_users,
        executor.transport().target(),
        profile.duration(),
        profile.ramp().as_str()
    );
    let run_start = Instant::now();

    for virtual_user_id in 1..=virtual_users {
        let handle = spawn_virtual_user(
            virtual_user_id,
            Arc::clone(&executor),
            results_tx.clone(),
            shutdown_tx,
            Arc::clone(&permits),
            Arc::clone(&gauge),
            vu_rng(config.seed, virtual_user_id),
        );
        worker_handles.push(handle);
    }
    drop(results_tx);

    let ramp_handle = spawn_ramp_driver(
        profile.ramp(),
        virtual_users,
        Arc::clone(&permits),
        shutdown_tx,
    );

    let deadline = run_start
        .checked_add(profile.duration())
        .unwrap_or(run_start);
    tokio::select! {
        _ = shutdown_rx.recv() => {
            info!("Stop requested; winding down virtual users.");
        }
        () = sleep_until(deadline) => {
            debug!("Run duration elapsed.");
        }
    }
    drop(shutdown_tx.send(()));
    permits.close();
    ramp_handle.abort();

    let grace_deadline = Instant::now()
        .checked_add(config.grace_period)
        .unwrap_or_else(Instant::now);
    let mut abandoned_vus: u64 = 0;
    for mut handle in worker_handles {
        match timeout_at(grace_deadline, &mut handle).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                warn!("Virtual user task failed: {}", err);
            }
            Err(_elapsed) => {
                handle.abort();
                abandoned_vus = abandoned_vus.saturating_add(1);
            }
        }
    }
    if abandoned_vus > 0 {
        warn!(
            "Aborted {} virtual user(s) still running after the {:?} grace period.",
            abandoned_vus, config.grace_period
        );
    }

    let stats = RunStats {
        elapsed: run_start.elapsed(),
        peak_active_vus: gauge.peak(),
        started_vus: gauge.started(),
        abandoned_vus,
    };
    debug!(
        "Scheduler finished: {:?}, {} still marked active",
        stats,
        gauge.current()
    );
    Ok(stats)
}

fn spawn_virtual_user(
    virtual_user_id: u64,
    executor: Arc<RequestExecutor>,
    results_tx: ResultSender,
    shutdown_tx: &ShutdownSender,
    permits: Arc<Semaphore>,
    gauge: Arc<ActiveGauge>,
    mut rng: StdRng,
) -> JoinHandle<()> {
    let mut shutdown_rx = shutdown_tx.subscribe();
    tokio::spawn(async move {
        let startup_permit = tokio::select! {
            _ = shutdown_rx.recv() => return,
            permit = permits.acquire_owned() => permit,
        };
        let Ok(_startup_permit) = startup_permit else {
            return;
        };
        let _active = gauge.enter();

        let mut iteration_index: u64 = 0;
        loop {
            if shutdown_requested(&mut shutdown_rx) {
                break;
            }
            let iteration = Iteration {
                virtual_user_id,
                iteration_index,
            };
            let check = executor.execute(iteration, &mut rng).await;
            if results_tx.send(check).await.is_err() {
                break;
            }
            iteration_index = iteration_index.saturating_add(1);
            if executor.think(&mut shutdown_rx).await {
                break;
            }
        }
    })
}

fn vu_rng(seed: Option<u64>, virtual_user_id: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed ^ virtual_user_id.wrapping_mul(SEED_MIX)),
        None => StdRng::from_entropy(),
    }
}
