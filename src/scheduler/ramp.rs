use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

use crate::domain::RampStrategy;
use crate::shutdown::ShutdownSender;

/// Shortest pause between two ramp releases.
const MIN_RAMP_TICK: Duration = Duration::from_millis(1);

/// How a ramp window is cut into release ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RampSchedule {
    pub(super) ticks: u64,
    pub(super) step: Duration,
}

impl RampSchedule {
    /// Splits `ramp_up` into at most one tick per virtual user, never closer
    /// together than [`MIN_RAMP_TICK`]. The first tick fires at t=0 and the
    /// last one no later than `ramp_up`.
    pub(super) fn new(virtual_users: u64, ramp_up: Duration) -> Self {
        let window_nanos = ramp_up.as_nanos();
        let max_ticks = window_nanos
            .checked_div(MIN_RAMP_TICK.as_nanos())
            .unwrap_or(0)
            .max(1);
        let ticks = u128::from(virtual_users.max(1)).min(max_ticks);
        let step_nanos = window_nanos.checked_div(ticks).unwrap_or(0);
        Self {
            ticks: u64::try_from(ticks).unwrap_or(u64::MAX),
            step: Duration::from_nanos(u64::try_from(step_nanos).unwrap_or(u64::MAX)),
        }
    }

    /// Virtual users released on tick `index` (0-based). Spreads the
    /// remainder so the per-tick counts sum to `virtual_users`.
    pub(super) fn batch(&self, virtual_users: u64, index: u64) -> u64 {
        let released_after = |tick: u64| -> u64 {
            u128::from(virtual_users)
                .saturating_mul(u128::from(tick))
                .checked_div(u128::from(self.ticks.max(1)))
                .and_then(|value| u64::try_from(value).ok())
                .unwrap_or(virtual_users)
        };
        released_after(index.saturating_add(1)).saturating_sub(released_after(index))
    }
}

/// Hands out start permits according to the ramp strategy. Stops early when
/// shutdown fires.
pub(super) fn spawn_ramp_driver(
    ramp: RampStrategy,
    virtual_users: u64,
    permits: Arc<Semaphore>,
    shutdown_tx: &ShutdownSender,
) -> JoinHandle<()> {
    let mut shutdown_rx = shutdown_tx.subscribe();
    tokio::spawn(async move {
        match ramp {
            RampStrategy::Constant => {
                permits.add_permits(to_permits(virtual_users));
            }
            RampStrategy::Ramping { ramp_up } => {
                let schedule = RampSchedule::new(virtual_users, ramp_up);
                debug!(
                    "Ramping {} virtual users over {:?} in {} step(s) of {:?}",
                    virtual_users, ramp_up, schedule.ticks, schedule.step
                );
                let mut ticker = interval(schedule.step.max(MIN_RAMP_TICK));
                ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
                for index in 0..schedule.ticks {
                    tokio::select! {
                        _ = shutdown_rx.recv() => return,
                        _ = ticker.tick() => {
                            permits.add_permits(to_permits(schedule.batch(virtual_users, index)));
                        }
                    }
                }
            }
        }
    })
}

fn to_permits(count: u64) -> usize {
    usize::try_from(count).unwrap_or(Semaphore::MAX_PERMITS)
}
