use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

use crate::domain::{BookPayload, CheckResult, Iteration};
use crate::error::{AppError, AppResult, TransportError};
use crate::shutdown::ShutdownReceiver;
use crate::transport::{Transport, TransportResponse};

use super::check::SuccessStatuses;
use super::template::RequestTemplate;

/// Fixed pause between attempts of a retried request.
pub(crate) const RETRY_BACKOFF: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct ExecutorSettings {
    pub success: SuccessStatuses,
    pub retries: u32,
    pub think_time: Duration,
    pub retry_backoff: Duration,
}

/// Builds, sends, and checks one request per iteration. Shared by every
/// virtual user; holds no per-iteration state.
pub struct RequestExecutor {
    template: Arc<RequestTemplate>,
    transport: Arc<dyn Transport>,
    settings: ExecutorSettings,
    label: String,
}

struct Attempted {
    outcome: Result<TransportResponse, TransportError>,
    attempts: u32,
}

impl RequestExecutor {
    #[must_use]
    pub fn new(
        template: Arc<RequestTemplate>,
        transport: Arc<dyn Transport>,
        settings: ExecutorSettings,
    ) -> Self {
        let label = settings.success.label();
        Self {
            template,
            transport,
            settings,
            label,
        }
    }

    #[must_use]
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Runs one iteration and returns its check. Never fails: transport
    /// errors that survive the retry budget become a failed check.
    pub async fn execute<R>(&self, iteration: Iteration, rng: &mut R) -> CheckResult
    where
        R: Rng + Send + ?Sized,
    {
        let payload = self.template.build(iteration, rng);
        let start = Instant::now();
        let attempted = self.send_with_retries(&payload).await;
        let latency = start.elapsed();

        let (passed, status, response_bytes) = match attempted.outcome {
            Ok(response) => (
                self.settings.success.contains(response.status),
                Some(response.status),
                response.response_bytes,
            ),
            Err(err) => {
                debug!(
                    "VU {} iteration {} failed after {} attempt(s): {}",
                    iteration.virtual_user_id, iteration.iteration_index, attempted.attempts, err
                );
                (false, None, 0)
            }
        };
        if !passed && let Some(status) = status {
            debug!(
                "VU {} iteration {} check '{}' failed with status {}",
                iteration.virtual_user_id, iteration.iteration_index, self.label, status
            );
        }

        CheckResult {
            passed,
            label: self.label.clone(),
            status,
            latency,
            virtual_user_id: iteration.virtual_user_id,
            iteration_index: iteration.iteration_index,
            attempts: attempted.attempts,
            response_bytes,
        }
    }

    /// Sends one request before any virtual user starts to prove the target
    /// is reachable. Any status counts; only a transport failure after the
    /// retry budget aborts the run.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Preflight` when every attempt failed.
    pub async fn preflight<R>(&self, rng: &mut R) -> AppResult<()>
    where
        R: Rng + Send + ?Sized,
    {
        let iteration = Iteration {
            virtual_user_id: 0,
            iteration_index: 0,
        };
        let payload = self.template.build(iteration, rng);
        let attempted = self.send_with_retries(&payload).await;
        match attempted.outcome {
            Ok(response) => {
                if !self.settings.success.contains(response.status) {
                    warn!(
                        "Preflight to {} returned status {}; continuing.",
                        self.transport.target(),
                        response.status
                    );
                }
                Ok(())
            }
            Err(source) => Err(AppError::Preflight {
                target: self.transport.target().to_owned(),
                attempts: attempted.attempts,
                source,
            }),
        }
    }

    /// Sleeps the configured think time. Returns `true` when shutdown arrived
    /// first and the caller should stop.
    pub async fn think(&self, shutdown_rx: &mut ShutdownReceiver) -> bool {
        if self.settings.think_time.is_zero() {
            return false;
        }
        tokio::select! {
            _ = shutdown_rx.recv() => true,
            () = sleep(self.settings.think_time) => false,
        }
    }

    async fn send_with_retries(&self, payload: &BookPayload) -> Attempted {
        let mut attempts: u32 = 0;
        loop {
            attempts = attempts.saturating_add(1);
            match self.transport.send(payload).await {
                Ok(response) => {
                    return Attempted {
                        outcome: Ok(response),
                        attempts,
                    };
                }
                Err(err) if err.is_retryable() && attempts <= self.settings.retries => {
                    debug!("Attempt {} failed, retrying: {}", attempts, err);
                    if !self.settings.retry_backoff.is_zero() {
                        sleep(self.settings.retry_backoff).await;
                    }
                }
                Err(err) => {
                    return Attempted {
                        outcome: Err(err),
                        attempts,
                    };
                }
            }
        }
    }
}
