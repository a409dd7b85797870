// ABOUTME: Bounded wall-clock retry driver for deployment submission.
// ABOUTME: Fixed 45s delay inside an 850s deadline; the last error surfaces on expiry.

use crate::platform::{DeploymentEngine, DeploymentRequest, EngineError};
use crate::types::DeploymentId;
use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Wall-clock ceiling for one submission run, measured from the first attempt.
pub const SUBMIT_DEADLINE: Duration = Duration::from_secs(850);

/// Fixed delay between attempts. No jitter, no growth: the deadline alone
/// bounds the loop (roughly 18 attempts).
pub const SUBMIT_RETRY_DELAY: Duration = Duration::from_secs(45);

/// Successful submission: the engine's deployment id and how many attempts
/// it took to get it.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub deployment_id: DeploymentId,
    pub attempts: u32,
}

/// Terminal submission failure.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("deployment submission deadline exceeded after {attempts} attempts: {last_error}")]
    DeadlineExceeded {
        attempts: u32,
        #[source]
        last_error: EngineError,
    },
}

/// Submits a revision to the deployment engine, absorbing transient rejections.
///
/// The engine's submission API can reject while a prior deployment for the
/// same application is still draining; every error is treated as retryable
/// until the deadline passes. An empty deployment id counts as a failed
/// attempt, not a success.
#[derive(Debug, Clone, Copy)]
pub struct RetryDriver {
    deadline: Duration,
    retry_delay: Duration,
}

impl Default for RetryDriver {
    fn default() -> Self {
        Self {
            deadline: SUBMIT_DEADLINE,
            retry_delay: SUBMIT_RETRY_DELAY,
        }
    }
}

impl RetryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the policy. Production uses the defaults; this exists for
    /// callers hosted under a tighter invocation budget.
    pub fn with_policy(deadline: Duration, retry_delay: Duration) -> Self {
        Self {
            deadline,
            retry_delay,
        }
    }

    /// Drive submission until success or deadline.
    pub async fn submit<E: DeploymentEngine + ?Sized>(
        &self,
        engine: &E,
        request: &DeploymentRequest,
    ) -> Result<SubmitOutcome, SubmitError> {
        let deadline = Instant::now() + self.deadline;
        let mut attempts: u32 = 0;
        let mut last_error;

        loop {
            attempts += 1;
            match engine.create_deployment(request).await {
                Ok(deployment_id) if !deployment_id.is_empty() => {
                    tracing::info!(%deployment_id, attempts, "deployment submitted");
                    return Ok(SubmitOutcome {
                        deployment_id,
                        attempts,
                    });
                }
                Ok(_) => {
                    last_error = EngineError::MissingDeploymentId;
                }
                Err(e) => {
                    last_error = e;
                }
            }

            tracing::warn!(attempts, error = %last_error, "deployment submission failed");

            if Instant::now() >= deadline {
                return Err(SubmitError::DeadlineExceeded {
                    attempts,
                    last_error,
                });
            }

            sleep(self.retry_delay).await;

            // The delay may have consumed the rest of the budget; don't start
            // another attempt past the deadline.
            if Instant::now() >= deadline {
                return Err(SubmitError::DeadlineExceeded {
                    attempts,
                    last_error,
                });
            }
        }
    }
}
