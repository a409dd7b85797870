// ABOUTME: BeforeAllowTraffic health gate over the test-traffic endpoint.
// ABOUTME: Polls until the first 200, a non-ready final poll, or the invocation budget runs out.

use crate::platform::HealthProbe;
use std::time::Duration;
use tokio::time::{Instant, sleep};

use super::error::HookError;

/// The gate stops polling once less than this much invocation budget remains,
/// leaving room to report status before the host kills the invocation.
pub const HEALTH_MIN_REMAINING: Duration = Duration::from_secs(30);

/// Fixed wait between polls after a not-ready response.
pub const HEALTH_POLL_DELAY: Duration = Duration::from_secs(10);

/// Gates traffic shift on the new slot answering health checks.
///
/// Ready means HTTP 200 exactly. Any other status, and any transport
/// failure, is "not ready" and polled again after a fixed delay. The loop
/// consumes the invocation's own remaining-time budget; it shares no deadline
/// with the submission or teardown ceilings.
pub struct HealthGate<'a, P> {
    probe: &'a P,
    endpoint: String,
}

impl<'a, P: HealthProbe> HealthGate<'a, P> {
    /// `host` and `test_port` address the test-traffic listener; the path is
    /// always `/health`.
    pub fn new(probe: &'a P, host: &str, test_port: u16) -> Self {
        Self {
            probe,
            endpoint: format!("{host}:{test_port}/health"),
        }
    }

    /// Poll until ready or until the invocation budget is nearly spent.
    ///
    /// # Errors
    ///
    /// Returns `HookError::HealthGateFailed` when the loop exits without a
    /// 200; the caller must not let traffic shift.
    pub async fn await_ready(&self, invocation_deadline: Instant) -> Result<(), HookError> {
        let mut last_status: Option<u16> = None;

        while remaining(invocation_deadline) > HEALTH_MIN_REMAINING {
            match self.probe.probe(&self.endpoint).await {
                Ok(status) => {
                    last_status = Some(status);
                    if status == 200 {
                        tracing::info!(endpoint = %self.endpoint, "health gate passed");
                        return Ok(());
                    }
                    tracing::debug!(endpoint = %self.endpoint, status, "endpoint not ready");
                }
                Err(e) => {
                    // Transport failure counts as not ready, not as terminal.
                    last_status = None;
                    tracing::debug!(endpoint = %self.endpoint, error = %e, "health probe failed");
                }
            }

            sleep(HEALTH_POLL_DELAY).await;
        }

        tracing::warn!(
            endpoint = %self.endpoint,
            last_status = ?last_status,
            "health gate exhausted without a ready response"
        );
        Err(HookError::HealthGateFailed { last_status })
    }
}

fn remaining(deadline: Instant) -> Duration {
    deadline.saturating_duration_since(Instant::now())
}
