// ABOUTME: Scheduled trigger control trait.
// ABOUTME: Disables a slot's scheduler rule so it stops producing new work.

use async_trait::async_trait;

/// Control over named scheduled triggers (cron-style rules).
#[async_trait]
pub trait ScheduledTriggers: Send + Sync {
    /// Disable a trigger by name. Disabling an already disabled trigger
    /// succeeds.
    async fn disable_trigger(&self, name: &str) -> Result<(), TriggerError>;
}

/// Errors from the scheduler service.
#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    #[error("trigger not found: {0}")]
    NotFound(String),

    #[error("scheduler service error: {0}")]
    Service(String),
}
