// ABOUTME: Error types for lifecycle-hook execution.
// ABOUTME: Health-gate and teardown failures are terminal for the phase that hit them.

use crate::platform::{EngineError, StoreError, TriggerError};
use crate::stackref::StackRefError;

/// Errors raised while executing a lifecycle phase.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    /// The health gate never observed a ready endpoint. Traffic must not
    /// shift. `last_status` is None when no probe ever completed.
    #[error("health endpoint returned {}", last_status.map(|s| s.to_string()).unwrap_or_else(|| "no response".to_string()))]
    HealthGateFailed { last_status: Option<u16> },

    /// Reading or flipping the active stack reference failed.
    #[error(transparent)]
    StackRef(#[from] StackRefError),

    /// Disabling the retiring slot's scheduled trigger failed.
    #[error("failed to disable trigger '{name}': {source}")]
    TriggerDisable {
        name: String,
        #[source]
        source: TriggerError,
    },

    /// Deleting the retiring slot's data store failed.
    #[error("failed to delete store '{name}': {source}")]
    StoreDelete {
        name: String,
        #[source]
        source: StoreError,
    },

    /// Probing for store absence failed.
    #[error("failed to check store '{name}': {source}")]
    StoreWait {
        name: String,
        #[source]
        source: StoreError,
    },

    /// The store still existed when the deletion-wait ceiling expired.
    #[error("store '{name}' still exists after {ceiling_secs}s")]
    StoreWaitTimeout { name: String, ceiling_secs: u64 },

    /// The phase name is outside the canonical set.
    #[error("unhandled lifecycle phase: {0}")]
    UnhandledPhase(String),

    /// The terminal status report to the engine failed.
    #[error("failed to report lifecycle status: {0}")]
    Report(#[source] EngineError),
}
