// ABOUTME: Per-slot data store lifecycle trait.
// ABOUTME: Supports deletion and an existence probe used by the post-swap teardown wait.

use async_trait::async_trait;

/// Lifecycle operations on the per-slot data stores.
#[async_trait]
pub trait DataStores: Send + Sync {
    /// Request deletion of a named store. Deletion is asynchronous on the
    /// platform side; completion is observed via `store_exists`.
    async fn delete_store(&self, name: &str) -> Result<(), StoreError>;

    /// Whether the named store still exists (including in a deleting state).
    async fn store_exists(&self, name: &str) -> Result<bool, StoreError>;
}

/// Errors from the data-store service.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store not found: {0}")]
    NotFound(String),

    #[error("store is busy: {0}")]
    Busy(String),

    #[error("data store service error: {0}")]
    Service(String),
}
