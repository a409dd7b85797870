// ABOUTME: Deployment engine trait: revision submission and lifecycle status reporting.
// ABOUTME: The engine drives install/traffic-shift phases; this crate only submits and reports.

use crate::types::{DeploymentId, LifecycleExecutionId};
use async_trait::async_trait;

/// A content-addressed revision as the engine's submission API expects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionPayload {
    /// Serialized appspec content.
    pub content: String,
    /// Hex SHA-256 digest of `content`, used by the engine for integrity
    /// verification. Not a deduplication key.
    pub sha256: String,
}

/// Request to create a deployment for one application.
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
    pub application_name: String,
    pub deployment_group_name: String,
    pub revision: RevisionPayload,
}

/// Terminal status of one lifecycle-hook execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStatus {
    Succeeded,
    Failed,
}

impl LifecycleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleStatus::Succeeded => "Succeeded",
            LifecycleStatus::Failed => "Failed",
        }
    }
}

/// The external deployment-automation engine.
#[async_trait]
pub trait DeploymentEngine: Send + Sync {
    /// Submit a revision for deployment. The engine may reject while a prior
    /// deployment for the same application is still draining; callers retry.
    async fn create_deployment(
        &self,
        request: &DeploymentRequest,
    ) -> Result<DeploymentId, EngineError>;

    /// Report the terminal status of a lifecycle-hook execution. The engine
    /// stalls until its own hook timeout fires if this is never called.
    async fn put_lifecycle_status(
        &self,
        deployment_id: &DeploymentId,
        execution_id: &LifecycleExecutionId,
        status: LifecycleStatus,
    ) -> Result<(), EngineError>;
}

/// Errors from the deployment engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("deployment submission rejected: {0}")]
    SubmissionRejected(String),

    #[error("engine throttled the request: {0}")]
    Throttled(String),

    #[error("engine returned no deployment id")]
    MissingDeploymentId,

    #[error("engine error: {0}")]
    Service(String),
}
