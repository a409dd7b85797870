// ABOUTME: Container task-template registration trait.
// ABOUTME: Registers a family of container definitions and returns the template identifier.

use crate::revision::ContainerDefinition;
use crate::types::TaskTemplateId;
use async_trait::async_trait;

/// A fully resolved task template ready for registration.
#[derive(Debug, Clone)]
pub struct TaskTemplateSpec {
    pub family: String,
    pub task_role: String,
    pub execution_role: String,
    pub network_mode: String,
    pub requires_compatibilities: Vec<String>,
    pub cpu: String,
    pub memory: String,
    pub container_definitions: Vec<ContainerDefinition>,
}

/// Registry of container task templates.
#[async_trait]
pub trait TaskTemplates: Send + Sync {
    /// Register a new task template revision and return its identifier.
    async fn register_template(
        &self,
        spec: &TaskTemplateSpec,
    ) -> Result<TaskTemplateId, TemplateError>;

    /// The template behind the primary deployment of `family` in `cluster`,
    /// or `None` when the family is not currently serving.
    async fn serving_template(
        &self,
        cluster: &str,
        family: &str,
    ) -> Result<Option<TaskTemplateSpec>, TemplateError>;
}

/// Errors from task-template registration.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("invalid task template: {0}")]
    Invalid(String),

    #[error("template registry error: {0}")]
    Service(String),
}
