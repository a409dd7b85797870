// ABOUTME: Container-definition template rewrite targeting the inactive slot.
// ABOUTME: Exactly one definition comes out, with a single TARGET_STACK env entry.

use crate::platform::TaskTemplateSpec;
use crate::stackref::StackReference;
use serde::{Deserialize, Serialize};

use super::error::RevisionError;

/// The environment variable that tells the running service which slot's
/// resources it should use.
pub const TARGET_STACK_VAR: &str = "TARGET_STACK";

/// One name/value environment entry, in template order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

impl EnvVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A container definition as it appears in the deployment template.
///
/// Fields this crate does not interpret are preserved verbatim through
/// `extra`, so the registered template matches the template the release
/// engineer wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDefinition {
    pub name: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<u64>,
    #[serde(default)]
    pub environment: Vec<EnvVar>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Rewrite a template's definitions so the first definition targets `target`.
///
/// Exactly one definition is produced. Any existing `TARGET_STACK` entry is
/// removed and a fresh one appended with the resolved slot tag; every other
/// variable keeps its value and relative order.
pub fn retarget_environment(
    definitions: Vec<ContainerDefinition>,
    target: StackReference,
) -> Result<Vec<ContainerDefinition>, RevisionError> {
    let mut definition = definitions
        .into_iter()
        .next()
        .ok_or(RevisionError::NoContainerDefinitions)?;

    definition
        .environment
        .retain(|var| var.name != TARGET_STACK_VAR);
    definition
        .environment
        .push(EnvVar::new(TARGET_STACK_VAR, target.as_tag()));

    Ok(vec![definition])
}

/// Properties of the task template that come straight off the engine event.
#[derive(Debug, Clone)]
pub struct TaskTemplateProperties {
    pub family: String,
    pub task_role: String,
    pub execution_role: String,
    pub network_mode: String,
    pub requires_compatibilities: Vec<String>,
}

/// Build a slot-targeted task template ready for registration.
///
/// Fails fast when the template has zero definitions or the first definition
/// lacks cpu/memory sizing; neither case is retryable.
pub fn build_task_template(
    properties: TaskTemplateProperties,
    definitions: Vec<ContainerDefinition>,
    target: StackReference,
) -> Result<TaskTemplateSpec, RevisionError> {
    let definitions = retarget_environment(definitions, target)?;

    let first = &definitions[0];
    let (cpu, memory) = match (first.cpu, first.memory) {
        (Some(cpu), Some(memory)) => (cpu, memory),
        _ => return Err(RevisionError::MissingSizing),
    };

    Ok(TaskTemplateSpec {
        family: properties.family,
        task_role: properties.task_role,
        execution_role: properties.execution_role,
        network_mode: properties.network_mode,
        requires_compatibilities: properties.requires_compatibilities,
        cpu: cpu.to_string(),
        memory: memory.to_string(),
        container_definitions: definitions,
    })
}
