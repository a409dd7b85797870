// ABOUTME: Request envelopes received from the deployment-automation engine.
// ABOUTME: Custom-resource events for revision creation and invoke events for lifecycle hooks.

use crate::types::{BuildNumber, DeploymentId, LifecycleExecutionId};
use serde::Deserialize;

/// What the engine is asking the custom resource to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

/// The engine's custom-resource request envelope.
///
/// `resource_properties` stays untyped here: the compute class inside it
/// decides which typed property set applies, and a malformed set must still
/// let the correlation ids through so failure can be signaled back.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceEvent {
    pub request_type: RequestType,
    #[serde(rename = "ResponseURL", default)]
    pub response_url: Option<String>,
    pub stack_id: String,
    pub request_id: String,
    #[serde(default)]
    pub logical_resource_id: Option<String>,
    pub resource_properties: serde_json::Value,
    #[serde(default)]
    pub old_resource_properties: Option<serde_json::Value>,
}

impl CustomResourceEvent {
    /// The compute class declared in the resource properties, if any.
    pub fn compute_class(&self) -> Option<&str> {
        self.resource_properties
            .get("type")
            .and_then(serde_json::Value::as_str)
    }

    /// The raw build value off the resource properties; `"0"` when absent.
    pub fn raw_build(&self) -> String {
        self.resource_properties
            .get("build")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("0")
            .to_string()
    }

    /// The incoming build number; unparseable values count as build 0 so the
    /// build guard treats them as nothing new to deploy.
    pub fn build(&self) -> BuildNumber {
        BuildNumber::parse(&self.raw_build()).unwrap_or(BuildNumber::new(0))
    }

    /// The previously deployed build number; defaults to 0 on first deploy.
    pub fn old_build(&self) -> BuildNumber {
        self.old_resource_properties
            .as_ref()
            .and_then(|props| props.get("build"))
            .and_then(serde_json::Value::as_str)
            .and_then(|raw| BuildNumber::parse(raw).ok())
            .unwrap_or(BuildNumber::new(0))
    }
}

/// Typed properties for a container-service deployment request.
///
/// `container_definitions` and `hooks` arrive JSON-encoded inside string
/// properties; the engine's property values are always strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerProperties {
    pub build: BuildNumber,
    pub app_name: String,
    pub deployment_group_name: String,
    pub cluster: String,
    pub task_family: String,
    pub task_role: String,
    pub execution_role: String,
    #[serde(default = "default_network_mode")]
    pub network_mode: String,
    #[serde(default = "default_compatibilities")]
    pub requires_compatibilities: Vec<String>,
    pub container_name: String,
    pub container_port: String,
    pub container_definitions: String,
    #[serde(default = "empty_list")]
    pub hooks: String,
    /// Name of the parameter holding the active stack reference. When absent,
    /// slot A is assumed active and the deployment targets slot B.
    #[serde(default)]
    pub active_stack_param: Option<String>,
}

/// Typed properties for a serverless-function deployment request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionProperties {
    pub build: BuildNumber,
    pub app_name: String,
    pub deployment_group_name: String,
    pub function_name: String,
    pub function_alias: String,
    pub target_version: String,
    #[serde(default = "empty_list")]
    pub hooks: String,
}

fn default_network_mode() -> String {
    "awsvpc".to_string()
}

fn default_compatibilities() -> Vec<String> {
    vec!["FARGATE".to_string()]
}

fn empty_list() -> String {
    "[]".to_string()
}

/// The engine's lifecycle-hook invoke payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LifecycleInvokeEvent {
    #[serde(rename = "DeploymentId")]
    pub deployment_id: DeploymentId,
    #[serde(rename = "LifecycleEventHookExecutionId")]
    pub execution_id: LifecycleExecutionId,
}

impl LifecycleInvokeEvent {
    /// Combine the invoke payload with the phase this handler is wired to.
    pub fn into_event(self, phase: crate::hooks::LifecyclePhase) -> crate::hooks::LifecycleEvent {
        crate::hooks::LifecycleEvent {
            phase,
            deployment_id: self.deployment_id,
            execution_id: self.execution_id,
        }
    }
}
