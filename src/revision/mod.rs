// ABOUTME: Deployment revision builders for the two compute classes.
// ABOUTME: Pure functions: template rewrite, no-op guard, and content-addressed packaging.

mod appspec;
mod container;
mod error;
mod function;

pub use appspec::{
    ContainerTarget, FunctionTarget, LifecycleHook, container_revision, function_revision,
};
pub use container::{
    ContainerDefinition, EnvVar, TARGET_STACK_VAR, TaskTemplateProperties, build_task_template,
    retarget_environment,
};
pub use error::RevisionError;
pub use function::FunctionPlan;
