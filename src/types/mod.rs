// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Uses phantom types to prevent ID confusion at compile time.

mod build;
mod id;

pub use build::{BuildNumber, BuildNumberError};
pub use id::{DeploymentId, FunctionVersion, LifecycleExecutionId, TaskTemplateId};
