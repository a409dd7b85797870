// ABOUTME: Collaborator traits for the external platform services.
// ABOUTME: Clients are created once, injected into constructors, and reused across invocations.

mod datastore;
mod engine;
mod functions;
mod http;
mod parameters;
mod probe;
mod templates;
mod triggers;

pub use datastore::{DataStores, StoreError};
pub use engine::{
    DeploymentEngine, DeploymentRequest, EngineError, LifecycleStatus, RevisionPayload,
};
pub use functions::{FunctionAliases, FunctionError};
pub use http::{HttpCallbackTransport, HttpHealthProbe};
pub use parameters::{ParameterError, ParameterStore};
pub use probe::{CallbackTransport, HealthProbe, ProbeError, TransportError};
pub use templates::{TaskTemplateSpec, TaskTemplates, TemplateError};
pub use triggers::{ScheduledTriggers, TriggerError};
