// ABOUTME: Custom-resource handlers that create deployments for a build.
// ABOUTME: Guard on build numbers, dispatch by compute class, always signal a result.

mod container;
mod function;

use crate::error::{Error, Result};
use crate::events::{CustomResourceEvent, RequestType};
use crate::platform::{
    CallbackTransport, DeploymentEngine, FunctionAliases, ParameterStore, TaskTemplates,
};
use crate::signal::{ResponseSignaler, SignalStatus};
use crate::submit::RetryDriver;
use crate::types::DeploymentId;

/// How one custom-resource invocation ended. Every variant was signaled back
/// to the engine before being returned.
#[derive(Debug)]
pub enum InitOutcome {
    /// A deployment was submitted.
    Submitted {
        deployment_id: DeploymentId,
        attempts: u32,
    },
    /// Nothing to do: stale build, a Delete request, or an already-published
    /// function version.
    Noop,
    /// The flow failed; the failure was signaled with this reason.
    Failed { reason: String },
}

/// Creates slot-targeted deployments in response to custom-resource events.
///
/// Flow errors are signaled FAILED and folded into the returned outcome.
/// Only two things propagate as errors: an unknown compute class (nothing to
/// signal against) and callback delivery failure, which has nowhere left to
/// report to.
pub struct InitHandler<E, P, T, F, C> {
    engine: E,
    parameters: P,
    templates: T,
    aliases: F,
    signaler: ResponseSignaler<C>,
    driver: RetryDriver,
}

impl<E, P, T, F, C> InitHandler<E, P, T, F, C>
where
    E: DeploymentEngine,
    P: ParameterStore,
    T: TaskTemplates,
    F: FunctionAliases,
    C: CallbackTransport,
{
    pub fn new(engine: E, parameters: P, templates: T, aliases: F, transport: C) -> Self {
        Self {
            engine,
            parameters,
            templates,
            aliases,
            signaler: ResponseSignaler::new(transport),
            driver: RetryDriver::new(),
        }
    }

    /// Handle one custom-resource event. `log_name` identifies this
    /// invocation's log stream and doubles as the physical resource id.
    pub async fn handle(
        &self,
        event: &CustomResourceEvent,
        log_name: &str,
    ) -> Result<InitOutcome> {
        match event.compute_class() {
            Some("container") => container::handle(self, event, log_name).await,
            Some("function") => function::handle(self, event, log_name).await,
            other => Err(Error::UnknownComputeClass(
                other.unwrap_or("<missing>").to_string(),
            )),
        }
    }

    /// Deployments only move forward: a Delete request or a build that is not
    /// strictly newer than the deployed one is a no-op, signaled ok with zero
    /// platform calls.
    pub(crate) fn is_stale(&self, event: &CustomResourceEvent) -> bool {
        event.request_type == RequestType::Delete || event.build() <= event.old_build()
    }

    pub(crate) async fn signal_noop(
        &self,
        event: &CustomResourceEvent,
        log_name: &str,
    ) -> Result<InitOutcome> {
        let data = serde_json::json!({
            "deployment": "noop",
            "build": event.raw_build(),
        });
        self.signaler
            .send(event, log_name, SignalStatus::Success, &data)
            .await?;
        Ok(InitOutcome::Noop)
    }

    pub(crate) async fn signal_submitted(
        &self,
        event: &CustomResourceEvent,
        log_name: &str,
        deployment_id: &DeploymentId,
    ) -> Result<()> {
        let data = serde_json::json!({
            "deployment": deployment_id,
            "build": event.raw_build(),
        });
        self.signaler
            .send(event, log_name, SignalStatus::Success, &data)
            .await?;
        Ok(())
    }

    pub(crate) async fn signal_failed(
        &self,
        event: &CustomResourceEvent,
        log_name: &str,
        reason: String,
    ) -> Result<InitOutcome> {
        tracing::warn!(reason = %reason, "deployment creation failed");
        let data = serde_json::json!({
            "deployment": reason,
            "build": event.raw_build(),
        });
        self.signaler
            .send(event, log_name, SignalStatus::Failed, &data)
            .await?;
        Ok(InitOutcome::Failed { reason })
    }

    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    pub(crate) fn parameters(&self) -> &P {
        &self.parameters
    }

    pub(crate) fn templates(&self) -> &T {
        &self.templates
    }

    pub(crate) fn aliases(&self) -> &F {
        &self.aliases
    }

    pub(crate) fn driver(&self) -> &RetryDriver {
        &self.driver
    }
}
