// ABOUTME: Total dispatch over the five lifecycle phases with mandatory status reporting.
// ABOUTME: Exactly one Succeeded/Failed report reaches the engine before a phase returns.

use crate::config::Config;
use crate::events::LifecycleInvokeEvent;
use crate::platform::{
    DataStores, DeploymentEngine, HealthProbe, LifecycleStatus, ParameterStore, ScheduledTriggers,
};
use crate::stackref::StackReferenceStore;
use tokio::time::Instant;

use super::error::HookError;
use super::event::{LifecycleEvent, LifecyclePhase};
use super::health::HealthGate;
use super::teardown::Teardown;

/// Executes lifecycle hooks on behalf of the deployment engine.
///
/// Collaborator clients are created once and injected; the dispatcher is
/// reused across invocations with no explicit teardown.
pub struct HookDispatcher<E, P, T, D, H> {
    engine: E,
    refs: StackReferenceStore<P>,
    triggers: T,
    stores: D,
    probe: H,
    config: Config,
}

impl<E, P, T, D, H> HookDispatcher<E, P, T, D, H>
where
    E: DeploymentEngine,
    P: ParameterStore,
    T: ScheduledTriggers,
    D: DataStores,
    H: HealthProbe,
{
    pub fn new(engine: E, parameters: P, triggers: T, stores: D, probe: H, config: Config) -> Self {
        let refs = StackReferenceStore::new(parameters, config.active_stack_param.clone());
        Self {
            engine,
            refs,
            triggers,
            stores,
            probe,
            config,
        }
    }

    /// Execute the engine's invoke payload against the phase this handler
    /// deployment is wired to (`Config::lifecycle_phase`). The payload only
    /// carries correlation ids; the phase comes from configuration.
    pub async fn dispatch_invoke(
        &self,
        invoke: LifecycleInvokeEvent,
        invocation_deadline: Instant,
    ) -> Result<(), HookError> {
        let event = invoke.into_event(self.config.lifecycle_phase.clone());
        self.dispatch(&event, invocation_deadline).await
    }

    /// Execute one lifecycle event and report its terminal status.
    ///
    /// `invocation_deadline` is the hosting invocation's own time budget; the
    /// health gate consumes it, the other phases do not.
    ///
    /// The engine stalls until its hook timeout fires if no status arrives,
    /// so a report is always attempted, including on failure. When a phase
    /// fails and the failure report also fails, the phase error is the one
    /// raised; when the phase succeeded but reporting failed, the report
    /// error is raised so the engine's own alerting applies.
    pub async fn dispatch(
        &self,
        event: &LifecycleEvent,
        invocation_deadline: Instant,
    ) -> Result<(), HookError> {
        tracing::info!(
            phase = %event.phase,
            deployment_id = %event.deployment_id,
            "dispatching lifecycle hook"
        );

        let outcome = self.run_phase(&event.phase, invocation_deadline).await;

        match outcome {
            Ok(()) => {
                self.report(event, LifecycleStatus::Succeeded)
                    .await
                    .map_err(HookError::Report)?;
                Ok(())
            }
            Err(phase_error) => {
                if let Err(report_error) = self.report(event, LifecycleStatus::Failed).await {
                    tracing::warn!(
                        error = %report_error,
                        "failed to report hook failure; raising the phase error"
                    );
                }
                Err(phase_error)
            }
        }
    }

    /// Total over every phase: phases without behavior are successful no-ops,
    /// and an unhandled name is an explicit failure rather than a silent one.
    async fn run_phase(
        &self,
        phase: &LifecyclePhase,
        invocation_deadline: Instant,
    ) -> Result<(), HookError> {
        match phase {
            LifecyclePhase::BeforeInstall
            | LifecyclePhase::AfterInstall
            | LifecyclePhase::AfterAllowTestTraffic => Ok(()),
            LifecyclePhase::BeforeAllowTraffic => {
                let gate = HealthGate::new(
                    &self.probe,
                    &self.config.lb_host,
                    self.config.test_port,
                );
                gate.await_ready(invocation_deadline).await
            }
            LifecyclePhase::AfterAllowTraffic => {
                let teardown =
                    Teardown::new(&self.refs, &self.triggers, &self.stores, &self.config);
                teardown.run().await
            }
            LifecyclePhase::Unhandled(name) => Err(HookError::UnhandledPhase(name.clone())),
        }
    }

    async fn report(
        &self,
        event: &LifecycleEvent,
        status: LifecycleStatus,
    ) -> Result<(), crate::platform::EngineError> {
        tracing::info!(
            phase = %event.phase,
            status = status.as_str(),
            "reporting lifecycle status"
        );
        self.engine
            .put_lifecycle_status(&event.deployment_id, &event.execution_id, status)
            .await
    }
}
