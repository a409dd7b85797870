// ABOUTME: Serverless-function deployment creation flow.
// ABOUTME: Short-circuits to a no-op when the alias already serves the target version.

use crate::error::Result;
use crate::events::{CustomResourceEvent, FunctionProperties};
use crate::platform::{
    CallbackTransport, DeploymentEngine, DeploymentRequest, FunctionAliases, ParameterStore,
    TaskTemplates,
};
use crate::revision::{FunctionPlan, FunctionTarget, LifecycleHook, function_revision};
use crate::submit::SubmitOutcome;
use crate::types::FunctionVersion;

use super::{InitHandler, InitOutcome};

pub(super) async fn handle<E, P, T, F, C>(
    handler: &InitHandler<E, P, T, F, C>,
    event: &CustomResourceEvent,
    log_name: &str,
) -> Result<InitOutcome>
where
    E: DeploymentEngine,
    P: ParameterStore,
    T: TaskTemplates,
    F: FunctionAliases,
    C: CallbackTransport,
{
    if handler.is_stale(event) {
        return handler.signal_noop(event, log_name).await;
    }

    let props: FunctionProperties = match serde_json::from_value(event.resource_properties.clone())
    {
        Ok(props) => props,
        Err(e) => {
            return handler
                .signal_failed(event, log_name, format!("missing params on event: {e}"))
                .await;
        }
    };

    match deploy(handler, &props).await {
        Ok(None) => handler.signal_noop(event, log_name).await,
        Ok(Some(outcome)) => {
            handler
                .signal_submitted(event, log_name, &outcome.deployment_id)
                .await?;
            Ok(InitOutcome::Submitted {
                deployment_id: outcome.deployment_id,
                attempts: outcome.attempts,
            })
        }
        Err(e) => handler.signal_failed(event, log_name, e.to_string()).await,
    }
}

/// Returns `None` when the published version already matches the target.
/// The guard must run before any submission.
async fn deploy<E, P, T, F, C>(
    handler: &InitHandler<E, P, T, F, C>,
    props: &FunctionProperties,
) -> Result<Option<SubmitOutcome>>
where
    E: DeploymentEngine,
    P: ParameterStore,
    T: TaskTemplates,
    F: FunctionAliases,
    C: CallbackTransport,
{
    let current = handler
        .aliases()
        .current_version(&props.function_name, &props.function_alias)
        .await?;
    let target = FunctionVersion::new(props.target_version.clone());

    let (current, target) = match FunctionPlan::for_versions(current, target) {
        FunctionPlan::Noop => {
            tracing::info!(
                function = %props.function_name,
                version = %props.target_version,
                "published version matches target, no deployment needed"
            );
            return Ok(None);
        }
        FunctionPlan::Deploy { current, target } => (current, target),
    };

    let hooks: Vec<LifecycleHook> = serde_json::from_str(&props.hooks)?;

    let revision = function_revision(
        &FunctionTarget {
            function_name: props.function_name.clone(),
            alias: props.function_alias.clone(),
            current_version: current,
            target_version: target,
        },
        &hooks,
    )?;

    let request = DeploymentRequest {
        application_name: props.app_name.clone(),
        deployment_group_name: props.deployment_group_name.clone(),
        revision,
    };

    Ok(Some(
        handler.driver().submit(handler.engine(), &request).await?,
    ))
}
