// ABOUTME: Container-service deployment creation flow.
// ABOUTME: Resolves the inactive slot, rewrites the template, registers it, and submits.

use crate::error::{Error, Result};
use crate::events::{ContainerProperties, CustomResourceEvent};
use crate::platform::{
    CallbackTransport, DeploymentEngine, DeploymentRequest, FunctionAliases, ParameterStore,
    TaskTemplates,
};
use crate::revision::{
    ContainerDefinition, ContainerTarget, LifecycleHook, TARGET_STACK_VAR,
    TaskTemplateProperties, build_task_template, container_revision,
};
use crate::stackref::{StackReference, StackReferenceStore};
use crate::submit::SubmitOutcome;

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

    let props: ContainerProperties = match serde_json::from_value(event.resource_properties.clone())
    {
        Ok(props) => props,
        Err(e) => {
            return handler
                .signal_failed(event, log_name, format!("missing params on event: {e}"))
                .await;
        }
    };

    match deploy(handler, event, &props).await {
        Ok(outcome) => {
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

async fn deploy<E, P, T, F, C>(
    handler: &InitHandler<E, P, T, F, C>,
    event: &CustomResourceEvent,
    props: &ContainerProperties,
) -> Result<SubmitOutcome>
where
    E: DeploymentEngine,
    P: ParameterStore,
    T: TaskTemplates,
    F: FunctionAliases,
    C: CallbackTransport,
{
    let target = resolve_target_slot(handler, event, props).await?;
    tracing::info!(target = %target, family = %props.task_family, "building slot-targeted template");

    let definitions: Vec<ContainerDefinition> =
        serde_json::from_str(&props.container_definitions)?;

    let spec = build_task_template(
        TaskTemplateProperties {
            family: props.task_family.clone(),
            task_role: props.task_role.clone(),
            execution_role: props.execution_role.clone(),
            network_mode: props.network_mode.clone(),
            requires_compatibilities: props.requires_compatibilities.clone(),
        },
        definitions,
        target,
    )?;

    let task_template = handler.templates().register_template(&spec).await?;

    let container_port = props.container_port.parse::<u16>().map_err(|_| {
        Error::InvalidConfig(format!("invalid containerPort: '{}'", props.container_port))
    })?;
    let hooks: Vec<LifecycleHook> = serde_json::from_str(&props.hooks)?;

    let revision = container_revision(
        &ContainerTarget {
            task_template,
            container_name: props.container_name.clone(),
            container_port,
        },
        &hooks,
    )?;

    let request = DeploymentRequest {
        application_name: props.app_name.clone(),
        deployment_group_name: props.deployment_group_name.clone(),
        revision,
    };

    Ok(handler.driver().submit(handler.engine(), &request).await?)
}

/// Resolve the slot the new deployment should target: the inverse of the
/// active one.
///
/// The named parameter is authoritative when present. Without one, an Update
/// infers the active slot from the template currently serving the family; a
/// first deploy has nothing to inspect, so slot A is assumed active.
async fn resolve_target_slot<E, P, T, F, C>(
    handler: &InitHandler<E, P, T, F, C>,
    event: &CustomResourceEvent,
    props: &ContainerProperties,
) -> Result<StackReference>
where
    E: DeploymentEngine,
    P: ParameterStore,
    T: TaskTemplates,
    F: FunctionAliases,
    C: CallbackTransport,
{
    let active = match props.active_stack_param.as_deref() {
        Some(name) => {
            let store = StackReferenceStore::new(handler.parameters(), name);
            store.get_active().await?
        }
        None if event.old_resource_properties.is_some() => {
            infer_active_slot(handler.templates(), &props.cluster, &props.task_family).await?
        }
        None => StackReference::A,
    };
    Ok(active.invert())
}

/// Read the active slot off the serving template's environment.
///
/// # Errors
///
/// Returns `Error::UnknownActiveSlot` when no template is serving the family
/// or its definitions carry no target-slot entry; deploying on a guess could
/// land in the live slot.
async fn infer_active_slot<T: TaskTemplates>(
    templates: &T,
    cluster: &str,
    family: &str,
) -> Result<StackReference> {
    let serving = templates.serving_template(cluster, family).await?;
    let tag = serving
        .as_ref()
        .and_then(|spec| spec.container_definitions.last())
        .and_then(|definition| {
            definition
                .environment
                .iter()
                .find(|var| var.name == TARGET_STACK_VAR)
        })
        .map(|var| var.value.clone())
        .ok_or_else(|| Error::UnknownActiveSlot(family.to_string()))?;

    let active = StackReference::from_tag(&tag);
    tracing::info!(family, active = %active, "inferred active slot from serving template");
    Ok(active)
}
