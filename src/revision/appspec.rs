// ABOUTME: Deterministic revision content packaging and SHA-256 digesting.
// ABOUTME: Identical inputs always serialize to identical content and digest.

use crate::platform::RevisionPayload;
use crate::types::{FunctionVersion, TaskTemplateId};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use super::error::RevisionError;

/// One lifecycle hook: the engine phase it runs at and the handler it invokes.
///
/// On the wire this is a single-entry map, `{"BeforeInstall": "handler-id"}`,
/// which is how the engine's revision format spells an ordered hook list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleHook {
    pub phase: String,
    pub handler: String,
}

impl LifecycleHook {
    pub fn new(phase: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            phase: phase.into(),
            handler: handler.into(),
        }
    }
}

impl Serialize for LifecycleHook {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.phase, &self.handler)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for LifecycleHook {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HookVisitor;

        impl<'de> Visitor<'de> for HookVisitor {
            type Value = LifecycleHook;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a single-entry map of phase name to handler")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let (phase, handler): (String, String) = map
                    .next_entry()?
                    .ok_or_else(|| de::Error::custom("empty hook entry"))?;
                if map.next_entry::<String, String>()?.is_some() {
                    return Err(de::Error::custom("hook entry must have exactly one phase"));
                }
                Ok(LifecycleHook { phase, handler })
            }
        }

        deserializer.deserialize_map(HookVisitor)
    }
}

/// Traffic-routing target for a container-service deployment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerTarget {
    pub task_template: TaskTemplateId,
    pub container_name: String,
    pub container_port: u16,
}

/// Alias-shift target for a serverless-function deployment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionTarget {
    pub function_name: String,
    pub alias: String,
    pub current_version: FunctionVersion,
    pub target_version: FunctionVersion,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContainerContent<'a> {
    version: u32,
    resources: [ContainerResource<'a>; 1],
    hooks: &'a [LifecycleHook],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContainerResource<'a> {
    target_service: ContainerService<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContainerService<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    properties: &'a ContainerTarget,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FunctionContent<'a> {
    version: u32,
    resources: [FunctionResource<'a>; 1],
    hooks: &'a [LifecycleHook],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FunctionResource<'a> {
    target_function: FunctionService<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FunctionService<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    properties: &'a FunctionTarget,
}

/// Package a container-service revision: serialized content plus its digest.
pub fn container_revision(
    target: &ContainerTarget,
    hooks: &[LifecycleHook],
) -> Result<RevisionPayload, RevisionError> {
    let content = serde_json::to_string(&ContainerContent {
        version: 1,
        resources: [ContainerResource {
            target_service: ContainerService {
                kind: "container-service",
                properties: target,
            },
        }],
        hooks,
    })?;
    Ok(payload(content))
}

/// Package a serverless-function revision: serialized content plus its digest.
pub fn function_revision(
    target: &FunctionTarget,
    hooks: &[LifecycleHook],
) -> Result<RevisionPayload, RevisionError> {
    let content = serde_json::to_string(&FunctionContent {
        version: 1,
        resources: [FunctionResource {
            target_function: FunctionService {
                kind: "serverless-function",
                properties: target,
            },
        }],
        hooks,
    })?;
    Ok(payload(content))
}

fn payload(content: String) -> RevisionPayload {
    let sha256 = hex::encode(Sha256::digest(content.as_bytes()));
    RevisionPayload { content, sha256 }
}
