// ABOUTME: Lifecycle phase model and the per-invocation hook event.
// ABOUTME: Phases are a closed set plus an explicit Unhandled case, so typos cannot pass silently.

use crate::types::{DeploymentId, LifecycleExecutionId};
use std::fmt;

/// The engine's lifecycle phases, in engine-defined order:
/// BeforeInstall → AfterInstall → AfterAllowTestTraffic → BeforeAllowTraffic
/// → AfterAllowTraffic.
///
/// The wire value is an open string, so anything outside the five canonical
/// names parses to `Unhandled`. Dispatch stays total: an unhandled phase
/// reports failure instead of silently succeeding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    BeforeInstall,
    AfterInstall,
    AfterAllowTestTraffic,
    BeforeAllowTraffic,
    AfterAllowTraffic,
    Unhandled(String),
}

impl LifecyclePhase {
    pub fn parse(name: &str) -> Self {
        match name {
            "BeforeInstall" => LifecyclePhase::BeforeInstall,
            "AfterInstall" => LifecyclePhase::AfterInstall,
            "AfterAllowTestTraffic" => LifecyclePhase::AfterAllowTestTraffic,
            "BeforeAllowTraffic" => LifecyclePhase::BeforeAllowTraffic,
            "AfterAllowTraffic" => LifecyclePhase::AfterAllowTraffic,
            other => LifecyclePhase::Unhandled(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LifecyclePhase::BeforeInstall => "BeforeInstall",
            LifecyclePhase::AfterInstall => "AfterInstall",
            LifecyclePhase::AfterAllowTestTraffic => "AfterAllowTestTraffic",
            LifecyclePhase::BeforeAllowTraffic => "BeforeAllowTraffic",
            LifecyclePhase::AfterAllowTraffic => "AfterAllowTraffic",
            LifecyclePhase::Unhandled(name) => name,
        }
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One hook invocation: the phase being executed and the correlation ids the
/// status report must carry. Ephemeral, one instance per call.
#[derive(Debug, Clone)]
pub struct LifecycleEvent {
    pub phase: LifecyclePhase,
    pub deployment_id: DeploymentId,
    pub execution_id: LifecycleExecutionId,
}
