// ABOUTME: Idempotence guard for function deployments.
// ABOUTME: Publishing the already-live version is a no-op, decided before any submission.

use crate::types::FunctionVersion;

/// Outcome of comparing the published alias version with the requested one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionPlan {
    /// The alias already points at the target version; nothing to deploy.
    Noop,
    /// A traffic shift from `current` to `target` is required.
    Deploy {
        current: FunctionVersion,
        target: FunctionVersion,
    },
}

impl FunctionPlan {
    /// Decide whether a deployment is needed. Must run before any submission:
    /// an equal version short-circuits the whole flow.
    pub fn for_versions(current: FunctionVersion, target: FunctionVersion) -> Self {
        if current == target {
            FunctionPlan::Noop
        } else {
            FunctionPlan::Deploy { current, target }
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, FunctionPlan::Noop)
    }
}
