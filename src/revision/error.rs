// ABOUTME: Error types for revision building.
// ABOUTME: Validation failures fail fast and are never retried.

/// Errors building a deployment revision.
#[derive(Debug, thiserror::Error)]
pub enum RevisionError {
    /// The container template carried no definitions.
    #[error("container template has no definitions")]
    NoContainerDefinitions,

    /// The first container definition is missing cpu or memory sizing.
    #[error("container definition lacks cpu/memory sizing")]
    MissingSizing,

    /// Revision content could not be serialized.
    #[error("failed to serialize revision content: {0}")]
    Serialization(#[from] serde_json::Error),
}
