// ABOUTME: Application-wide error types for cutover.
// ABOUTME: Uses thiserror for ergonomic error handling.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed engine event: {0}")]
    MalformedEvent(#[from] serde_json::Error),

    #[error("unknown compute class: {0}")]
    UnknownComputeClass(String),

    #[error("unable to identify the active slot for '{0}'")]
    UnknownActiveSlot(String),

    #[error(transparent)]
    StackRef(#[from] crate::stackref::StackRefError),

    #[error("template registration failed: {0}")]
    Template(#[from] crate::platform::TemplateError),

    #[error("alias lookup failed: {0}")]
    Function(#[from] crate::platform::FunctionError),

    #[error(transparent)]
    Revision(#[from] crate::revision::RevisionError),

    #[error(transparent)]
    Submit(#[from] crate::submit::SubmitError),

    #[error(transparent)]
    Hook(#[from] crate::hooks::HookError),

    #[error(transparent)]
    Signal(#[from] crate::signal::SignalError),
}

pub type Result<T> = std::result::Result<T, Error>;
