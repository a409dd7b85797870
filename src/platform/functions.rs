// ABOUTME: Serverless function alias lookup trait.
// ABOUTME: Reads the currently published version behind a named alias.

use crate::types::FunctionVersion;
use async_trait::async_trait;

/// Read access to function alias routing.
#[async_trait]
pub trait FunctionAliases: Send + Sync {
    /// Return the version currently published behind `alias` of `function`.
    async fn current_version(
        &self,
        function: &str,
        alias: &str,
    ) -> Result<FunctionVersion, FunctionError>;
}

/// Errors from the function service.
#[derive(Debug, thiserror::Error)]
pub enum FunctionError {
    #[error("alias not found: {function}/{alias}")]
    AliasNotFound { function: String, alias: String },

    #[error("function service error: {0}")]
    Service(String),
}
