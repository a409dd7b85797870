// ABOUTME: Key/value parameter service trait backing the stack-reference store.
// ABOUTME: Supports authoritative get and unconditional overwrite-put only.

use async_trait::async_trait;

/// Durable single-value parameter storage.
///
/// Every `get` must hit the backing service; implementations must not cache,
/// because multiple reads within one orchestration run have to observe the
/// latest written value.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Read the current value of a named parameter.
    async fn get_parameter(&self, name: &str) -> Result<String, ParameterError>;

    /// Overwrite the value of a named parameter. There is no compare-and-swap:
    /// the write is unconditional.
    async fn put_parameter(&self, name: &str, value: &str) -> Result<(), ParameterError>;
}

#[async_trait]
impl<T: ParameterStore + ?Sized> ParameterStore for &T {
    async fn get_parameter(&self, name: &str) -> Result<String, ParameterError> {
        (**self).get_parameter(name).await
    }

    async fn put_parameter(&self, name: &str, value: &str) -> Result<(), ParameterError> {
        (**self).put_parameter(name, value).await
    }
}

/// Errors from the parameter service.
#[derive(Debug, thiserror::Error)]
pub enum ParameterError {
    #[error("parameter not found: {0}")]
    NotFound(String),

    #[error("parameter service error: {0}")]
    Service(String),
}
