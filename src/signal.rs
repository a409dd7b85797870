// ABOUTME: Synchronous completion callback for custom-resource flows.
// ABOUTME: One validated HTTP PUT to the caller-supplied single-use URL; no retry.

use crate::events::CustomResourceEvent;
use crate::platform::{CallbackTransport, TransportError};
use serde::Serialize;

/// Terminal status of the custom-resource operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignalStatus {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FAILED")]
    Failed,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CallbackPayload<'a> {
    status: SignalStatus,
    reason: String,
    physical_resource_id: &'a str,
    stack_id: &'a str,
    request_id: &'a str,
    logical_resource_id: &'a str,
    data: &'a serde_json::Value,
}

/// Errors building or delivering the completion callback.
///
/// Delivery failure is propagated uncaught by callers: the callback URL is
/// single-use, and retrying the whole invocation is the engine's job.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("event carries no callback url")]
    MissingCallbackUrl,

    #[error("event carries no logical resource id")]
    MissingLogicalResourceId,

    #[error("failed to serialize callback payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("callback delivery failed: {0}")]
    Delivery(#[from] TransportError),
}

/// Delivers the engine's completion callback.
pub struct ResponseSignaler<C> {
    transport: C,
}

impl<C: CallbackTransport> ResponseSignaler<C> {
    pub fn new(transport: C) -> Self {
        Self { transport }
    }

    /// Build the fixed-shape payload and PUT it to the event's callback URL.
    ///
    /// The callback URL and logical-resource id are validated first; their
    /// absence is a local error and no request goes out.
    pub async fn send(
        &self,
        event: &CustomResourceEvent,
        log_name: &str,
        status: SignalStatus,
        data: &serde_json::Value,
    ) -> Result<(), SignalError> {
        let url = event
            .response_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(SignalError::MissingCallbackUrl)?;
        let logical_resource_id = event
            .logical_resource_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(SignalError::MissingLogicalResourceId)?;

        let payload = CallbackPayload {
            status,
            reason: format!("See the details in log stream: {log_name}"),
            physical_resource_id: log_name,
            stack_id: &event.stack_id,
            request_id: &event.request_id,
            logical_resource_id,
            data,
        };
        let body = serde_json::to_string(&payload)?;

        tracing::info!(status = ?status, "sending completion callback");
        self.transport.put(url, &body).await?;
        Ok(())
    }
}
