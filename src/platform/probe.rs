// ABOUTME: HTTP probe and callback transport traits.
// ABOUTME: The two network surfaces this crate owns end-to-end, kept injectable for tests.

use async_trait::async_trait;

/// Probe for the test-traffic health endpoint.
///
/// Only the status code matters to the health gate: 200 means ready,
/// anything else (including transport failure) means not ready.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Issue a GET against `url` and return the HTTP status code.
    async fn probe(&self, url: &str) -> Result<u16, ProbeError>;
}

/// Errors from the health probe. The gate treats these as "not ready",
/// not as terminal failures.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("invalid probe url: {0}")]
    InvalidUrl(String),

    #[error("probe request failed: {0}")]
    Request(String),
}

/// One-shot delivery transport for the engine's completion callback.
#[async_trait]
pub trait CallbackTransport: Send + Sync {
    /// PUT `body` to the caller-supplied callback `url`. The content-type
    /// header must be an empty string; the consuming engine requires it.
    async fn put(&self, url: &str, body: &str) -> Result<(), TransportError>;
}

/// Errors delivering the completion callback.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid callback url: {0}")]
    InvalidUrl(String),

    #[error("callback request failed: {0}")]
    Request(String),

    #[error("callback endpoint returned status {0}")]
    Status(u16),
}
