// ABOUTME: Hyper-based production implementations of HealthProbe and CallbackTransport.
// ABOUTME: Plain HTTP/1.1 over TCP; a TLS-capable transport can be injected instead.

use async_trait::async_trait;
use http_body_util::BodyExt;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use super::probe::{CallbackTransport, HealthProbe, ProbeError, TransportError};

/// Split a URL into (host, port, path). Accepts an optional `http://` scheme;
/// the health endpoint is addressed scheme-less as `{host}:{port}/path`.
fn split_url(url: &str) -> Result<(String, u16, String), String> {
    let rest = match url.split_once("://") {
        Some(("http", rest)) => rest,
        Some((scheme, _)) => return Err(format!("unsupported scheme: {scheme}")),
        None => url,
    };

    let (authority, path) = match rest.find('/') {
        Some(idx) => (&rest[..idx], rest[idx..].to_string()),
        None => (rest, "/".to_string()),
    };

    if authority.is_empty() {
        return Err("missing host".to_string());
    }

    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port)) => {
            let port = port
                .parse::<u16>()
                .map_err(|_| format!("invalid port: {port}"))?;
            (host.to_string(), port)
        }
        None => (authority.to_string(), 80),
    };

    Ok((host, port, path))
}

async fn send_request(
    host: &str,
    port: u16,
    request: hyper::Request<http_body_util::Full<bytes::Bytes>>,
) -> Result<hyper::Response<hyper::body::Incoming>, String> {
    let stream = TcpStream::connect((host, port))
        .await
        .map_err(|e| format!("failed to connect to {host}:{port}: {e}"))?;

    let io = TokioIo::new(stream);

    let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
        .await
        .map_err(|e| format!("HTTP handshake failed: {e}"))?;

    tokio::spawn(async move {
        if let Err(e) = conn.await {
            tracing::warn!("http connection error: {}", e);
        }
    });

    sender
        .send_request(request)
        .await
        .map_err(|e| format!("request failed: {e}"))
}

/// Probes the test-traffic health endpoint with a plain GET.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpHealthProbe;

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn probe(&self, url: &str) -> Result<u16, ProbeError> {
        let (host, port, path) = split_url(url).map_err(ProbeError::InvalidUrl)?;

        let request = hyper::Request::builder()
            .method("GET")
            .uri(&path)
            .header("Host", &host)
            .body(http_body_util::Full::new(bytes::Bytes::new()))
            .map_err(|e| ProbeError::Request(format!("failed to build request: {e}")))?;

        let response = send_request(&host, port, request)
            .await
            .map_err(ProbeError::Request)?;

        let status = response.status().as_u16();
        // Drain the body so the connection task can finish.
        let _ = response.into_body().collect().await;
        Ok(status)
    }
}

/// Delivers the completion callback with a single HTTP PUT.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpCallbackTransport;

#[async_trait]
impl CallbackTransport for HttpCallbackTransport {
    async fn put(&self, url: &str, body: &str) -> Result<(), TransportError> {
        let (host, port, path) = split_url(url).map_err(TransportError::InvalidUrl)?;

        let payload = bytes::Bytes::from(body.to_string());

        // The consuming engine rejects callbacks carrying a real content-type,
        // so the header is deliberately an empty string.
        let request = hyper::Request::builder()
            .method("PUT")
            .uri(&path)
            .header("Host", &host)
            .header("content-type", "")
            .header("content-length", payload.len())
            .body(http_body_util::Full::new(payload))
            .map_err(|e| TransportError::Request(format!("failed to build request: {e}")))?;

        let response = send_request(&host, port, request)
            .await
            .map_err(TransportError::Request)?;

        let status = response.status();
        let _ = response.into_body().collect().await;

        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        Ok(())
    }
}
