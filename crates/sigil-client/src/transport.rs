//! Request/response exchange.
//!
//! A [`Transport`] sends a [`PreparedRequest`] and returns the complete raw
//! reply (status line, headers, blank line, body) for the response parser.

use std::time::Duration;

use tracing::debug;
use ureq::Agent;
use ureq::http::Response;

use crate::request::{HttpMethod, PreparedRequest};

/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport-level failure.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    Http(#[from] ureq::Error),

    /// Failure reported by another transport.
    #[error("{0}")]
    Other(String),
}

/// Sends one request and returns the raw response bytes.
///
/// The exchange is atomic from the client's point of view: no retries and
/// no partial responses.
pub trait Transport: Send + Sync {
    /// Execute the request.
    fn execute(&self, request: &PreparedRequest) -> Result<Vec<u8>, TransportError>;
}

/// [`Transport`] backed by a `ureq` agent.
///
/// HTTP error statuses are returned as responses, not errors.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Create a transport with the given global timeout.
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &PreparedRequest) -> Result<Vec<u8>, TransportError> {
        let url = request.url.as_str();
        let body = request.body.as_deref().unwrap_or_default();

        let response = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(url), &request.headers).call()?,
            HttpMethod::Delete => with_headers(self.agent.delete(url), &request.headers).call()?,
            HttpMethod::Post => with_headers(self.agent.post(url), &request.headers).send(body)?,
            HttpMethod::Put => with_headers(self.agent.put(url), &request.headers).send(body)?,
        };

        Ok(to_wire_bytes(response)?)
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// Re-serialize a received response as HTTP/1.1 wire bytes.
fn to_wire_bytes(response: Response<ureq::Body>) -> Result<Vec<u8>, ureq::Error> {
    let status = response.status();
    let mut raw = format!(
        "HTTP/1.1 {} {}\r\n",
        status.as_u16(),
        status.canonical_reason().unwrap_or_default()
    )
    .into_bytes();

    for (name, value) in response.headers() {
        raw.extend_from_slice(name.as_str().as_bytes());
        raw.extend_from_slice(b": ");
        raw.extend_from_slice(value.as_bytes());
        raw.extend_from_slice(b"\r\n");
    }
    raw.extend_from_slice(b"\r\n");

    let mut body_reader = response.into_body();
    let body = body_reader.read_to_vec()?;
    debug!(status = status.as_u16(), body_len = body.len(), "Received response");
    raw.extend_from_slice(&body);

    Ok(raw)
}
