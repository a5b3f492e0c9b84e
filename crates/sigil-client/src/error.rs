//! Error types for API requests.

use serde::{Deserialize, Deserializer, Serialize};

use crate::codec::CodecError;
use crate::transport::TransportError;

/// Error from API client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Sending the request or receiving the reply failed.
    #[error("transport error")]
    Transport(#[from] TransportError),

    /// Request signing failed (unsupported method, unusable base URL).
    #[error("OAuth signing failed")]
    OAuth(#[from] sigil_oauth::OAuthError),

    /// The reply has no recognizable status line.
    #[error("malformed response")]
    MalformedResponse(#[from] sigil_http::ParseError),

    /// The server answered with a non-2xx status.
    #[error("API error (status {}): {}", format_status(*.status), format_errors(.errors))]
    Api {
        /// HTTP status code, if one was received.
        status: Option<u16>,
        /// Error objects reported by the server.
        errors: Vec<ApiErrorObject>,
    },

    /// A 2xx body could not be decoded.
    #[error("failed to decode response body")]
    Decode(#[source] CodecError),

    /// A request body could not be encoded.
    #[error("failed to encode request body")]
    Encode(#[source] CodecError),

    /// The client base URL is not an absolute http(s) URL.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),
}

fn format_status(status: Option<u16>) -> String {
    status.map_or_else(|| "none".to_owned(), |code| code.to_string())
}

fn format_errors(errors: &[ApiErrorObject]) -> String {
    errors
        .iter()
        .map(|e| format!("[{}] {}", e.code, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error object returned by the API for a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorObject {
    /// Error code; numeric codes are kept as their decimal text.
    #[serde(deserialize_with = "deserialize_code")]
    pub code: String,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}

impl ApiErrorObject {
    /// Sentinel used when an error body cannot be decoded.
    pub fn invalid_response() -> Self {
        Self {
            code: "500".to_owned(),
            message: "Invalid response from API.".to_owned(),
        }
    }
}

/// Accept `"code": "404"` as well as `"code": 404`.
fn deserialize_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(i64),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Text(text) => text,
        Code::Number(number) => number.to_string(),
    })
}
