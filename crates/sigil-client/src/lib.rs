//! Signed API client.
//!
//! [`ApiClient`] signs every request with OAuth 1.0a, sends it through a
//! [`Transport`], structures the raw reply with [`sigil_http::parse`] and
//! decodes the body with a [`PayloadCodec`].
//!
//! ```ignore
//! use sigil_client::ApiClient;
//! use sigil_oauth::{Credentials, ParameterSet};
//!
//! let client = ApiClient::new(
//!     "https://api.example.com",
//!     Credentials::new("consumer_key", "consumer_secret", "token", "token_secret"),
//! )?
//! .with_acting_account("42");
//!
//! let videos: Option<serde_json::Value> = client.get("/videos?page=2", &ParameterSet::new())?;
//! ```

mod client;
mod codec;
mod error;
mod request;
mod transport;

pub use client::{ApiClient, DEFAULT_USER_AGENT};
pub use codec::{CodecError, JsonCodec, PayloadCodec};
pub use error::{ApiErrorObject, ClientError};
pub use request::{HttpMethod, PreparedRequest};
pub use transport::{DEFAULT_TIMEOUT, Transport, TransportError, UreqTransport};
