//! OAuth 1.0a request signing.
//!
//! This crate turns an outgoing request description into a signed
//! `Authorization` header:
//! - [`encoding`]: RFC 3986 percent-encoding
//! - [`query`]: flat query-string parsing and building
//! - [`ParameterSet`]: ordered request parameters (un-encoded values)
//! - [`base_string`]: signature base string normalization
//! - [`SignatureMethod`]: HMAC-SHA1 and PLAINTEXT signers
//! - [`OAuthSigner`]: nonce/timestamp generation and header assembly
//!
//! # Example
//!
//! ```ignore
//! use sigil_oauth::{Credentials, OAuthSigner, ParameterSet, SignatureMethodKind};
//!
//! let credentials = Credentials::new("key", "secret", "token", "token_secret");
//! let signer = OAuthSigner::new(credentials, SignatureMethodKind::HmacSha1);
//!
//! let mut params = ParameterSet::new();
//! params.insert("page", "2");
//!
//! let header = signer.authorize("GET", "https://api.example.com/videos", &params)?;
//! ```

pub mod base_string;
mod credentials;
pub mod encoding;
mod error;
mod header;
mod params;
pub mod query;
mod signature;

pub use base_string::SigningContext;
pub use credentials::Credentials;
pub use error::OAuthError;
pub use header::{OAUTH_VERSION, OAuthSigner, origin};
pub use params::{ParamValue, ParameterSet};
pub use signature::{HmacSha1, Plaintext, SignatureMethod, SignatureMethodKind};
