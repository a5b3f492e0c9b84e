//! Error types for request signing.

/// Error raised while signing a request.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OAuthError {
    /// The configured signature method has no signer.
    #[error("unsupported signature method: {0}")]
    UnsupportedSignatureMethod(String),

    /// The base URL has no `scheme://host` origin to use as realm.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}
