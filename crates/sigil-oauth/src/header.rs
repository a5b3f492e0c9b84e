//! OAuth `Authorization` header generation.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::base_string::SigningContext;
use crate::credentials::Credentials;
use crate::encoding::encode;
use crate::error::OAuthError;
use crate::params::ParameterSet;
use crate::signature::SignatureMethodKind;

/// Value of `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";

/// Generate cryptographically random nonce (32 hex characters).
fn generate_nonce() -> String {
    hex::encode(rand::random::<[u8; 16]>())
}

/// Generate Unix timestamp.
fn generate_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
        .to_string()
}

/// Extract `scheme://host[:port]` from a URL.
///
/// Returns `None` when the URL has no scheme separator or no host.
pub fn origin(url: &str) -> Option<&str> {
    let authority_start = url.find("://")? + 3;
    let rest = &url[authority_start..];
    let authority_len = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    if authority_len == 0 {
        return None;
    }
    Some(&url[..authority_start + authority_len])
}

/// Signs requests with one set of credentials.
#[derive(Debug, Clone)]
pub struct OAuthSigner {
    credentials: Credentials,
    signature_method: SignatureMethodKind,
}

impl OAuthSigner {
    /// Create a signer.
    pub fn new(credentials: Credentials, signature_method: SignatureMethodKind) -> Self {
        Self {
            credentials,
            signature_method,
        }
    }

    /// Credentials used for signing.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Configured signature method.
    pub fn signature_method(&self) -> SignatureMethodKind {
        self.signature_method
    }

    /// Build the `Authorization` header value for a request.
    ///
    /// A fresh timestamp and nonce are generated on every call.
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST, etc.)
    /// * `base_url` - URL without query string (<scheme://host/path>)
    /// * `params` - Query/body parameters to include in the signature
    pub fn authorize(
        &self,
        method: &str,
        base_url: &str,
        params: &ParameterSet,
    ) -> Result<String, OAuthError> {
        self.authorize_with(
            method,
            base_url,
            params,
            &generate_timestamp(),
            &generate_nonce(),
        )
    }

    /// Build the `Authorization` header value with a fixed timestamp and nonce.
    pub fn authorize_with(
        &self,
        method: &str,
        base_url: &str,
        params: &ParameterSet,
        timestamp: &str,
        nonce: &str,
    ) -> Result<String, OAuthError> {
        let realm =
            origin(base_url).ok_or_else(|| OAuthError::InvalidBaseUrl(base_url.to_owned()))?;

        let oauth_params = self.protocol_parameters(timestamp, nonce);

        let mut parameters = params.clone();
        parameters.remove("oauth_signature");
        for (name, value) in &oauth_params {
            parameters.insert(*name, value.as_str());
        }

        let context = SigningContext {
            method: method.to_owned(),
            base_url: base_url.to_owned(),
            parameters,
            signature_method: self.signature_method,
        };
        let signature = self.sign(&context);

        debug!(
            method,
            base_url,
            signature_method = %self.signature_method,
            "Signed request"
        );

        Ok(build_authorization_header(realm, &oauth_params, &signature))
    }

    /// Sign a prepared context with this signer's secrets.
    pub fn sign(&self, context: &SigningContext) -> String {
        context.signature_method.signer().sign(
            &context.base_string(),
            &self.credentials.consumer_secret,
            &self.credentials.token_secret,
        )
    }

    /// OAuth protocol parameters, in header order.
    fn protocol_parameters(&self, timestamp: &str, nonce: &str) -> Vec<(&'static str, String)> {
        vec![
            ("oauth_consumer_key", self.credentials.consumer_key.clone()),
            ("oauth_token", self.credentials.access_token.clone()),
            (
                "oauth_signature_method",
                self.signature_method.name().to_owned(),
            ),
            ("oauth_timestamp", timestamp.to_owned()),
            ("oauth_nonce", nonce.to_owned()),
            ("oauth_version", OAUTH_VERSION.to_owned()),
        ]
    }
}

/// Assemble `OAuth realm="...",name="value",...`.
///
/// The signature is already encoded by its signer and is not encoded again.
fn build_authorization_header(
    realm: &str,
    oauth_params: &[(&'static str, String)],
    signature: &str,
) -> String {
    let mut header = format!("OAuth realm=\"{realm}\"");
    for (name, value) in oauth_params {
        header.push_str(&format!(",{name}=\"{}\"", encode(value)));
    }
    header.push_str(&format!(",oauth_signature=\"{signature}\""));
    header
}
