//! OAuth credentials.

use std::fmt;

/// Consumer and access-token credentials for one client.
///
/// Supplied once and shared read-only by every request the client signs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// OAuth consumer key.
    pub consumer_key: String,
    /// OAuth consumer secret.
    pub consumer_secret: String,
    /// OAuth access token.
    pub access_token: String,
    /// OAuth access token secret.
    pub token_secret: String,
}

impl Credentials {
    /// Create credentials from their four parts.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            token_secret: token_secret.into(),
        }
    }
}

// Secrets stay out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &self.access_token)
            .field("token_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = Credentials::new("ck", "cs-secret", "at", "ts-secret");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("ck"));
        assert!(!debug.contains("cs-secret"));
        assert!(!debug.contains("ts-secret"));
    }
}
