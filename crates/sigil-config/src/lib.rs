//! Configuration management for Sigil.
//!
//! Parses `sigil.toml` with serde and searches the current directory and
//! its parents when no explicit path is given. CLI settings are applied
//! after loading via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields: `api.base_url`, `api.acting_account` and every
//! `[oauth]` string.
//!
//! ```toml
//! [api]
//! base_url = "https://api.example.com"
//! acting_account = "42"
//!
//! [oauth]
//! consumer_key = "${SIGIL_CONSUMER_KEY}"
//! consumer_secret = "${SIGIL_CONSUMER_SECRET}"
//! access_token = "${SIGIL_ACCESS_TOKEN}"
//! token_secret = "${SIGIL_TOKEN_SECRET}"
//! signature_method = "HMAC-SHA1"
//! ```

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use sigil_oauth::{Credentials, SignatureMethodKind};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sigil.toml";

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override API base URL.
    pub base_url: Option<String>,
    /// Override acting account.
    pub acting_account: Option<String>,
    /// Override request timeout.
    pub timeout_secs: Option<u64>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API endpoint configuration.
    pub api: ApiConfig,
    /// OAuth credentials (optional section).
    pub oauth: Option<OAuthConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// API endpoint configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API base URL (`scheme://host[:port][/prefix]`).
    pub base_url: String,
    /// `User-Agent` override.
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Account to act on behalf of.
    pub acting_account: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            user_agent: None,
            timeout_secs: 30,
            acting_account: None,
        }
    }
}

impl ApiConfig {
    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// OAuth credentials configuration.
#[derive(Debug, Deserialize)]
pub struct OAuthConfig {
    /// OAuth consumer key.
    pub consumer_key: String,
    /// OAuth consumer secret.
    pub consumer_secret: String,
    /// OAuth access token.
    pub access_token: String,
    /// OAuth access token secret.
    pub token_secret: String,
    /// Signature method wire name.
    #[serde(default = "default_signature_method")]
    pub signature_method: String,
}

fn default_signature_method() -> String {
    SignatureMethodKind::default().name().to_owned()
}

impl OAuthConfig {
    /// Validate that all required fields are properly set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.consumer_key, "oauth.consumer_key")?;
        require_non_empty(&self.consumer_secret, "oauth.consumer_secret")?;
        require_non_empty(&self.access_token, "oauth.access_token")?;
        require_non_empty(&self.token_secret, "oauth.token_secret")?;
        self.signature_method()?;
        Ok(())
    }

    /// Parsed signature method.
    pub fn signature_method(&self) -> Result<SignatureMethodKind, ConfigError> {
        self.signature_method
            .parse()
            .map_err(|e| ConfigError::Validation(format!("oauth.signature_method: {e}")))
    }

    /// Credentials for signing.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.consumer_key.as_str(),
            self.consumer_secret.as_str(),
            self.access_token.as_str(),
            self.token_secret.as_str(),
        )
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`oauth.token_secret`").
        field: String,
        /// Error message (e.g., "${`SIGIL_TOKEN_SECRET`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sigil.toml` in current directory and parents,
    /// falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_url) = &settings.base_url {
            self.api.base_url.clone_from(base_url);
        }
        if let Some(account) = &settings.acting_account {
            self.api.acting_account = Some(account.clone());
        }
        if let Some(timeout) = settings.timeout_secs {
            self.api.timeout_secs = timeout;
        }
    }

    /// Get the API configuration, requiring a base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `api.base_url` is unset or invalid.
    pub fn require_api(&self) -> Result<&ApiConfig, ConfigError> {
        require_non_empty(&self.api.base_url, "api.base_url")?;
        require_http_url(&self.api.base_url, "api.base_url")?;
        Ok(&self.api)
    }

    /// Get validated OAuth configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_oauth(&self) -> Result<&OAuthConfig, ConfigError> {
        let oauth = self
            .oauth
            .as_ref()
            .ok_or_else(|| ConfigError::Validation("[oauth] section required in config".into()))?;
        oauth.validate()?;
        Ok(oauth)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api.base_url.is_empty() {
            require_http_url(&self.api.base_url, "api.base_url")?;
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if let Some(oauth) = &self.oauth {
            oauth.validate()?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.api.base_url = expand::expand_env(&self.api.base_url, "api.base_url")?;
        if let Some(ref account) = self.api.acting_account {
            self.api.acting_account = Some(expand::expand_env(account, "api.acting_account")?);
        }

        if let Some(ref mut oauth) = self.oauth {
            oauth.consumer_key = expand::expand_env(&oauth.consumer_key, "oauth.consumer_key")?;
            oauth.consumer_secret =
                expand::expand_env(&oauth.consumer_secret, "oauth.consumer_secret")?;
            oauth.access_token = expand::expand_env(&oauth.access_token, "oauth.access_token")?;
            oauth.token_secret = expand::expand_env(&oauth.token_secret, "oauth.token_secret")?;
        }

        Ok(())
    }
}
