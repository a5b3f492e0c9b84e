//! `sigil request` command implementation.

use std::io::{self, Write};
use std::path::Path;

use clap::{Args, ValueEnum};
use serde_json::Value;
use sigil_client::{ApiClient, HttpMethod, JsonCodec, UreqTransport};
use sigil_config::{CliSettings, Config};
use sigil_oauth::ParameterSet;

use super::parse_pair;
use crate::error::CliError;
use crate::output::Output;

/// HTTP method argument.
#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    Get,
    Post,
    Put,
    Delete,
}

impl From<MethodArg> for HttpMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Get => Self::Get,
            MethodArg::Post => Self::Post,
            MethodArg::Put => Self::Put,
            MethodArg::Delete => Self::Delete,
        }
    }
}

/// Arguments for the request command.
#[derive(Args)]
pub(crate) struct RequestArgs {
    /// HTTP method.
    #[arg(value_enum, ignore_case = true)]
    method: MethodArg,

    /// Resource path relative to the API base URL (may carry a query string).
    path: String,

    /// Query parameter, as name=value (repeatable).
    #[arg(short, long = "query", value_parser = parse_pair)]
    query: Vec<(String, String)>,

    /// JSON request body (required for POST and PUT).
    #[arg(short, long)]
    data: Option<String>,

    /// API base URL (default: from config).
    #[arg(short = 'u', long)]
    base_url: Option<String>,

    /// Act on behalf of this account (default: from config).
    #[arg(long)]
    acting_account: Option<String>,

    /// Request timeout in seconds (default: from config).
    #[arg(long)]
    timeout: Option<u64>,
}

impl RequestArgs {
    /// Execute the request command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is incomplete, the request fails,
    /// or the API reports errors.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let method = HttpMethod::from(self.method);
        check_arguments(method, !self.query.is_empty(), self.data.is_some())?;

        let settings = CliSettings {
            base_url: self.base_url,
            acting_account: self.acting_account,
            timeout_secs: self.timeout,
        };
        let config = Config::load(config_path, Some(&settings))?;
        let api = config.require_api()?;
        let oauth = config.require_oauth()?;

        let mut client = ApiClient::with_parts(
            &api.base_url,
            oauth.credentials(),
            UreqTransport::new(api.timeout()),
            JsonCodec,
        )?
        .with_signature_method(oauth.signature_method()?);
        if let Some(user_agent) = &api.user_agent {
            client = client.with_user_agent(user_agent.as_str());
        }
        if let Some(account) = &api.acting_account {
            client = client.with_acting_account(account.as_str());
        }

        let body = self
            .data
            .as_deref()
            .map(serde_json::from_str::<Value>)
            .transpose()?;

        let result: Option<Value> = match (method, body) {
            (HttpMethod::Get, _) => {
                let query: ParameterSet = self.query.into_iter().collect();
                client.get(&self.path, &query)?
            }
            (HttpMethod::Delete, _) => client.delete(&self.path)?,
            (HttpMethod::Post, Some(body)) => client.post(&self.path, &body)?,
            (HttpMethod::Put, Some(body)) => client.put(&self.path, &body)?,
            (HttpMethod::Post | HttpMethod::Put, None) => {
                return Err(CliError::Validation(format!(
                    "--data is required for {method}"
                )));
            }
        };

        match result {
            Some(value) => {
                writeln!(io::stdout(), "{}", serde_json::to_string_pretty(&value)?)?;
            }
            None => output.success("No content"),
        }

        Ok(())
    }
}

/// Reject flag combinations the method would ignore.
fn check_arguments(method: HttpMethod, has_query: bool, has_data: bool) -> Result<(), CliError> {
    match method {
        HttpMethod::Get | HttpMethod::Delete if has_data => Err(CliError::Validation(format!(
            "--data is not allowed for {method}"
        ))),
        HttpMethod::Post | HttpMethod::Put if !has_data => Err(CliError::Validation(format!(
            "--data is required for {method}"
        ))),
        HttpMethod::Post | HttpMethod::Put | HttpMethod::Delete if has_query => Err(
            CliError::Validation(format!("--query is only supported for GET, not {method}")),
        ),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rejection(method: HttpMethod, has_query: bool, has_data: bool) -> String {
        check_arguments(method, has_query, has_data)
            .unwrap_err()
            .to_string()
    }

    #[test]
    fn test_check_arguments_accepts_valid_combinations() {
        assert!(check_arguments(HttpMethod::Get, true, false).is_ok());
        assert!(check_arguments(HttpMethod::Get, false, false).is_ok());
        assert!(check_arguments(HttpMethod::Delete, false, false).is_ok());
        assert!(check_arguments(HttpMethod::Post, false, true).is_ok());
        assert!(check_arguments(HttpMethod::Put, false, true).is_ok());
    }

    #[test]
    fn test_check_arguments_rejects_data_for_get_and_delete() {
        assert_eq!(
            rejection(HttpMethod::Get, false, true),
            "--data is not allowed for GET"
        );
        assert_eq!(
            rejection(HttpMethod::Delete, false, true),
            "--data is not allowed for DELETE"
        );
    }

    #[test]
    fn test_check_arguments_requires_data() {
        assert_eq!(
            rejection(HttpMethod::Post, false, false),
            "--data is required for POST"
        );
    }

    #[test]
    fn test_check_arguments_rejects_query_outside_get() {
        assert_eq!(
            rejection(HttpMethod::Put, true, true),
            "--query is only supported for GET, not PUT"
        );
        assert_eq!(
            rejection(HttpMethod::Delete, true, false),
            "--query is only supported for GET, not DELETE"
        );
    }
}
