//! API client: request building, signing and response interpretation.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use sigil_http::RawHttpResponse;
use sigil_oauth::{Credentials, OAuthSigner, ParameterSet, SignatureMethodKind, origin, query};

use crate::codec::{JsonCodec, PayloadCodec};
use crate::error::{ApiErrorObject, ClientError};
use crate::request::{HttpMethod, PreparedRequest};
use crate::transport::{Transport, UreqTransport};

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("sigil/", env!("CARGO_PKG_VERSION"));

/// Query parameter naming the account a request acts on behalf of.
const ACTING_ACCOUNT_PARAM: &str = "acting_account";

/// OAuth 1.0a signed API client.
///
/// Holds only immutable configuration; every call builds and signs its own
/// request, so one client can be shared across threads.
pub struct ApiClient<T = UreqTransport, C = JsonCodec> {
    base_url: String,
    signer: OAuthSigner,
    user_agent: String,
    acting_account: Option<String>,
    transport: T,
    codec: C,
}

impl ApiClient {
    /// Create a client using `ureq` and JSON bodies.
    ///
    /// # Arguments
    /// * `base_url` - API base URL (`scheme://host[:port][/prefix]`)
    /// * `credentials` - OAuth consumer and access-token credentials
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self, ClientError> {
        Self::with_parts(base_url, credentials, UreqTransport::default(), JsonCodec)
    }
}

impl<T: Transport, C: PayloadCodec> ApiClient<T, C> {
    /// Create a client with an explicit transport and codec.
    pub fn with_parts(
        base_url: &str,
        credentials: Credentials,
        transport: T,
        codec: C,
    ) -> Result<Self, ClientError> {
        let is_http = base_url.starts_with("http://") || base_url.starts_with("https://");
        if !is_http || origin(base_url).is_none() {
            return Err(ClientError::InvalidUrl(base_url.to_owned()));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            signer: OAuthSigner::new(credentials, SignatureMethodKind::default()),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            acting_account: None,
            transport,
            codec,
        })
    }

    /// Use a different signature method (default: HMAC-SHA1).
    #[must_use]
    pub fn with_signature_method(mut self, method: SignatureMethodKind) -> Self {
        self.signer = OAuthSigner::new(self.signer.credentials().clone(), method);
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Act on behalf of another account on every request.
    #[must_use]
    pub fn with_acting_account(mut self, account_id: impl Into<String>) -> Self {
        self.acting_account = Some(account_id.into());
        self
    }

    /// API base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a resource.
    ///
    /// A query string embedded in `path` is merged over `query`.
    /// Returns `Ok(None)` for `204 No Content`.
    pub fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &ParameterSet,
    ) -> Result<Option<R>, ClientError> {
        self.execute(HttpMethod::Get, path, query.clone(), None)
    }

    /// Create a resource from `body`.
    pub fn post<B, R>(&self, path: &str, body: &B) -> Result<Option<R>, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = self.codec.encode(body).map_err(ClientError::Encode)?;
        self.execute(HttpMethod::Post, path, ParameterSet::new(), Some(body))
    }

    /// Replace a resource with `body`.
    pub fn put<B, R>(&self, path: &str, body: &B) -> Result<Option<R>, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = self.codec.encode(body).map_err(ClientError::Encode)?;
        self.execute(HttpMethod::Put, path, ParameterSet::new(), Some(body))
    }

    /// Delete a resource.
    pub fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<Option<R>, ClientError> {
        self.execute(HttpMethod::Delete, path, ParameterSet::new(), None)
    }

    /// Build, sign and send one request, then interpret the reply.
    fn execute<R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        query: ParameterSet,
        body: Option<Vec<u8>>,
    ) -> Result<Option<R>, ClientError> {
        let request = self.prepare(method, path, query, body)?;

        info!("{} {}", request.method, request.url);

        let raw = self.transport.execute(&request)?;
        let response = sigil_http::parse(&raw)?;
        self.interpret(response)
    }

    /// Resolve parameters, sign, and assemble the outgoing request.
    fn prepare(
        &self,
        method: HttpMethod,
        path: &str,
        mut params: ParameterSet,
        body: Option<Vec<u8>>,
    ) -> Result<PreparedRequest, ClientError> {
        let path = match path.split_once('?') {
            Some((path, embedded)) => {
                params.merge(query::parse(embedded));
                path
            }
            None => path,
        };

        if let Some(account) = &self.acting_account {
            params.insert(ACTING_ACCOUNT_PARAM, account.as_str());
        }

        let target = format!("{}{}", self.base_url, path);
        let authorization = self.signer.authorize(method.as_str(), &target, &params)?;

        let url = if params.is_empty() {
            target
        } else {
            format!("{target}?{}", query::build(&params))
        };

        let media_type = self.codec.media_type().to_owned();
        let mut headers = vec![
            ("User-Agent".to_owned(), self.user_agent.clone()),
            ("Accept".to_owned(), media_type.clone()),
        ];
        if body.is_some() {
            headers.push(("Content-Type".to_owned(), media_type));
        }
        headers.push(("Authorization".to_owned(), authorization));

        Ok(PreparedRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Map a parsed response to a decoded value or an API error.
    fn interpret<R: DeserializeOwned>(
        &self,
        response: RawHttpResponse,
    ) -> Result<Option<R>, ClientError> {
        match response.status_code {
            Some(204) => Ok(None),
            Some(_) if response.is_success() => self
                .codec
                .decode(&response.body)
                .map(Some)
                .map_err(ClientError::Decode),
            status => Err(ClientError::Api {
                status,
                errors: self.decode_errors(&response.body),
            }),
        }
    }

    /// Decode an error body, substituting the sentinel when it is unreadable.
    fn decode_errors(&self, body: &[u8]) -> Vec<ApiErrorObject> {
        match self.codec.decode::<Vec<ApiErrorObject>>(body) {
            Ok(errors) => errors,
            Err(err) => {
                warn!("Undecodable API error body ({} bytes): {err}", body.len());
                vec![ApiErrorObject::invalid_response()]
            }
        }
    }
}
