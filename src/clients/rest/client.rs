//! REST client for the WooCommerce and WordPress APIs.
//!
//! This module provides the [`RestClient`] type: the per-request
//! authentication state machine and dispatcher. It decides, per call,
//! whether to attach Basic credentials in a header, sign the query string
//! with OAuth 1.0a, or send a Bearer token obtained through a lazy JWT
//! login, then executes the HTTP call and returns the raw response text.

use base64::prelude::*;
use chrono::Utc;

use crate::auth::{jwt, signature, AuthSession, JwtToken};
use crate::clients::filters::{Filters, JsonFilter, RequestFilter, ResponseFilter};
use crate::clients::rest::codec::{self, Envelope};
use crate::clients::{
    QueryParams, RequestBody, RequestMethod, RequestSpec, RestError, ToQueryParameters,
};
use crate::config::{ApiEndpoint, ApiVersion, ConsumerKey, ConsumerSecret};
use crate::error::ConfigError;

/// Asynchronous client for a single WooCommerce or WordPress REST endpoint.
///
/// The client owns an immutable [`ApiEndpoint`] (classified once at
/// construction) and a mutable [`AuthSession`] holding the lazily acquired
/// JWT. Every verb returns the raw response body text for any completed
/// HTTP exchange, including non-2xx statuses; callers inspect the text
/// themselves. Transport-level failures surface as
/// [`RestError::Transport`].
///
/// No request is ever retried, no timeout is imposed beyond the transport
/// default, and no background tasks run.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`; the only mutable state is the JWT cache,
/// which uses short lock scopes that never span an I/O suspension point.
///
/// # Example
///
/// ```rust,ignore
/// use woocommerce_rest::{QueryParams, RestClient};
///
/// let client = RestClient::new("https://store.test/wp-json/wc/v3", "ck_x", "cs_y")?;
///
/// let products = client
///     .get("products", Some(QueryParams::from([("page", "2")])), None)
///     .await?;
/// println!("{products}");
/// ```
#[derive(Debug)]
pub struct RestClient {
    /// The internal reqwest HTTP client.
    http: reqwest::Client,
    endpoint: ApiEndpoint,
    session: AuthSession,
    /// When `true` (the default) and the endpoint is HTTPS, credentials are
    /// sent in the `Authorization` header instead of the query string.
    authorized_header: bool,
    /// Authenticate WooCommerce calls with a JWT Bearer token instead of
    /// Basic credentials.
    wc_auth_with_jwt: bool,
    /// Include raw payloads in deserialization errors. Beware: error
    /// messages may then contain sensitive information.
    debug: bool,
    filters: Filters,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a client with default options: header-based auth over HTTPS,
    /// no filters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL cannot be classified or a
    /// credential is empty. No partial client is produced.
    pub fn new(url: &str, key: &str, secret: &str) -> Result<Self, ConfigError> {
        Self::builder(url, key, secret).build()
    }

    /// Creates a builder for a client with non-default options.
    #[must_use]
    pub fn builder(url: &str, key: &str, secret: &str) -> RestClientBuilder {
        RestClientBuilder::new(url, key, secret)
    }

    /// Returns the resolved endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }

    /// Returns the authentication session.
    #[must_use]
    pub const fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Returns the resolved API version.
    #[must_use]
    pub const fn version(&self) -> ApiVersion {
        self.endpoint.version()
    }

    /// Sends a GET request and returns the raw response text.
    ///
    /// # Errors
    ///
    /// See [`RestError`].
    pub async fn get(
        &self,
        endpoint: &str,
        params: Option<QueryParams>,
        item_params: Option<&dyn ToQueryParameters>,
    ) -> Result<String, RestError> {
        self.send(Self::spec(RequestMethod::Get, endpoint, params, item_params))
            .await
    }

    /// Sends a POST request with a JSON-encoded body.
    ///
    /// # Errors
    ///
    /// See [`RestError`].
    pub async fn post<T: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &T,
        params: Option<QueryParams>,
        item_params: Option<&dyn ToQueryParameters>,
    ) -> Result<String, RestError> {
        let spec =
            Self::spec(RequestMethod::Post, endpoint, params, item_params).json_body(body)?;
        self.send(spec).await
    }

    /// Sends a PUT request with a JSON-encoded body.
    ///
    /// # Errors
    ///
    /// See [`RestError`].
    pub async fn put<T: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &T,
        params: Option<QueryParams>,
        item_params: Option<&dyn ToQueryParameters>,
    ) -> Result<String, RestError> {
        let spec = Self::spec(RequestMethod::Put, endpoint, params, item_params).json_body(body)?;
        self.send(spec).await
    }

    /// Sends a DELETE request without a body.
    ///
    /// # Errors
    ///
    /// See [`RestError`].
    pub async fn delete(
        &self,
        endpoint: &str,
        params: Option<QueryParams>,
        item_params: Option<&dyn ToQueryParameters>,
    ) -> Result<String, RestError> {
        self.send(Self::spec(
            RequestMethod::Delete,
            endpoint,
            params,
            item_params,
        ))
        .await
    }

    /// Sends a DELETE request with a JSON-encoded body (used by batch
    /// deletion endpoints).
    ///
    /// # Errors
    ///
    /// See [`RestError`].
    pub async fn delete_with_body<T: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &T,
        params: Option<QueryParams>,
        item_params: Option<&dyn ToQueryParameters>,
    ) -> Result<String, RestError> {
        let spec =
            Self::spec(RequestMethod::Delete, endpoint, params, item_params).json_body(body)?;
        self.send(spec).await
    }

    /// Sends an arbitrary [`RequestSpec`] and returns the raw response
    /// text.
    ///
    /// The general entry point behind the verb helpers; use it directly
    /// for HEAD and PATCH requests. The response body is returned for any
    /// completed exchange regardless of status code.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::MissingCredentials`] before any network call
    /// when the WordPress core API variant lacks its OAuth token pair, and
    /// [`RestError::Transport`] when the exchange itself fails.
    pub async fn send(&self, spec: RequestSpec) -> Result<String, RestError> {
        let request = self.build_request(&spec).await?;
        tracing::debug!(method = %spec.method(), url = %request.url(), "sending request");

        let response = self.http.execute(request).await?;
        if let Some(filter) = &self.filters.response {
            filter.apply(&response);
        }
        tracing::debug!(status = %response.status(), "received response");

        Ok(response.text().await?)
    }

    /// Serializes a typed payload to JSON for this endpoint.
    ///
    /// The type's [`Envelope::format_json`] hook is applied first, then
    /// legacy endpoints wrap the result in an object keyed by the envelope
    /// name, then the post-serialize filter runs.
    ///
    /// Payload types declare their own wire naming; WooCommerce resource
    /// types typically use `#[serde(rename_all = "camelCase")]`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Serialize`] when encoding fails.
    pub fn serialize_json<T: serde::Serialize + Envelope>(
        &self,
        value: &T,
    ) -> Result<String, RestError> {
        codec::serialize(
            value,
            self.endpoint.version().is_legacy(),
            self.filters.serialize.as_deref(),
        )
    }

    /// Deserializes a JSON response into a typed payload.
    ///
    /// The pre-deserialize filter runs first, if installed.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Deserialization`]; the offending JSON is only
    /// attached when the client was built with `debug(true)`.
    pub fn deserialize_json<T: serde::de::DeserializeOwned>(
        &self,
        json: &str,
    ) -> Result<T, RestError> {
        codec::deserialize(json, self.filters.deserialize.as_deref(), self.debug)
    }

    fn spec(
        method: RequestMethod,
        endpoint: &str,
        params: Option<QueryParams>,
        item_params: Option<&dyn ToQueryParameters>,
    ) -> RequestSpec {
        let mut spec = RequestSpec::new(method, endpoint.to_lowercase());
        if let Some(params) = params {
            spec = spec.params(params);
        }
        if let Some(item) = item_params {
            spec = spec.item_params(item);
        }
        spec
    }

    /// Resolves the JWT for this call, performing the login exchange at
    /// most once per client instance.
    ///
    /// Returns `None` when the call does not use JWT auth at all. A login
    /// failure leaves the cache empty, so the next call retries.
    async fn ensure_jwt(&self) -> Result<Option<JwtToken>, RestError> {
        if self.endpoint.version() != ApiVersion::WordPressApiJwt && !self.wc_auth_with_jwt {
            return Ok(None);
        }
        if let Some(token) = self.session.jwt() {
            return Ok(Some(token));
        }

        let token = jwt::login(
            &self.http,
            &self.endpoint,
            self.filters.jwt_request.as_deref(),
            self.filters.jwt_deserialize.as_deref(),
            self.debug,
        )
        .await?;
        self.session.set_jwt(token.clone());
        Ok(Some(token))
    }

    /// Builds the outgoing request: URL, credentials and body.
    pub(crate) async fn build_request(
        &self,
        spec: &RequestSpec,
    ) -> Result<reqwest::Request, RestError> {
        let version = self.endpoint.version();
        if version == ApiVersion::WordPressApi && !self.session.has_oauth_credentials() {
            return Err(RestError::MissingCredentials);
        }

        let jwt = self.ensure_jwt().await?;
        let mut params = spec.query_params().clone();
        let method: reqwest::Method = spec.method().into();

        let mut builder = if self.endpoint.is_https() && !version.is_wordpress() {
            if !self.authorized_header {
                // Query-based auth: fold credentials into the parameters,
                // never overwriting a caller-supplied value.
                params.insert_if_absent("consumer_key", self.endpoint.consumer_key());
                params.insert_if_absent("consumer_secret", self.endpoint.consumer_secret());
            }

            let path = self.build_endpoint_path(spec.method(), spec.endpoint(), &params)?;
            // Endpoints starting with wp-json reach across namespaces (for
            // example a WordPress plugin route called with WooCommerce
            // credentials) and resolve against the host root instead of the
            // configured base path.
            let url = if spec.endpoint().starts_with("wp-json") {
                format!("{}/{path}", self.endpoint.host_root())
            } else {
                format!("{}{path}", self.endpoint.base_url())
            };

            let mut builder = self.http.request(method, url);
            if self.authorized_header {
                builder = match &jwt {
                    Some(token) if self.wc_auth_with_jwt => builder.bearer_auth(&token.token),
                    _ => builder.header(
                        reqwest::header::AUTHORIZATION,
                        basic_authorization(
                            self.endpoint.consumer_key(),
                            self.endpoint.consumer_secret(),
                        ),
                    ),
                };
            }
            builder
        } else {
            let path = self.build_endpoint_path(spec.method(), spec.endpoint(), &params)?;
            let url = format!("{}{path}", self.endpoint.base_url());
            let mut builder = self.http.request(method, url);
            if version == ApiVersion::WordPressApiJwt {
                if let Some(token) = &jwt {
                    builder = builder.bearer_auth(&token.token);
                }
            }
            builder
        };

        builder = match spec.request_body() {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::FileUpload => {
                let path = params
                    .get("path")
                    .ok_or(RestError::MissingUploadParameter { name: "path" })?;
                let name = params
                    .get("name")
                    .ok_or(RestError::MissingUploadParameter { name: "name" })?;
                let contents = tokio::fs::read(path).await?;
                builder
                    .header(
                        reqwest::header::CONTENT_DISPOSITION,
                        format!("attachment; filename={name}"),
                    )
                    .body(contents)
            }
        };

        let mut request = builder.build()?;
        if let Some(filter) = &self.filters.request {
            filter.apply(&mut request);
        }
        Ok(request)
    }

    /// Builds the endpoint path, with the query string signed where the
    /// version and transport require it.
    fn build_endpoint_path(
        &self,
        method: RequestMethod,
        endpoint: &str,
        params: &QueryParams,
    ) -> Result<String, RestError> {
        let version = self.endpoint.version();
        let unsigned = version == ApiVersion::WordPressApiJwt
            || (self.endpoint.is_https() && version != ApiVersion::WordPressApi);

        if unsigned {
            if params.is_empty() {
                return Ok(endpoint.to_string());
            }
            let query = params
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect::<Vec<_>>()
                .join("&");
            return Ok(format!("{endpoint}?{query}"));
        }

        let request_url = format!("{}{endpoint}", self.endpoint.base_url());
        let (oauth_token, signing_secret) = if version == ApiVersion::WordPressApi {
            let token = self
                .session
                .oauth_token()
                .ok_or(RestError::MissingCredentials)?;
            let token_secret = self
                .session
                .oauth_token_secret()
                .ok_or(RestError::MissingCredentials)?;
            (
                Some(token),
                format!("{}&{token_secret}", self.endpoint.consumer_secret()),
            )
        } else {
            (None, self.endpoint.consumer_secret().to_string())
        };

        let query = signature::signed_query(
            method.as_str(),
            &request_url,
            self.endpoint.consumer_key(),
            oauth_token,
            &signing_secret,
            params,
            &signature::nonce(),
            Utc::now().timestamp(),
        );
        Ok(format!("{endpoint}?{query}"))
    }
}

/// Encodes the credential pair for Basic auth.
///
/// The pair is encoded as ISO-8859-1 before Base64, matching the server
/// side; characters outside Latin-1 become `?`.
fn basic_authorization(key: &str, secret: &str) -> String {
    let latin1: Vec<u8> = format!("{key}:{secret}")
        .chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect();
    format!("Basic {}", BASE64_STANDARD.encode(latin1))
}

/// Builder for [`RestClient`] instances with non-default options.
///
/// # Example
///
/// ```rust
/// use woocommerce_rest::RestClient;
///
/// let client = RestClient::builder("https://store.test/wp-json/wc/v3", "ck_x", "cs_y")
///     .authorized_header(false)
///     .debug(true)
///     .build()
///     .unwrap();
/// # let _ = client;
/// ```
#[derive(Debug)]
pub struct RestClientBuilder {
    url: String,
    key: String,
    secret: String,
    authorized_header: bool,
    wc_auth_with_jwt: bool,
    oauth_token: Option<String>,
    oauth_token_secret: Option<String>,
    debug: bool,
    filters: Filters,
}

impl RestClientBuilder {
    fn new(url: &str, key: &str, secret: &str) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            secret: secret.to_string(),
            authorized_header: true,
            wc_auth_with_jwt: false,
            oauth_token: None,
            oauth_token_secret: None,
            debug: false,
            filters: Filters::default(),
        }
    }

    /// When using HTTPS, send the credentials in the `Authorization`
    /// header (`true`, the default) or in the query string (`false`).
    #[must_use]
    pub const fn authorized_header(mut self, enabled: bool) -> Self {
        self.authorized_header = enabled;
        self
    }

    /// Authenticate WooCommerce calls with a JWT Bearer token obtained
    /// through the lazy login exchange.
    #[must_use]
    pub const fn wc_auth_with_jwt(mut self, enabled: bool) -> Self {
        self.wc_auth_with_jwt = enabled;
        self
    }

    /// Sets the OAuth 1.0a token, required for the WordPress core API.
    #[must_use]
    pub fn oauth_token(mut self, token: impl Into<String>) -> Self {
        self.oauth_token = Some(token.into());
        self
    }

    /// Sets the OAuth 1.0a token secret, required for the WordPress core
    /// API.
    #[must_use]
    pub fn oauth_token_secret(mut self, token_secret: impl Into<String>) -> Self {
        self.oauth_token_secret = Some(token_secret.into());
        self
    }

    /// Include raw payloads in deserialization errors.
    ///
    /// Off by default: error messages may contain sensitive information
    /// when enabled.
    #[must_use]
    pub const fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Installs a filter that transforms serialized JSON before it is
    /// returned.
    #[must_use]
    pub fn serialize_filter(mut self, filter: impl JsonFilter + 'static) -> Self {
        self.filters.serialize = Some(std::sync::Arc::new(filter));
        self
    }

    /// Installs a filter that transforms JSON text before deserialization.
    #[must_use]
    pub fn deserialize_filter(mut self, filter: impl JsonFilter + 'static) -> Self {
        self.filters.deserialize = Some(std::sync::Arc::new(filter));
        self
    }

    /// Installs a filter that mutates every outgoing request before it is
    /// sent.
    #[must_use]
    pub fn request_filter(mut self, filter: impl RequestFilter + 'static) -> Self {
        self.filters.request = Some(std::sync::Arc::new(filter));
        self
    }

    /// Installs a filter that observes every response before its body is
    /// read.
    #[must_use]
    pub fn response_filter(mut self, filter: impl ResponseFilter + 'static) -> Self {
        self.filters.response = Some(std::sync::Arc::new(filter));
        self
    }

    /// Installs a filter that mutates the JWT login request.
    #[must_use]
    pub fn jwt_request_filter(mut self, filter: impl RequestFilter + 'static) -> Self {
        self.filters.jwt_request = Some(std::sync::Arc::new(filter));
        self
    }

    /// Installs a filter that rewrites the raw JWT login response before
    /// parsing.
    #[must_use]
    pub fn jwt_deserialize_filter(mut self, filter: impl JsonFilter + 'static) -> Self {
        self.filters.jwt_deserialize = Some(std::sync::Arc::new(filter));
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL cannot be classified or a
    /// credential is empty.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This
    /// should only happen in extremely unusual circumstances (e.g. TLS
    /// initialization failure).
    pub fn build(self) -> Result<RestClient, ConfigError> {
        let key = ConsumerKey::new(self.key)?;
        let secret = ConsumerSecret::new(self.secret)?;
        let endpoint = ApiEndpoint::new(&self.url, key, secret)?;

        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Ok(RestClient {
            http,
            endpoint,
            session: AuthSession::new(self.oauth_token, self.oauth_token_secret),
            authorized_header: self.authorized_header,
            wc_auth_with_jwt: self.wc_auth_with_jwt,
            debug: self.debug,
            filters: self.filters,
        })
    }
}
