//! Request types for the WooCommerce REST client.
//!
//! A [`RequestSpec`] describes a single call: endpoint path, HTTP method,
//! body and query parameters. It is constructed, passed to
//! [`RestClient::send`](crate::RestClient::send) and never retained.

use serde::Serialize;

use crate::clients::errors::RestError;
use crate::clients::query::{QueryParams, ToQueryParameters};

/// HTTP methods supported by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestMethod {
    /// HTTP HEAD.
    Head,
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP PATCH.
    Patch,
    /// HTTP DELETE.
    Delete,
}

impl RequestMethod {
    /// Returns the uppercase method name, as used in the OAuth base string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Head => "HEAD",
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl From<RequestMethod> for reqwest::Method {
    fn from(method: RequestMethod) -> Self {
        match method {
            RequestMethod::Head => Self::HEAD,
            RequestMethod::Get => Self::GET,
            RequestMethod::Post => Self::POST,
            RequestMethod::Put => Self::PUT,
            RequestMethod::Patch => Self::PATCH,
            RequestMethod::Delete => Self::DELETE,
        }
    }
}

impl std::fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The body of an outgoing request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RequestBody {
    /// No body is attached.
    #[default]
    Empty,
    /// The file named by the `path` query parameter is read fully into
    /// memory and attached as a binary body with a `Content-Disposition`
    /// header naming the `name` query parameter.
    FileUpload,
    /// The value is JSON-encoded and attached as the request content.
    Json(serde_json::Value),
}

/// A single request: endpoint, method, body and query parameters.
///
/// Ephemeral by design: build one per call and hand it to
/// [`RestClient::send`](crate::RestClient::send).
///
/// # Example
///
/// ```rust
/// use woocommerce_rest::{QueryParams, RequestMethod, RequestSpec};
///
/// let spec = RequestSpec::new(RequestMethod::Get, "products")
///     .params(QueryParams::from([("page", "2")]));
/// assert_eq!(spec.endpoint(), "products");
/// ```
#[derive(Clone, Debug)]
pub struct RequestSpec {
    endpoint: String,
    method: RequestMethod,
    body: RequestBody,
    params: QueryParams,
}

impl RequestSpec {
    /// Creates a spec with an empty body and no parameters.
    #[must_use]
    pub fn new(method: RequestMethod, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            body: RequestBody::Empty,
            params: QueryParams::new(),
        }
    }

    /// Sets the query parameters.
    #[must_use]
    pub fn params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    /// Flattens a typed parameter object into the query parameters.
    #[must_use]
    pub fn item_params(mut self, item: &dyn ToQueryParameters) -> Self {
        self.params.merge_item_parameters(item);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// JSON-encodes a typed payload as the request body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Serialize`] when the payload cannot be
    /// represented as JSON.
    pub fn json_body<T: Serialize>(mut self, payload: &T) -> Result<Self, RestError> {
        self.body = RequestBody::Json(serde_json::to_value(payload)?);
        Ok(self)
    }

    /// Returns the endpoint path.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> RequestMethod {
        self.method
    }

    /// Returns the body.
    #[must_use]
    pub const fn request_body(&self) -> &RequestBody {
        &self.body
    }

    /// Returns the query parameters.
    #[must_use]
    pub const fn query_params(&self) -> &QueryParams {
        &self.params
    }
}
