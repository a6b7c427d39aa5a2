//! Caller-supplied request, response and JSON filters.
//!
//! The client exposes a handful of hook points where callers can observe or
//! rewrite what goes over the wire. Each hook is a single-method strategy
//! trait, installed at construction time, and invoked exactly once per call
//! at its documented point:
//!
//! - [`JsonFilter`]: rewrite JSON text after serialization, before
//!   deserialization, or before the JWT login response is parsed
//! - [`RequestFilter`]: mutate the outgoing request (headers included)
//!   immediately before it is sent
//! - [`ResponseFilter`]: inspect the response immediately after it is
//!   received, before the body is read
//!
//! Blanket implementations let plain closures serve as filters:
//!
//! ```rust
//! use woocommerce_rest::RestClient;
//!
//! let client = RestClient::builder("https://store.test/wp-json/wc/v3", "ck_x", "cs_y")
//!     .serialize_filter(|json: String| json.replace("\"draft\"", "\"pending\""))
//!     .build()
//!     .unwrap();
//! # let _ = client;
//! ```

use std::fmt;
use std::sync::Arc;

/// Transforms a JSON string.
pub trait JsonFilter: Send + Sync {
    /// Applies the transformation, returning the replacement text.
    fn apply(&self, json: String) -> String;
}

impl<F> JsonFilter for F
where
    F: Fn(String) -> String + Send + Sync,
{
    fn apply(&self, json: String) -> String {
        self(json)
    }
}

/// Mutates an outgoing request immediately before it is sent.
pub trait RequestFilter: Send + Sync {
    /// Applies the mutation. Headers, URL and body may all be changed.
    fn apply(&self, request: &mut reqwest::Request);
}

impl<F> RequestFilter for F
where
    F: Fn(&mut reqwest::Request) + Send + Sync,
{
    fn apply(&self, request: &mut reqwest::Request) {
        self(request);
    }
}

/// Inspects a response immediately after it is received.
pub trait ResponseFilter: Send + Sync {
    /// Observes the response before its body is consumed.
    fn apply(&self, response: &reqwest::Response);
}

impl<F> ResponseFilter for F
where
    F: Fn(&reqwest::Response) + Send + Sync,
{
    fn apply(&self, response: &reqwest::Response) {
        self(response);
    }
}

/// The set of filter slots a client carries.
#[derive(Clone, Default)]
pub(crate) struct Filters {
    pub(crate) serialize: Option<Arc<dyn JsonFilter>>,
    pub(crate) deserialize: Option<Arc<dyn JsonFilter>>,
    pub(crate) request: Option<Arc<dyn RequestFilter>>,
    pub(crate) response: Option<Arc<dyn ResponseFilter>>,
    pub(crate) jwt_request: Option<Arc<dyn RequestFilter>>,
    pub(crate) jwt_deserialize: Option<Arc<dyn JsonFilter>>,
}

impl fmt::Debug for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let installed = |slot: bool| if slot { "installed" } else { "none" };
        f.debug_struct("Filters")
            .field("serialize", &installed(self.serialize.is_some()))
            .field("deserialize", &installed(self.deserialize.is_some()))
            .field("request", &installed(self.request.is_some()))
            .field("response", &installed(self.response.is_some()))
            .field("jwt_request", &installed(self.jwt_request.is_some()))
            .field("jwt_deserialize", &installed(self.jwt_deserialize.is_some()))
            .finish()
    }
}
