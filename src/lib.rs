//! # WooCommerce REST API Rust SDK
//!
//! A Rust client for the WooCommerce and WordPress REST APIs, providing
//! URL-based API version detection, OAuth 1.0a request signing for plain
//! HTTP stores, and an async HTTP client with pluggable request/response
//! filters.
//!
//! ## Overview
//!
//! This SDK provides:
//! - API version detection from the endpoint URL via [`ApiVersion`]
//! - Validated newtypes for API credentials
//! - Basic, query-string, OAuth 1.0a and JWT Bearer authentication,
//!   selected automatically per endpoint and transport
//! - OAuth 1.0a HMAC-SHA256 query signing via [`auth::signature`]
//! - Lazy JWT login with in-client token caching via [`auth::jwt`]
//! - Raw file upload requests for media endpoints
//! - Legacy envelope wrapping for `wc-api` payloads via [`Envelope`]
//! - Strategy-object filters for outgoing requests, responses and JSON
//!   text
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use woocommerce_rest::{QueryParams, RestClient};
//!
//! // The URL decides the API variant; this one is WooCommerce v3.
//! let client = RestClient::new(
//!     "https://store.example/wp-json/wc/v3",
//!     "ck_your_key",
//!     "cs_your_secret",
//! )?;
//!
//! // GET /products?page=2, authenticated with a Basic header over HTTPS.
//! let body = client
//!     .get("products", Some(QueryParams::from([("page", "2")])), None)
//!     .await?;
//! println!("{body}");
//! ```
//!
//! ## Plain HTTP Stores
//!
//! Stores without TLS cannot protect a Basic header, so every request's
//! query string is signed with OAuth 1.0a HMAC-SHA256 instead. This is
//! automatic; the same client code works for both transports:
//!
//! ```rust,ignore
//! let client = RestClient::new("http://store.example/wp-json/wc/v3", key, secret)?;
//! // GET /orders?...&oauth_consumer_key=...&oauth_signature=...
//! let body = client.get("orders", None, None).await?;
//! ```
//!
//! ## WordPress Core and JWT Endpoints
//!
//! The WordPress core API (`wp/v2`) requires an OAuth token pair in
//! addition to the consumer credentials:
//!
//! ```rust,ignore
//! let client = RestClient::builder("https://store.example/wp-json/wp/v2", key, secret)
//!     .oauth_token("token")
//!     .oauth_token_secret("token-secret")
//!     .build()?;
//! ```
//!
//! A URL containing `jwt-auth/v1/token` selects JWT authentication: the
//! client logs in once with the consumer credentials, caches the token,
//! and sends it as a Bearer header on every call:
//!
//! ```rust,ignore
//! let client = RestClient::new("https://store.example/jwt-auth/v1/token", user, pass)?;
//! let posts = client.get("posts", None, None).await?;
//! ```
//!
//! ## Typed Payloads
//!
//! Responses are returned as raw text; [`RestClient::deserialize_json`]
//! and [`RestClient::serialize_json`] convert to and from typed payloads,
//! applying legacy envelope wrapping where the endpoint requires it:
//!
//! ```rust,ignore
//! #[derive(serde::Serialize, serde::Deserialize)]
//! struct Product { id: u64, name: String }
//!
//! impl woocommerce_rest::Envelope for Product {
//!     fn envelope_name() -> std::borrow::Cow<'static, str> {
//!         "product".into()
//!     }
//! }
//!
//! let body = client.get("products/42", None, None).await?;
//! let product: Product = client.deserialize_json(&body)?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: each client owns its endpoint, credentials and
//!   JWT cache
//! - **Fail-fast validation**: URLs and credentials are validated on
//!   construction, never per request
//! - **Thread-safe**: all types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime
//! - **No silent retries**: every request maps to exactly one HTTP
//!   exchange

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use auth::{AuthSession, JwtToken};
pub use config::{ApiEndpoint, ApiVersion, ConsumerKey, ConsumerSecret};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    Envelope, JsonFilter, OrderListParams, QueryParams, QueryValue, RequestBody, RequestFilter,
    RequestMethod, RequestSpec, ResponseFilter, RestClient, RestClientBuilder, RestError,
    ToQueryParameters,
};
