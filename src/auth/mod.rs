//! Authentication primitives.
//!
//! This module contains the three pieces of authentication machinery the
//! client composes per request:
//!
//! - [`signature`]: pure OAuth 1.0a HMAC-SHA256 request signing
//! - [`jwt`]: the lazy bearer-token login exchange
//! - [`AuthSession`]: the per-client mutable credential state
//!
//! Which mechanism applies to a given request is decided by the
//! [`RestClient`](crate::RestClient) based on the endpoint's
//! [`ApiVersion`](crate::ApiVersion) and transport scheme.

pub mod jwt;
pub mod session;
pub mod signature;

pub use jwt::JwtToken;
pub use session::AuthSession;
