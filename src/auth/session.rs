//! Per-client authentication state.

use std::sync::{PoisonError, RwLock};

use crate::auth::jwt::JwtToken;

/// Mutable authentication state owned by one client instance.
///
/// Holds the optional OAuth 1.0a token pair required by the WordPress core
/// API variant and the JWT cache. The JWT field transitions from absent to
/// present at most once per client instance, on the first request that needs
/// it, and is never cleared automatically.
///
/// # Concurrency
///
/// The JWT cache sits behind an [`RwLock`] that is only held for the
/// duration of a read or a write, never across an I/O suspension point.
/// Concurrent first calls may each trigger a redundant login exchange; the
/// last write wins. That is acceptable because logins are idempotent and
/// have no side effects beyond token issuance.
#[derive(Debug, Default)]
pub struct AuthSession {
    oauth_token: Option<String>,
    oauth_token_secret: Option<String>,
    jwt: RwLock<Option<JwtToken>>,
}

impl AuthSession {
    /// Creates an empty session.
    #[must_use]
    pub fn new(oauth_token: Option<String>, oauth_token_secret: Option<String>) -> Self {
        Self {
            oauth_token,
            oauth_token_secret,
            jwt: RwLock::new(None),
        }
    }

    /// Returns the OAuth 1.0a token, if configured.
    #[must_use]
    pub fn oauth_token(&self) -> Option<&str> {
        self.oauth_token.as_deref()
    }

    /// Returns the OAuth 1.0a token secret, if configured.
    #[must_use]
    pub fn oauth_token_secret(&self) -> Option<&str> {
        self.oauth_token_secret.as_deref()
    }

    /// Returns `true` when both OAuth 1.0a fields are set.
    #[must_use]
    pub fn has_oauth_credentials(&self) -> bool {
        self.oauth_token.is_some() && self.oauth_token_secret.is_some()
    }

    /// Returns a snapshot of the cached JWT, if any.
    #[must_use]
    pub fn jwt(&self) -> Option<JwtToken> {
        self.jwt
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stores a freshly obtained JWT. Last write wins.
    pub fn set_jwt(&self, token: JwtToken) {
        *self.jwt.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Clears the cached JWT so the next request performs a fresh login.
    ///
    /// The client never calls this itself; token expiry is the caller's
    /// problem (the plugin reports expiry as a 401 response body).
    pub fn clear_jwt(&self) {
        *self.jwt.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
