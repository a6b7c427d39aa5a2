//! Configuration types for the WooCommerce REST client.
//!
//! This module resolves a caller-supplied URL and credentials into an
//! [`ApiEndpoint`]: the immutable connection target every request is built
//! against.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ApiEndpoint`]: base URL, resolved [`ApiVersion`] and credentials
//! - [`ApiVersion`]: the closed set of supported API variants
//! - [`ConsumerKey`]: a validated consumer key newtype
//! - [`ConsumerSecret`]: a validated consumer secret with masked debug output
//!
//! # Example
//!
//! ```rust
//! use woocommerce_rest::{ApiEndpoint, ApiVersion, ConsumerKey, ConsumerSecret};
//!
//! let endpoint = ApiEndpoint::new(
//!     "https://store.test/wp-json/wc/v3",
//!     ConsumerKey::new("ck_x").unwrap(),
//!     ConsumerSecret::new("cs_y").unwrap(),
//! )
//! .unwrap();
//!
//! assert_eq!(endpoint.version(), ApiVersion::V3);
//! assert_eq!(endpoint.base_url(), "https://store.test/wp-json/wc/v3/");
//! ```

mod newtypes;
mod version;

pub use newtypes::{ConsumerKey, ConsumerSecret};
pub use version::ApiVersion;

use chrono::{DateTime, FixedOffset};

use crate::error::ConfigError;

/// The resolved connection target for a client instance.
///
/// An endpoint is classified once at construction and immutable afterward.
/// It owns the normalized base URL (always ending with `/`), the resolved
/// [`ApiVersion`], and the credential pair.
///
/// # Secret Adjustment
///
/// Non-HTTPS WooCommerce endpoints other than legacy v1/v2 require a
/// trailing `&` appended to the consumer secret before signing; see
/// <https://wordpress.org/support/topic/woocommerce-rest-api-v3-problem-woocommerce_api_authentication_error/>.
/// The adjustment happens once here and is permanent for the instance's
/// lifetime.
#[derive(Clone, Debug)]
pub struct ApiEndpoint {
    base_url: String,
    version: ApiVersion,
    key: ConsumerKey,
    secret: ConsumerSecret,
}

impl ApiEndpoint {
    /// Builds an endpoint from a URL and credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] or
    /// [`ConfigError::UnsupportedVersion`] when the URL cannot be
    /// classified. No partial endpoint is produced on failure.
    pub fn new(
        url: &str,
        key: ConsumerKey,
        secret: ConsumerSecret,
    ) -> Result<Self, ConfigError> {
        let (version, base_url) = ApiVersion::classify(url)?;

        let lowered = url.to_lowercase();
        let https = base_url.to_lowercase().starts_with("https");
        let secret = if (lowered.contains("wc-api/v3") || !version.is_legacy())
            && !https
            && !version.is_wordpress()
        {
            ConsumerSecret::new(format!("{}&", secret.as_ref()))?
        } else {
            secret
        };

        Ok(Self {
            base_url,
            version,
            key,
            secret,
        })
    }

    /// Returns the normalized base URL, ending with `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the resolved API version.
    #[must_use]
    pub const fn version(&self) -> ApiVersion {
        self.version
    }

    /// Returns the consumer key.
    #[must_use]
    pub fn consumer_key(&self) -> &str {
        self.key.as_ref()
    }

    /// Returns the consumer secret, with the `&` adjustment already applied
    /// where required.
    #[must_use]
    pub fn consumer_secret(&self) -> &str {
        self.secret.as_ref()
    }

    /// Returns `true` when the base URL uses HTTPS.
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.base_url.to_lowercase().starts_with("https")
    }

    /// Returns the scheme-and-host prefix of the base URL, without a
    /// trailing slash (e.g. `https://store.test`).
    ///
    /// Used to resolve `wp-json`-prefixed endpoint paths against the host
    /// root instead of the configured base path.
    #[must_use]
    pub fn host_root(&self) -> &str {
        let Some(scheme_end) = self.base_url.find("://") else {
            return &self.base_url;
        };
        let after_scheme = scheme_end + 3;
        self.base_url[after_scheme..]
            .find('/')
            .map_or(&self.base_url, |i| &self.base_url[..after_scheme + i])
    }

    /// Returns the JWT login endpoint derived from the base URL.
    ///
    /// The versioned API namespace is replaced with the token route exposed
    /// by the WordPress JWT auth plugin.
    #[must_use]
    pub(crate) fn jwt_token_url(&self) -> String {
        self.base_url
            .replace("wp/v2", "jwt-auth/v1/token")
            .replace("wc/v1", "jwt-auth/v1/token")
            .replace("wc/v2", "jwt-auth/v1/token")
            .replace("wc/v3", "jwt-auth/v1/token")
    }

    /// Returns the wire date/time format for this endpoint's version.
    ///
    /// Legacy endpoints expect UTC with a literal `Z`; all other versions
    /// are offset-aware.
    #[must_use]
    pub const fn date_time_format(&self) -> &'static str {
        if self.version.is_legacy() {
            "%Y-%m-%dT%H:%M:%SZ"
        } else {
            "%Y-%m-%dT%H:%M:%S%:z"
        }
    }

    /// Formats a date/time value for the wire.
    #[must_use]
    pub fn format_date_time(&self, value: &DateTime<FixedOffset>) -> String {
        value.format(self.date_time_format()).to_string()
    }
}
