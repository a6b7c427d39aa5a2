//! API version classification.
//!
//! WooCommerce and WordPress expose several generations of REST endpoints,
//! each with its own URL shape and authentication strategy. This module
//! resolves a base URL to one of the supported [`ApiVersion`] variants once,
//! at client construction time.

use crate::error::ConfigError;

/// The API variant a base URL resolves to.
///
/// Classification happens exactly once, when the client is built, and the
/// resolved version is immutable afterward. Every variant implies a distinct
/// URL and authentication strategy:
///
/// - [`Legacy`](Self::Legacy): pre-`wp-json` endpoints (`wc-api/v1..v3`)
/// - [`V1`](Self::V1)/[`V2`](Self::V2)/[`V3`](Self::V3): `wp-json/wc/v1..v3`
/// - [`ThirdPartyPlugin`](Self::ThirdPartyPlugin): any other `wp-json/wc-` namespace
/// - [`WordPressApi`](Self::WordPressApi): the WordPress core API, OAuth 1.0a signed
/// - [`WordPressApiJwt`](Self::WordPressApiJwt): the WordPress core API behind a
///   JWT auth plugin
///
/// URLs that match none of the rules fail classification with
/// [`ConfigError::UnsupportedVersion`]; there is no `Unknown` client state.
///
/// # Example
///
/// ```rust
/// use woocommerce_rest::ApiVersion;
///
/// let (version, base) = ApiVersion::classify("https://store.test/wp-json/wc/v3").unwrap();
/// assert_eq!(version, ApiVersion::V3);
/// assert_eq!(base, "https://store.test/wp-json/wc/v3/");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiVersion {
    /// Legacy WooCommerce API (`wc-api/v1`, `v2` or `v3`).
    Legacy,
    /// WooCommerce REST API v1 (`wp-json/wc/v1`).
    V1,
    /// WooCommerce REST API v2 (`wp-json/wc/v2`).
    V2,
    /// WooCommerce REST API v3 (`wp-json/wc/v3`).
    V3,
    /// A third-party plugin namespace under `wp-json/wc-`.
    ThirdPartyPlugin,
    /// WordPress core REST API (`wp-json` or `wp-json/wp/v2`).
    WordPressApi,
    /// WordPress core REST API authenticated through a JWT plugin
    /// (`jwt-auth/v1/token`).
    WordPressApiJwt,
}

impl ApiVersion {
    /// Classifies a base URL into an API version and its normalized form.
    ///
    /// The rules are checked in order against the lower-cased,
    /// trailing-slash-trimmed URL. The returned base URL always ends with
    /// `/`; for the JWT variant the `jwt-auth/v1/token` suffix is rewritten
    /// to `wp/v2` so subsequent requests target the WordPress core API.
    ///
    /// Classification is pure: the same input always yields the same output.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] for an empty URL and
    /// [`ConfigError::UnsupportedVersion`] when no rule matches.
    pub fn classify(url: &str) -> Result<(Self, String), ConfigError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ConfigError::InvalidUrl);
        }

        let lowered = url.to_lowercase();
        let lowered = lowered.trim_end_matches('/');

        let version = if lowered.ends_with("wc-api/v1")
            || lowered.ends_with("wc-api/v2")
            || lowered.ends_with("wc-api/v3")
        {
            Self::Legacy
        } else if lowered.ends_with("wp-json/wc/v1") {
            Self::V1
        } else if lowered.ends_with("wp-json/wc/v2") {
            Self::V2
        } else if lowered.ends_with("wp-json/wc/v3") {
            Self::V3
        } else if lowered.contains("wp-json/wc-") {
            Self::ThirdPartyPlugin
        } else if lowered.ends_with("wp-json/wp/v2") || lowered.ends_with("wp-json") {
            Self::WordPressApi
        } else if lowered.ends_with("jwt-auth/v1/token") {
            Self::WordPressApiJwt
        } else {
            return Err(ConfigError::UnsupportedVersion {
                url: url.to_string(),
            });
        };

        // The stored base URL keeps the caller's casing, except for the JWT
        // variant where the token suffix is replaced by the wp/v2 namespace.
        let base = if version == Self::WordPressApiJwt {
            lowered.replace("jwt-auth/v1/token", "wp/v2")
        } else {
            url.trim_end_matches('/').to_string()
        };

        Ok((version, format!("{base}/")))
    }

    /// Returns `true` for the legacy `wc-api` variant.
    #[must_use]
    pub const fn is_legacy(self) -> bool {
        matches!(self, Self::Legacy)
    }

    /// Returns `true` for the WordPress core API variants.
    #[must_use]
    pub const fn is_wordpress(self) -> bool {
        matches!(self, Self::WordPressApi | Self::WordPressApiJwt)
    }
}
