//! OAuth 1.0a request signing.
//!
//! Non-HTTPS WooCommerce endpoints authenticate by signing the request
//! query string: the HTTP method, full URL and canonicalized parameters are
//! bound to the consumer secret with HMAC-SHA256, proving request integrity
//! without TLS.
//!
//! Everything in this module is a pure function; the nonce and timestamp
//! are injected by the caller so signatures are deterministic and testable.
//!
//! # Example
//!
//! ```rust
//! use woocommerce_rest::auth::signature::{canonical_param_string, compute_signature};
//!
//! let params = vec![
//!     ("b".to_string(), "2".to_string()),
//!     ("a".to_string(), "1".to_string()),
//! ];
//! assert_eq!(canonical_param_string(&params), "a=1&b=2");
//!
//! let signature = compute_signature("secret", "GET&...");
//! assert_eq!(signature.len(), 44); // Base64 of 32 bytes
//! ```

use base64::prelude::*;
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use std::borrow::Cow;

use crate::clients::QueryParams;

type HmacSha256 = Hmac<Sha256>;

/// The `oauth_signature_method` literal sent with every signed request.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA256";

/// The `oauth_version` literal sent with every signed request.
pub const OAUTH_VERSION: &str = "1.0";

/// Percent-encodes a string per RFC 3986.
///
/// Everything outside the unreserved set (`A-Z a-z 0-9 - . _ ~`) is escaped,
/// matching what the server uses when it verifies the signature.
#[must_use]
pub fn percent_encode(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Builds the canonical parameter string used as signing input.
///
/// Entries are sorted by key using ordinal comparison, each key and value is
/// percent-encoded, and the pairs are joined as `key=value` separated by `&`.
#[must_use]
pub fn canonical_param_string(params: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    sorted
        .iter()
        .map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Computes the Base64-encoded HMAC-SHA256 signature of a base string.
///
/// The key is the consumer secret, optionally suffixed with `&token_secret`
/// for the WordPress core API variant.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(secret: &str, base_string: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(base_string.as_bytes());
    BASE64_STANDARD.encode(mac.finalize().into_bytes())
}

/// Builds the fully signed query string for a request.
///
/// OAuth-reserved parameters are inserted first and are never overwritten by
/// caller-supplied parameters with colliding keys. The signature is computed
/// over `METHOD&enc(request_url)&enc(canonical_params)` and appended to the
/// parameter set as `oauth_signature`. The returned string keeps the
/// insertion order of the parameter set, with values percent-encoded.
#[must_use]
pub fn signed_query(
    method: &str,
    request_url: &str,
    consumer_key: &str,
    oauth_token: Option<&str>,
    signing_secret: &str,
    params: &QueryParams,
    nonce: &str,
    timestamp: i64,
) -> String {
    let mut entries: Vec<(String, String)> = Vec::with_capacity(params.len() + 7);
    entries.push(("oauth_consumer_key".to_string(), consumer_key.to_string()));
    if let Some(token) = oauth_token {
        entries.push(("oauth_token".to_string(), token.to_string()));
    }
    entries.push(("oauth_nonce".to_string(), nonce.to_string()));
    entries.push((
        "oauth_signature_method".to_string(),
        SIGNATURE_METHOD.to_string(),
    ));
    entries.push(("oauth_timestamp".to_string(), timestamp.to_string()));
    entries.push(("oauth_version".to_string(), OAUTH_VERSION.to_string()));

    for (key, value) in params.iter() {
        // Reserved keys win on collision.
        if !entries.iter().any(|(existing, _)| existing == key) {
            entries.push((key.clone(), value.clone()));
        }
    }

    let base_string = format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(request_url),
        percent_encode(&canonical_param_string(&entries))
    );

    entries.push((
        "oauth_signature".to_string(),
        compute_signature(signing_secret, &base_string),
    ));

    entries
        .iter()
        .map(|(key, value)| format!("{key}={}", percent_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Generates a fresh 32-character lowercase hex nonce.
#[must_use]
pub fn nonce() -> String {
    let bytes: [u8; 16] = rand::thread_rng().gen();
    hex::encode(bytes)
}

// Internal hex encoding since we don't want to add another dependency
mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        let bytes = bytes.as_ref();
        let mut result = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            result.push(HEX_CHARS[(byte >> 4) as usize] as char);
            result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_percent_encode_is_rfc3986() {
        assert_eq!(percent_encode("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(percent_encode("safe-._~"), "safe-._~");
        assert_eq!(percent_encode("key[]"), "key%5B%5D");
    }

    #[test]
    fn test_canonical_param_string_sorts_by_ordinal_key() {
        let params = pairs(&[("b", "2"), ("a", "1")]);
        assert_eq!(canonical_param_string(&params), "a=1&b=2");
    }

    #[test]
    fn test_canonical_param_string_encodes_keys_and_values() {
        let params = pairs(&[("filter[sku]", "a b")]);
        assert_eq!(
            canonical_param_string(&params),
            "filter%5Bsku%5D=a%20b"
        );
    }

    #[test]
    fn test_compute_signature_is_base64_of_32_bytes() {
        let signature = compute_signature("secret", "GET&message");
        assert_eq!(signature.len(), 44);
    }

    #[test]
    fn test_signature_deterministic_with_fixed_nonce_and_timestamp() {
        let params = QueryParams::from([("page", "2")]);
        let build = || {
            signed_query(
                "GET",
                "http://store.test/wp-json/wc/v3/products",
                "ck_x",
                None,
                "cs_y&",
                &params,
                "0123456789abcdef0123456789abcdef",
                1_700_000_000,
            )
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_signature_changes_when_any_parameter_changes() {
        let extract_signature = |query: &str| {
            query
                .split('&')
                .find(|part| part.starts_with("oauth_signature="))
                .map(str::to_string)
                .unwrap()
        };

        let base = signed_query(
            "GET",
            "http://store.test/wp-json/wc/v3/products",
            "ck_x",
            None,
            "cs_y&",
            &QueryParams::from([("page", "2")]),
            "0123456789abcdef0123456789abcdef",
            1_700_000_000,
        );
        let changed_param = signed_query(
            "GET",
            "http://store.test/wp-json/wc/v3/products",
            "ck_x",
            None,
            "cs_y&",
            &QueryParams::from([("page", "3")]),
            "0123456789abcdef0123456789abcdef",
            1_700_000_000,
        );
        let changed_method = signed_query(
            "POST",
            "http://store.test/wp-json/wc/v3/products",
            "ck_x",
            None,
            "cs_y&",
            &QueryParams::from([("page", "2")]),
            "0123456789abcdef0123456789abcdef",
            1_700_000_000,
        );

        assert_ne!(extract_signature(&base), extract_signature(&changed_param));
        assert_ne!(extract_signature(&base), extract_signature(&changed_method));
    }

    #[test]
    fn test_signed_query_contains_oauth_fields_in_insertion_order() {
        let query = signed_query(
            "GET",
            "http://store.test/wp-json/wc/v3/orders",
            "ck_x",
            None,
            "cs_y&",
            &QueryParams::from([("per_page", "5")]),
            "0123456789abcdef0123456789abcdef",
            1_700_000_000,
        );

        let keys: Vec<&str> = query
            .split('&')
            .map(|part| part.split('=').next().unwrap())
            .collect();
        assert_eq!(
            keys,
            vec![
                "oauth_consumer_key",
                "oauth_nonce",
                "oauth_signature_method",
                "oauth_timestamp",
                "oauth_version",
                "per_page",
                "oauth_signature",
            ]
        );
        assert!(query.contains("oauth_signature_method=HMAC-SHA256"));
    }

    #[test]
    fn test_reserved_keys_win_over_caller_params() {
        let query = signed_query(
            "GET",
            "http://store.test/wp-json/wc/v3/orders",
            "ck_x",
            None,
            "cs_y&",
            &QueryParams::from([("oauth_nonce", "spoofed")]),
            "0123456789abcdef0123456789abcdef",
            1_700_000_000,
        );
        assert!(query.contains("oauth_nonce=0123456789abcdef0123456789abcdef"));
        assert!(!query.contains("spoofed"));
    }

    #[test]
    fn test_oauth_token_included_for_wordpress_api() {
        let query = signed_query(
            "GET",
            "http://store.test/wp-json/wp/v2/posts",
            "ck_x",
            Some("tok"),
            "cs_y&tok_secret",
            &QueryParams::new(),
            "0123456789abcdef0123456789abcdef",
            1_700_000_000,
        );
        assert!(query.contains("oauth_token=tok"));
    }

    #[test]
    fn test_nonce_is_32_hex_chars() {
        let nonce = nonce();
        assert_eq!(nonce.len(), 32);
        assert!(nonce.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!nonce.chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_hex_encoding() {
        assert_eq!(hex::encode([0x00, 0xff, 0xab, 0xcd]), "00ffabcd");
        assert_eq!(hex::encode([]), "");
    }
}
