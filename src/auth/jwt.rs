//! JWT token acquisition for the WordPress JWT auth plugin.
//!
//! WordPress installs running a JWT auth plugin exchange a username and
//! password for a bearer token at `jwt-auth/v1/token`. The exchange happens
//! lazily, on the first request that needs a token, and the result is cached
//! on the client's [`AuthSession`](crate::auth::AuthSession) for all
//! subsequent requests.

use serde::{Deserialize, Serialize};

use crate::clients::filters::{JsonFilter, RequestFilter};
use crate::clients::RestError;
use crate::config::ApiEndpoint;

/// A cached JWT login result.
///
/// Field names match the wire format of the WordPress JWT auth plugin.
///
/// # Example
///
/// ```rust
/// use woocommerce_rest::JwtToken;
///
/// let token: JwtToken = serde_json::from_str(
///     r#"{"token":"eyJ...","user_email":"admin@store.test",
///         "user_nicename":"admin","user_display_name":"Admin"}"#,
/// )
/// .unwrap();
/// assert_eq!(token.token, "eyJ...");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JwtToken {
    /// The bearer token.
    pub token: String,
    /// Email address of the authenticated user.
    pub user_email: String,
    /// URL-safe user name.
    pub user_nicename: String,
    /// Display name of the authenticated user.
    pub user_display_name: String,
}

/// Performs the one-time JWT login exchange.
///
/// POSTs form-encoded credentials to the token endpoint derived from the
/// base URL. The password is the configured consumer secret, URL-encoded
/// before form encoding, matching what the plugin expects. The optional
/// request filter may rewrite the outgoing login request and the optional
/// JSON filter may rewrite the raw response before parsing.
///
/// A failure here is fatal for the call that triggered it but does not
/// poison the client: nothing is cached, so the next call retries the login.
pub(crate) async fn login(
    http: &reqwest::Client,
    endpoint: &ApiEndpoint,
    request_filter: Option<&dyn RequestFilter>,
    json_filter: Option<&dyn JsonFilter>,
    debug: bool,
) -> Result<JwtToken, RestError> {
    let token_url = endpoint.jwt_token_url();
    tracing::debug!(url = %token_url, "performing JWT login exchange");

    let form = [
        ("username", endpoint.consumer_key().to_string()),
        (
            "password",
            urlencoding::encode(endpoint.consumer_secret()).into_owned(),
        ),
    ];

    let mut request = http.post(&token_url).form(&form).build()?;
    if let Some(filter) = request_filter {
        filter.apply(&mut request);
    }

    let response = http.execute(request).await?;
    let status = response.status();
    let mut body = response.text().await?;
    if let Some(filter) = json_filter {
        body = filter.apply(body);
    }

    match serde_json::from_str(&body) {
        Ok(token) => Ok(token),
        Err(err) => {
            tracing::warn!(%status, "JWT login response could not be parsed");
            Err(RestError::deserialization(&err, &body, debug))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_token_parses_plugin_response() {
        let json = r#"{
            "token": "jwt-token-value",
            "user_email": "admin@store.test",
            "user_nicename": "admin",
            "user_display_name": "Store Admin"
        }"#;
        let token: JwtToken = serde_json::from_str(json).unwrap();
        assert_eq!(token.token, "jwt-token-value");
        assert_eq!(token.user_email, "admin@store.test");
        assert_eq!(token.user_nicename, "admin");
        assert_eq!(token.user_display_name, "Store Admin");
    }

    #[test]
    fn test_jwt_token_requires_token_field() {
        let json = r#"{
            "user_email": "admin@store.test",
            "user_nicename": "admin",
            "user_display_name": "Store Admin"
        }"#;
        assert!(serde_json::from_str::<JwtToken>(json).is_err());
    }
}
