//! Per-call error types.
//!
//! # Error Handling
//!
//! Every failure while building or dispatching a request surfaces as a
//! typed [`RestError`], so callers can distinguish transport failure from
//! logic failure. Note that a completed HTTP exchange with a non-2xx
//! status is still an `Ok` result carrying the body text; this layer does
//! not interpret status codes.

use thiserror::Error;

/// Errors that can occur while building or dispatching a single request.
#[derive(Debug, Error)]
pub enum RestError {
    /// The WordPress core API variant requires the OAuth 1.0a token pair.
    ///
    /// Raised before any network call when either field is unset.
    #[error(
        "oauth_token and oauth_token_secret parameters are required when using WordPress REST API."
    )]
    MissingCredentials,

    /// The underlying transport failed (connection, TLS, invalid URL, or
    /// reading the response body).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Reading the file for a file-upload body failed.
    #[error("failed to read upload file: {0}")]
    Io(#[from] std::io::Error),

    /// A file-upload body requires `path` and `name` query parameters.
    #[error("file upload requires the '{name}' query parameter")]
    MissingUploadParameter {
        /// The missing parameter key.
        name: &'static str,
    },

    /// The request body could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A JSON response could not be parsed into the requested type.
    ///
    /// The offending JSON text is only attached when the client's debug
    /// flag is set, to avoid leaking sensitive payloads by default.
    #[error("{message}")]
    Deserialization {
        /// The parse error, with the raw JSON appended in debug mode.
        message: String,
        /// The offending JSON text; `None` unless debug mode is enabled.
        json: Option<String>,
    },
}

impl RestError {
    /// Builds a [`RestError::Deserialization`], attaching the raw JSON only
    /// when `debug` is set.
    pub(crate) fn deserialization(err: &serde_json::Error, json: &str, debug: bool) -> Self {
        if debug {
            Self::Deserialization {
                message: format!("{err}\n\n{json}"),
                json: Some(json.to_string()),
            }
        } else {
            Self::Deserialization {
                message: err.to_string(),
                json: None,
            }
        }
    }
}
