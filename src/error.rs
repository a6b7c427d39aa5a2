//! Error types for client construction.
//!
//! This module contains the error type returned when a client cannot be
//! built from the supplied URL and credentials.
//!
//! # Error Handling
//!
//! Construction is fail-fast: an unrecognized API URL or empty credentials
//! produce a [`ConfigError`] and no partial client is ever created.
//!
//! # Example
//!
//! ```rust
//! use woocommerce_rest::{ConsumerKey, ConfigError};
//!
//! let result = ConsumerKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyConsumerKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a client.
///
/// Each variant carries a clear, actionable message. All of these are fatal:
/// the constructor returns early and retains no state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The API URL is empty or otherwise unusable.
    #[error("Please use a valid WooCommerce REST API url.")]
    InvalidUrl,

    /// The URL does not match any supported API version suffix.
    #[error("Unknown WooCommerce REST API version for url '{url}'.")]
    UnsupportedVersion {
        /// The URL that could not be classified.
        url: String,
    },

    /// Consumer key cannot be empty.
    #[error("Consumer key cannot be empty. Please provide a valid WooCommerce consumer key.")]
    EmptyConsumerKey,

    /// Consumer secret cannot be empty.
    #[error("Consumer secret cannot be empty. Please provide a valid WooCommerce consumer secret.")]
    EmptyConsumerSecret,
}
