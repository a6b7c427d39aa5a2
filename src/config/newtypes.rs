//! Validated newtype wrappers for credential values.
//!
//! These wrappers validate their contents on construction so that a built
//! client never carries empty credentials.

use crate::error::ConfigError;
use std::fmt;

/// A validated WooCommerce consumer key (or WordPress username for JWT auth).
///
/// # Example
///
/// ```rust
/// use woocommerce_rest::ConsumerKey;
///
/// let key = ConsumerKey::new("ck_xxx").unwrap();
/// assert_eq!(key.as_ref(), "ck_xxx");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsumerKey(String);

impl ConsumerKey {
    /// Creates a new validated consumer key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyConsumerKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyConsumerKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ConsumerKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated WooCommerce consumer secret.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `ConsumerSecret(*****)` instead of the actual secret.
///
/// # Example
///
/// ```rust
/// use woocommerce_rest::ConsumerSecret;
///
/// let secret = ConsumerSecret::new("cs_xxx").unwrap();
/// assert_eq!(format!("{:?}", secret), "ConsumerSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ConsumerSecret(String);

impl ConsumerSecret {
    /// Creates a new validated consumer secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyConsumerSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyConsumerSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for ConsumerSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ConsumerSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConsumerSecret(*****)")
    }
}
