//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::auth::TokenType;
use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Cosmos DB auth token.
///
/// Holds either a base64 master key or a pre-signed resource token. The
/// token kind is detected from its contents, see [`TokenType::detect`].
///
/// # Security
///
/// The `Debug` implementation masks the token, displaying only
/// `AuthToken(*****)`.
///
/// # Example
///
/// ```rust
/// use cosmos_rest::{AuthToken, TokenType};
///
/// let key = "C2y6yDjf5/R+ob0N8A7Cgv30VRDJIWEHLM+4QDU5DE2nQ9nDuVTqobD4b8mGGyPMbIZnqyMsEcaGQy67XIw/Jw==";
/// let token = AuthToken::new(key).unwrap();
/// assert_eq!(token.token_type(), TokenType::Master);
/// assert_eq!(format!("{:?}", token), "AuthToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Creates a new validated auth token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAuthToken`] if the token is empty or
    /// whitespace only.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAuthToken);
        }
        Ok(Self(token))
    }

    /// Returns whether this is a master key or a resource token.
    #[must_use]
    pub fn token_type(&self) -> TokenType {
        TokenType::detect(&self.0)
    }
}

impl AsRef<str> for AuthToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(*****)")
    }
}

/// A validated Cosmos DB account endpoint.
///
/// The endpoint must carry a scheme and a host. The `Host` request header
/// is derived from it with the scheme and any trailing path stripped.
///
/// # Serialization
///
/// `AccountEndpoint` serializes to and deserializes from the URL string it
/// was created from.
///
/// # Example
///
/// ```rust
/// use cosmos_rest::AccountEndpoint;
///
/// let endpoint = AccountEndpoint::new("https://myaccount.documents.azure.com:443/").unwrap();
/// assert_eq!(endpoint.scheme(), "https");
/// assert_eq!(endpoint.host(), "myaccount.documents.azure.com:443");
/// assert_eq!(endpoint.base_url(), "https://myaccount.documents.azure.com:443");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountEndpoint {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl AccountEndpoint {
    /// Creates a new validated account endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the URL has no scheme or
    /// no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidEndpoint { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidEndpoint { url });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidEndpoint { url });
        }

        // Authority keeps the port; it ends at path, query or fragment
        let remainder = &url[host_start..];
        let host_end = remainder
            .find(['/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        let host = &url[host_start..host_end];
        if host.is_empty() || host.starts_with(':') {
            return Err(ConfigError::InvalidEndpoint { url });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host value sent in the `Host` header, including any port.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Returns `scheme://host[:port]`, the prefix for every request URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.url[..self.host_end]
    }
}

impl AsRef<str> for AccountEndpoint {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl Serialize for AccountEndpoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for AccountEndpoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_token_rejects_empty_string() {
        assert!(matches!(AuthToken::new(""), Err(ConfigError::EmptyAuthToken)));
        assert!(matches!(
            AuthToken::new("   "),
            Err(ConfigError::EmptyAuthToken)
        ));
    }

    #[test]
    fn test_auth_token_masks_value_in_debug() {
        let token = AuthToken::new("super-secret-key").unwrap();
        let debug_output = format!("{token:?}");
        assert_eq!(debug_output, "AuthToken(*****)");
        assert!(!debug_output.contains("super-secret-key"));
    }

    #[test]
    fn test_auth_token_detects_resource_tokens() {
        let token = AuthToken::new("type=resource&ver=1.0&sig=abc").unwrap();
        assert_eq!(token.token_type(), TokenType::Resource);

        let token = AuthToken::new("a2V5").unwrap();
        assert_eq!(token.token_type(), TokenType::Master);
    }

    #[test]
    fn test_endpoint_strips_scheme_and_path_for_host() {
        let endpoint = AccountEndpoint::new("https://acct.documents.azure.com:443/").unwrap();
        assert_eq!(endpoint.scheme(), "https");
        assert_eq!(endpoint.host(), "acct.documents.azure.com:443");
        assert_eq!(endpoint.base_url(), "https://acct.documents.azure.com:443");

        let endpoint = AccountEndpoint::new("http://localhost:8081").unwrap();
        assert_eq!(endpoint.host(), "localhost:8081");
        assert_eq!(endpoint.base_url(), "http://localhost:8081");

        let endpoint = AccountEndpoint::new("https://acct.documents.azure.com/some/path").unwrap();
        assert_eq!(endpoint.host(), "acct.documents.azure.com");
    }

    #[test]
    fn test_endpoint_rejects_invalid() {
        assert!(AccountEndpoint::new("acct.documents.azure.com").is_err());
        assert!(AccountEndpoint::new("https://").is_err());
        assert!(AccountEndpoint::new("://acct.documents.azure.com").is_err());
        assert!(AccountEndpoint::new("https://:443/").is_err());
    }

    #[test]
    fn test_endpoint_deserializes_with_validation() {
        let endpoint: AccountEndpoint =
            serde_json::from_str(r#""https://acct.documents.azure.com:443/""#).unwrap();
        assert_eq!(endpoint.host(), "acct.documents.azure.com:443");

        let result: Result<AccountEndpoint, _> = serde_json::from_str(r#""not-a-url""#);
        assert!(result.is_err());
    }
}
