//! Configuration types for the Cosmos DB client.
//!
//! This module provides the core configuration types used to point the
//! client at an account and authenticate its requests.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`CosmosConfig`]: The main configuration struct holding all client settings
//! - [`CosmosConfigBuilder`]: A builder for constructing [`CosmosConfig`] instances
//! - [`AccountEndpoint`]: A validated account endpoint URL
//! - [`AuthToken`]: A validated master key or resource token with masked debug output
//! - [`ApiVersion`]: The REST API version sent in `x-ms-version`
//!
//! # Example
//!
//! ```rust
//! use cosmos_rest::{AccountEndpoint, ApiVersion, AuthToken, CosmosConfig};
//!
//! let config = CosmosConfig::builder()
//!     .endpoint(AccountEndpoint::new("https://myaccount.documents.azure.com:443/").unwrap())
//!     .auth_token(AuthToken::new("bWFzdGVyLWtleQ==").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;
mod version;

use std::time::Duration;

pub use newtypes::{AccountEndpoint, AuthToken};
pub use version::ApiVersion;

use crate::error::ConfigError;

/// Version of the master key signature scheme sent in `ver=`.
pub const DEFAULT_TOKEN_VERSION: &str = "1.0";

/// Configuration for the Cosmos DB client.
///
/// # Thread Safety
///
/// `CosmosConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use cosmos_rest::{AccountEndpoint, AuthToken, CosmosConfig};
///
/// let config = CosmosConfig::builder()
///     .endpoint(AccountEndpoint::new("https://myaccount.documents.azure.com:443/").unwrap())
///     .auth_token(AuthToken::new("bWFzdGVyLWtleQ==").unwrap())
///     .user_agent_prefix("MyApp/1.0")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.endpoint().host(), "myaccount.documents.azure.com:443");
/// ```
#[derive(Clone, Debug)]
pub struct CosmosConfig {
    endpoint: AccountEndpoint,
    auth_token: AuthToken,
    api_version: ApiVersion,
    token_version: String,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl CosmosConfig {
    /// Creates a new builder for constructing a `CosmosConfig`.
    #[must_use]
    pub fn builder() -> CosmosConfigBuilder {
        CosmosConfigBuilder::new()
    }

    /// Returns the account endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &AccountEndpoint {
        &self.endpoint
    }

    /// Returns the auth token.
    #[must_use]
    pub const fn auth_token(&self) -> &AuthToken {
        &self.auth_token
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the signature scheme version used for master key tokens.
    #[must_use]
    pub fn token_version(&self) -> &str {
        &self.token_version
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request transport timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify CosmosConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CosmosConfig>();
};

/// Builder for constructing [`CosmosConfig`] instances.
///
/// Required fields are `endpoint` and `auth_token`.
///
/// # Defaults
///
/// - `api_version`: [`ApiVersion::latest`]
/// - `token_version`: `"1.0"`
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (no client-side timeout)
#[derive(Debug, Default)]
pub struct CosmosConfigBuilder {
    endpoint: Option<AccountEndpoint>,
    auth_token: Option<AuthToken>,
    api_version: Option<ApiVersion>,
    token_version: Option<String>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl CosmosConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the account endpoint (required).
    #[must_use]
    pub fn endpoint(mut self, endpoint: AccountEndpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the master key or resource token (required).
    #[must_use]
    pub fn auth_token(mut self, token: AuthToken) -> Self {
        self.auth_token = Some(token);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the signature scheme version placed in `ver=`.
    #[must_use]
    pub fn token_version(mut self, version: impl Into<String>) -> Self {
        self.token_version = Some(version.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets a per-request transport timeout.
    ///
    /// A timed-out request surfaces as a network error and aborts any
    /// pagination chain it belongs to.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`CosmosConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `endpoint` or
    /// `auth_token` are not set.
    pub fn build(self) -> Result<CosmosConfig, ConfigError> {
        let endpoint = self
            .endpoint
            .ok_or(ConfigError::MissingRequiredField { field: "endpoint" })?;
        let auth_token = self
            .auth_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "auth_token",
            })?;

        Ok(CosmosConfig {
            endpoint,
            auth_token,
            api_version: self.api_version.unwrap_or_default(),
            token_version: self
                .token_version
                .unwrap_or_else(|| DEFAULT_TOKEN_VERSION.to_string()),
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> AccountEndpoint {
        AccountEndpoint::new("https://acct.documents.azure.com:443/").unwrap()
    }

    #[test]
    fn test_builder_requires_endpoint() {
        let result = CosmosConfigBuilder::new()
            .auth_token(AuthToken::new("a2V5").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "endpoint" })
        ));
    }

    #[test]
    fn test_builder_requires_auth_token() {
        let result = CosmosConfigBuilder::new().endpoint(endpoint()).build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "auth_token"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = CosmosConfig::builder()
            .endpoint(endpoint())
            .auth_token(AuthToken::new("a2V5").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.api_version(), &ApiVersion::latest());
        assert_eq!(config.token_version(), "1.0");
        assert!(config.user_agent_prefix().is_none());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = CosmosConfig::builder()
            .endpoint(endpoint())
            .auth_token(AuthToken::new("a2V5").unwrap())
            .api_version(ApiVersion::V2018_06_18)
            .token_version("2.0")
            .user_agent_prefix("MyApp/1.0")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.api_version(), &ApiVersion::V2018_06_18);
        assert_eq!(config.token_version(), "2.0");
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_config_debug_masks_token() {
        let config = CosmosConfig::builder()
            .endpoint(endpoint())
            .auth_token(AuthToken::new("very-secret").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("CosmosConfig"));
        assert!(!debug_str.contains("very-secret"));
    }
}
