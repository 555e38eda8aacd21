//! Error types for configuration and request validation.
//!
//! This module contains the errors raised before any request leaves the
//! process: invalid configuration values and caller misuse of request
//! modifiers.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Request modifiers that carry service-side bounds
//! (throughput, resource token expiry) return [`ValidationError`].
//!
//! # Example
//!
//! ```rust
//! use cosmos_rest::{AuthToken, ConfigError};
//!
//! let result = AuthToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAuthToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Auth token cannot be empty.
    #[error("Auth token cannot be empty. Please provide a master key or a resource token.")]
    EmptyAuthToken,

    /// Account endpoint is invalid.
    #[error("Invalid account endpoint '{url}'. Expected format: 'https://<account>.documents.azure.com:443/'.")]
    InvalidEndpoint {
        /// The invalid endpoint that was provided.
        url: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM-DD' (e.g., '2018-12-31').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

/// Errors raised when a request modifier falls outside service limits.
///
/// These are checked while headers are assembled, so a failing value never
/// produces a partially built header set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Manually provisioned throughput is below the service minimum.
    #[error("Offer throughput {requested} RU/s is below the minimum of {minimum} RU/s.")]
    ThroughputBelowMinimum {
        /// The throughput that was requested.
        requested: u32,
        /// The minimum the service accepts.
        minimum: u32,
    },

    /// Resource token expiry is outside the allowed window.
    #[error("Resource token expiry of {seconds}s is outside the allowed range {min}s..={max}s.")]
    ExpiryOutOfRange {
        /// The requested validity in seconds.
        seconds: u32,
        /// Lower bound in seconds.
        min: u32,
        /// Upper bound in seconds.
        max: u32,
    },
}
