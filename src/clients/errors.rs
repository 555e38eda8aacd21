//! HTTP-specific error types for the Cosmos DB client.
//!
//! This module contains error types for HTTP operations, including service
//! error responses, unreadable response bodies, and request validation
//! failures.
//!
//! # Error Handling
//!
//! - [`ApiError`]: Non-2xx HTTP responses from the service
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use cosmos_rest::clients::{HttpClient, HttpError};
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Api(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::MalformedBody { code, reason }) => println!("Bad body ({code}): {reason}"),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when the service answers with a non-successful status.
///
/// The message is the service's `message` field verbatim, or the raw body
/// text when the body is not a JSON error object.
///
/// # Example
///
/// ```rust
/// use cosmos_rest::clients::ApiError;
///
/// let error = ApiError {
///     code: 404,
///     error_code: Some("NotFound".to_string()),
///     message: "not found".to_string(),
///     activity_id: None,
/// };
///
/// assert_eq!(error.to_string(), "not found");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The service's symbolic error code (body `code` field), if any.
    pub error_code: Option<String>,
    /// The service's error message.
    pub message: String,
    /// Activity id for support requests (from `x-ms-activity-id`).
    pub activity_id: Option<String>,
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A SQL query body was attached to a method other than POST.
    #[error("SQL queries must be sent with POST, not {method}.")]
    QueryRequiresPost {
        /// The HTTP method the query was attached to.
        method: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A non-2xx response from the service.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A success response whose body is not JSON.
    #[error("Malformed response body (status {code}): {reason}")]
    MalformedBody {
        /// The HTTP status code of the response.
        code: u16,
        /// Why the body could not be read.
        reason: String,
    },

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error, including timeouts.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code, when the failure came with a response.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(e) => Some(e.code),
            Self::MalformedBody { code, .. } => Some(*code),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }
}
