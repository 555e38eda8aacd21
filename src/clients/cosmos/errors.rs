//! Error type for Cosmos DB client operations.
//!
//! [`CosmosError`] unifies every failure an operation can end in. Callers
//! that only need the category, e.g. to decide on a retry policy of their
//! own, can use [`CosmosError::kind`] and [`CosmosError::status_code`].
//!
//! # Example
//!
//! ```rust,ignore
//! use cosmos_rest::clients::cosmos::{CosmosError, ErrorKind};
//!
//! match client.get_document::<Order>("MyDb", "Orders", "o-1", &options).await {
//!     Ok(response) => println!("{:?}", response.item),
//!     Err(e) if e.status_code() == Some(404) => println!("no such order"),
//!     Err(e) if e.kind() == ErrorKind::Transport => println!("try again later: {e}"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use std::fmt;

use thiserror::Error;

use crate::auth::AuthError;
use crate::clients::HttpError;
use crate::error::{ConfigError, ValidationError};
use crate::feed::ProtocolError;

/// Category of a [`CosmosError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The configuration was rejected.
    Config,
    /// The caller supplied an out-of-range or inconsistent value.
    Validation,
    /// The request could not be signed.
    Auth,
    /// The service's answer did not have the promised shape.
    Protocol,
    /// The service answered with a non-success status.
    Api,
    /// The network failed, timed out, or returned an unreadable body.
    Transport,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Config => "config",
            Self::Validation => "validation",
            Self::Auth => "auth",
            Self::Protocol => "protocol",
            Self::Api => "api",
            Self::Transport => "transport",
        })
    }
}

/// Error type for Cosmos DB client operations.
#[derive(Debug, Error)]
pub enum CosmosError {
    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A request modifier was outside service limits.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Signing failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The response could not be interpreted.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

// Verify CosmosError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CosmosError>();
};

impl CosmosError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::Validation(_) | Self::Http(HttpError::InvalidRequest(_)) => ErrorKind::Validation,
            Self::Auth(_) => ErrorKind::Auth,
            Self::Protocol(_) => ErrorKind::Protocol,
            Self::Http(HttpError::Api(_)) => ErrorKind::Api,
            Self::Http(HttpError::MalformedBody { .. } | HttpError::Network(_)) => {
                ErrorKind::Transport
            }
        }
    }

    /// Returns the HTTP status code, when the failure came with a response.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status_code(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{ApiError, InvalidHttpRequestError};

    #[test]
    fn test_api_error_kind_and_status() {
        let error = CosmosError::from(HttpError::from(ApiError {
            code: 404,
            error_code: None,
            message: "not found".to_string(),
            activity_id: None,
        }));

        assert_eq!(error.kind(), ErrorKind::Api);
        assert_eq!(error.status_code(), Some(404));
        assert_eq!(error.to_string(), "not found");
    }

    #[test]
    fn test_validation_error_has_no_status() {
        let error = CosmosError::from(ValidationError::ThroughputBelowMinimum {
            requested: 100,
            minimum: 400,
        });
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.status_code(), None);
    }

    #[test]
    fn test_invalid_request_counts_as_validation() {
        let error = CosmosError::from(HttpError::from(InvalidHttpRequestError::MissingBodyType));
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_malformed_body_counts_as_transport() {
        let error = CosmosError::from(HttpError::MalformedBody {
            code: 200,
            reason: "expected value".to_string(),
        });
        assert_eq!(error.kind(), ErrorKind::Transport);
        assert_eq!(error.status_code(), Some(200));
    }

    #[test]
    fn test_protocol_and_auth_kinds() {
        let error = CosmosError::from(ProtocolError::MissingEnvelopeField { field: "Users" });
        assert_eq!(error.kind(), ErrorKind::Protocol);
        assert_eq!(error.kind().to_string(), "protocol");

        let error = CosmosError::from(AuthError::EmptyToken);
        assert_eq!(error.kind(), ErrorKind::Auth);
    }
}
