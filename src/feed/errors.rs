//! Protocol error types for feed and payload decoding.
//!
//! These errors mean the service answered successfully but the answer does
//! not have the shape the protocol promises, or the caller asked for a
//! resource kind that does not exist.
//!
//! # Example
//!
//! ```rust
//! use cosmos_rest::feed::ProtocolError;
//!
//! let error = ProtocolError::MissingEnvelopeField { field: "Documents" };
//! assert!(error.to_string().contains("Documents"));
//! ```

use thiserror::Error;

/// Error raised when a response or a resource kind cannot be interpreted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A successful feed response lacks the array field for its resource kind.
    #[error("Invalid response payload: expected array field '{field}' in the feed envelope")]
    MissingEnvelopeField {
        /// The envelope field that was expected.
        field: &'static str,
    },

    /// The requested resource kind is not one the service exposes.
    #[error("Unknown resource kind '{kind}'")]
    UnknownResourceKind {
        /// The unrecognized kind as given by the caller.
        kind: String,
    },

    /// An item or body could not be converted to or from the requested type.
    #[error("Invalid response payload: {reason}")]
    InvalidPayload {
        /// The serializer's description of the problem.
        reason: String,
    },
}

impl From<serde_json::Error> for ProtocolError {
    fn from(error: serde_json::Error) -> Self {
        Self::InvalidPayload {
            reason: error.to_string(),
        }
    }
}
