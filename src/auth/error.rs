//! Signing error types.
//!
//! # Example
//!
//! ```rust
//! use cosmos_rest::auth::AuthError;
//!
//! let error = AuthError::EmptyToken;
//! assert_eq!(error.to_string(), "Auth token is empty; cannot sign the request");
//! ```

use thiserror::Error;

/// Errors that can occur while producing an `Authorization` header value.
///
/// # Thread Safety
///
/// `AuthError` is `Send + Sync`, making it safe to use across async boundaries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No token material was supplied.
    #[error("Auth token is empty; cannot sign the request")]
    EmptyToken,

    /// The master key could not be decoded into HMAC key bytes.
    ///
    /// Master keys are issued as standard base64; anything else is a
    /// configuration mistake.
    #[error("Master key is not valid base64: {reason}")]
    InvalidMasterKey {
        /// The decoder's description of the problem.
        reason: String,
    },
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};
