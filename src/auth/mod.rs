//! Request authentication for the Cosmos DB REST API.
//!
//! This module turns a verb, a REST path and a credential into the value of
//! the `Authorization` header.
//!
//! # Overview
//!
//! - [`resolve`]: derives the signed `(resource type, resource link)` pair from a path
//! - [`sign`] / [`SignatureContext`]: produces the header value for master keys
//!   (HMAC-SHA256) or resource tokens (passed through)
//! - [`format_http_date`]: formats the `x-ms-date` timestamp covered by the signature
//! - [`AuthError`]: failures while signing
//!
//! # Example
//!
//! ```rust
//! use cosmos_rest::auth::{resolve, sign, TokenType};
//! use cosmos_rest::HttpMethod;
//!
//! let link = resolve("/dbs");
//! assert_eq!(link.resource_type, "dbs");
//! assert!(link.resource_id.is_empty());
//!
//! let header = sign(
//!     HttpMethod::Get,
//!     "/dbs",
//!     "type=resource&ver=1.0&sig=abc",
//!     "1.0",
//!     "Tue, 01 Nov 1994 08:12:31 GMT",
//! )
//! .unwrap();
//! assert_eq!(header, "type%3Dresource%26ver%3D1.0%26sig%3Dabc");
//! assert_eq!(TokenType::detect("type=resource&ver=1.0&sig=abc"), TokenType::Resource);
//! ```

mod error;
pub mod path;
pub mod signer;

pub use error::AuthError;
pub use path::{resolve, ResourceLink};
pub use signer::{compute_signature_base64, format_http_date, sign, SignatureContext, TokenType};
