//! Request signing for the `Authorization` header.
//!
//! Requests authenticated with a master key carry an HMAC-SHA256 signature
//! over a canonical string built from the verb, the resolved resource type
//! and link, and the request date:
//!
//! ```text
//! lower(verb) \n lower(resourceType) \n resourceLink \n lower(date) \n \n
//! ```
//!
//! The header value is `type=master&ver=<version>&sig=<base64 signature>`,
//! percent-encoded as a whole. Resource tokens are pre-signed by the service
//! and are only percent-encoded.
//!
//! The date is supplied by the caller so that signing stays a pure function
//! of its inputs; use [`format_http_date`] to produce it.
//!
//! # Example
//!
//! ```rust
//! use cosmos_rest::auth::sign;
//! use cosmos_rest::HttpMethod;
//!
//! let date = "Tue, 01 Nov 1994 08:12:31 GMT";
//! let first = sign(HttpMethod::Get, "/dbs/D1/colls/C1/docs", "a2V5", "1.0", date).unwrap();
//! let second = sign(HttpMethod::Get, "/dbs/D1/colls/C1/docs", "a2V5", "1.0", date).unwrap();
//! assert_eq!(first, second);
//! assert!(first.starts_with("type%3Dmaster%26ver%3D1.0%26sig%3D"));
//! ```

use base64::prelude::*;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::error::AuthError;
use crate::auth::path::{resolve, ResourceLink};
use crate::clients::HttpMethod;

type HmacSha256 = Hmac<Sha256>;

/// Substring that marks a pre-signed resource token.
const RESOURCE_TOKEN_MARKER: &str = "type=resource";

/// The same marker as it appears in an already percent-encoded token.
const ENCODED_RESOURCE_TOKEN_MARKER: &str = "type%3dresource";

/// RFC 1123 date format used for `x-ms-date`.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Kind of credential used to authorize a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenType {
    /// Account master key; every request is HMAC-signed with it.
    Master,
    /// Scoped, pre-signed token issued through a permission resource.
    Resource,
}

impl TokenType {
    /// Detects the token type from the token text.
    #[must_use]
    pub fn detect(token: &str) -> Self {
        let lowered = token.to_ascii_lowercase();
        if lowered.contains(RESOURCE_TOKEN_MARKER)
            || lowered.contains(ENCODED_RESOURCE_TOKEN_MARKER)
        {
            Self::Resource
        } else {
            Self::Master
        }
    }

    /// Returns the value used for `type=` in the authorization string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Master => "master",
            Self::Resource => "resource",
        }
    }
}

/// Everything needed to sign a single request.
///
/// Built once per request and consumed by [`SignatureContext::sign`].
#[derive(Clone, Debug)]
pub struct SignatureContext<'a> {
    verb: HttpMethod,
    link: ResourceLink,
    token: &'a str,
    token_type: TokenType,
    token_version: &'a str,
    timestamp: &'a str,
}

impl<'a> SignatureContext<'a> {
    /// Resolves the path and detects the token type.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmptyToken`] if `token` is empty.
    pub fn new(
        verb: HttpMethod,
        path: &str,
        token: &'a str,
        token_version: &'a str,
        timestamp: &'a str,
    ) -> Result<Self, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::EmptyToken);
        }

        Ok(Self {
            verb,
            link: resolve(path),
            token,
            token_type: TokenType::detect(token),
            token_version,
            timestamp,
        })
    }

    /// Returns the detected token type.
    #[must_use]
    pub const fn token_type(&self) -> TokenType {
        self.token_type
    }

    /// Returns the resolved resource link.
    #[must_use]
    pub const fn link(&self) -> &ResourceLink {
        &self.link
    }

    /// Returns the canonical string covered by a master key signature.
    #[must_use]
    pub fn string_to_sign(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}\n\n",
            self.verb,
            self.link.resource_type.to_lowercase(),
            self.link.resource_id,
            self.timestamp.to_lowercase(),
        )
    }

    /// Produces the percent-encoded `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidMasterKey`] if a master key is not valid
    /// base64.
    pub fn sign(self) -> Result<String, AuthError> {
        match self.token_type {
            TokenType::Resource => Ok(urlencoding::encode(self.token).into_owned()),
            TokenType::Master => {
                let key = BASE64_STANDARD
                    .decode(self.token.trim())
                    .map_err(|e| AuthError::InvalidMasterKey {
                        reason: e.to_string(),
                    })?;
                let signature = compute_signature_base64(self.string_to_sign().as_bytes(), &key);
                let value = format!(
                    "type={}&ver={}&sig={signature}",
                    self.token_type.as_str(),
                    self.token_version,
                );
                Ok(urlencoding::encode(&value).into_owned())
            }
        }
    }
}

/// Signs a request and returns the `Authorization` header value.
///
/// # Errors
///
/// Returns [`AuthError`] if the token is empty or a master key cannot be
/// decoded.
pub fn sign(
    verb: HttpMethod,
    path: &str,
    token: &str,
    token_version: &str,
    timestamp: &str,
) -> Result<String, AuthError> {
    SignatureContext::new(verb, path, token, token_version, timestamp)?.sign()
}

/// Computes an HMAC-SHA256 signature with a raw key, returning base64 output.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature_base64(message: &[u8], key: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(message);
    BASE64_STANDARD.encode(mac.finalize().into_bytes())
}

/// Formats a timestamp the way `x-ms-date` expects it.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use cosmos_rest::auth::format_http_date;
///
/// let at = Utc.with_ymd_and_hms(1994, 11, 1, 8, 12, 31).unwrap();
/// assert_eq!(format_http_date(at), "Tue, 01 Nov 1994 08:12:31 GMT");
/// ```
#[must_use]
pub fn format_http_date(at: DateTime<Utc>) -> String {
    at.format(HTTP_DATE_FORMAT).to_string()
}
