//! Cosmos DB REST API version definitions.
//!
//! This module provides the [`ApiVersion`] enum, sent on every request in
//! the `x-ms-version` header.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Cosmos DB REST API version.
///
/// The service pins request and response semantics to a dated version
/// string. Known versions have dedicated variants; any other well-formed
/// `YYYY-MM-DD` string is accepted as `Custom`.
///
/// # Example
///
/// ```rust
/// use cosmos_rest::ApiVersion;
///
/// let version = ApiVersion::latest();
/// assert_eq!(version.to_string(), "2018-12-31");
///
/// let version: ApiVersion = "2017-02-22".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2017_02_22);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version 2017-02-22.
    V2017_02_22,
    /// API version 2018-06-18.
    V2018_06_18,
    /// API version 2018-09-17.
    V2018_09_17,
    /// API version 2018-12-31.
    V2018_12_31,
    /// Custom version string for versions without a dedicated variant.
    Custom(String),
}

impl ApiVersion {
    /// Returns the most recent version with a dedicated variant.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2018_12_31
    }

    /// Returns `true` if this is one of the known versions.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    fn is_valid_version_format(s: &str) -> bool {
        // Format: YYYY-MM-DD
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 3 {
            return false;
        }

        let widths = [4, 2, 2];
        parts
            .iter()
            .zip(widths)
            .all(|(part, width)| part.len() == width && part.chars().all(|c| c.is_ascii_digit()))
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version_str = match self {
            Self::V2017_02_22 => "2017-02-22",
            Self::V2018_06_18 => "2018-06-18",
            Self::V2018_09_17 => "2018-09-17",
            Self::V2018_12_31 => "2018-12-31",
            Self::Custom(s) => s,
        };
        f.write_str(version_str)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        match s {
            "2017-02-22" => Ok(Self::V2017_02_22),
            "2018-06-18" => Ok(Self::V2018_06_18),
            "2018-09-17" => Ok(Self::V2018_09_17),
            "2018-12-31" => Ok(Self::V2018_12_31),
            _ if Self::is_valid_version_format(s) => Ok(Self::Custom(s.to_string())),
            _ => Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            }),
        }
    }
}
