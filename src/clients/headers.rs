//! Request header assembly.
//!
//! [`HeaderBuilder`] produces the header set every request needs (API
//! version, host, accept, connection, date and the signed `Authorization`
//! value) and exposes setters for the optional per-request modifiers.
//! [`RequestOptions`] is the caller-facing bundle of those modifiers; it is
//! applied in one step so a failing validation never leaves a partially
//! built header set behind.
//!
//! # Example
//!
//! ```rust
//! use cosmos_rest::clients::{names, HeaderBuilder, HttpMethod, RequestOptions};
//! use cosmos_rest::{AccountEndpoint, AuthToken, CosmosConfig};
//! use serde_json::json;
//!
//! let config = CosmosConfig::builder()
//!     .endpoint(AccountEndpoint::new("https://acct.documents.azure.com:443/").unwrap())
//!     .auth_token(AuthToken::new("a2V5").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let options = RequestOptions::new().partition_key(json!("tenant-1"));
//! let date = "Tue, 01 Nov 1994 08:12:31 GMT";
//! let headers = HeaderBuilder::new(&config, HttpMethod::Get, "/dbs/D1/colls/C1/docs/doc1", date)
//!     .unwrap()
//!     .apply(&options)
//!     .unwrap()
//!     .build();
//!
//! assert_eq!(headers[names::HOST], "acct.documents.azure.com:443");
//! assert_eq!(headers[names::PARTITION_KEY], r#"["tenant-1"]"#);
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::auth::{sign, AuthError};
use crate::clients::http_request::{DataType, HttpMethod};
use crate::config::CosmosConfig;
use crate::error::ValidationError;

/// Wire names of the headers this crate reads and writes.
pub mod names {
    pub const VERSION: &str = "x-ms-version";
    pub const HOST: &str = "Host";
    pub const ACCEPT: &str = "Accept";
    pub const CONNECTION: &str = "Connection";
    pub const MS_DATE: &str = "x-ms-date";
    pub const AUTHORIZATION: &str = "Authorization";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const PARTITION_KEY: &str = "x-ms-documentdb-partitionkey";
    pub const PARTITION_KEY_RANGE_ID: &str = "x-ms-documentdb-partitionkeyrangeid";
    pub const MAX_ITEM_COUNT: &str = "x-ms-max-item-count";
    pub const CONTINUATION: &str = "x-ms-continuation";
    pub const IS_QUERY: &str = "x-ms-documentdb-isquery";
    pub const ENABLE_CROSS_PARTITION: &str = "x-ms-documentdb-query-enablecrosspartition";
    pub const INDEXING_DIRECTIVE: &str = "x-ms-documentdb-indexingdirective";
    pub const CONSISTENCY_LEVEL: &str = "x-ms-consistency-level";
    pub const SESSION_TOKEN: &str = "x-ms-session-token";
    pub const A_IM: &str = "A-IM";
    pub const IF_MATCH: &str = "If-Match";
    pub const IF_NONE_MATCH: &str = "If-None-Match";
    pub const IS_UPSERT: &str = "x-ms-documentdb-is-upsert";
    pub const OFFER_THROUGHPUT: &str = "x-ms-offer-throughput";
    pub const OFFER_AUTOPILOT: &str = "x-ms-cosmos-offer-autopilot-settings";
    pub const EXPIRY_SECONDS: &str = "x-ms-documentdb-expiry-seconds";

    // Response direction, matched against lower-cased names
    pub const REQUEST_CHARGE: &str = "x-ms-request-charge";
    pub const RESOURCE_USAGE: &str = "x-ms-resource-usage";
    pub const ACTIVITY_ID: &str = "x-ms-activity-id";
    pub const ETAG: &str = "etag";
    pub const DATE: &str = "date";
}

/// Smallest manually provisioned throughput the service accepts, in RU/s.
pub const MIN_MANUAL_THROUGHPUT: u32 = 400;

/// Shortest validity accepted for a resource token, in seconds.
pub const MIN_TOKEN_EXPIRY_SECONDS: u32 = 600;

/// Longest validity accepted for a resource token, in seconds.
pub const MAX_TOKEN_EXPIRY_SECONDS: u32 = 18_000;

/// Consistency level override for a single request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsistencyLevel {
    /// Reads always see the latest committed write.
    Strong,
    /// Reads lag writes by at most a configured number of versions or time.
    BoundedStaleness,
    /// Reads see the writes of the same session token.
    Session,
    /// Reads never see writes out of order.
    ConsistentPrefix,
    /// No ordering guarantee for reads.
    Eventual,
}

impl fmt::Display for ConsistencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Strong => "Strong",
            Self::BoundedStaleness => "BoundedStaleness",
            Self::Session => "Session",
            Self::ConsistentPrefix => "ConsistentPrefix",
            Self::Eventual => "Eventual",
        })
    }
}

/// Whether a written document is added to the index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexingDirective {
    /// Index the document.
    Include,
    /// Leave the document out of the index.
    Exclude,
}

impl fmt::Display for IndexingDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Include => "Include",
            Self::Exclude => "Exclude",
        })
    }
}

/// Provisioned throughput for a database or container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Throughput {
    /// Fixed RU/s; must be at least [`MIN_MANUAL_THROUGHPUT`].
    Manual(u32),
    /// Autoscale up to the given maximum RU/s.
    Autoscale {
        /// Upper bound the service scales to.
        max_throughput: u32,
    },
}

/// Optional per-request modifiers.
///
/// Only modifiers that are set produce headers.
///
/// # Example
///
/// ```rust
/// use cosmos_rest::clients::{ConsistencyLevel, RequestOptions, Throughput};
///
/// let options = RequestOptions::new()
///     .consistency_level(ConsistencyLevel::Session)
///     .session_token("0:1#12")
///     .throughput(Throughput::Manual(400));
/// assert!(options.session_token.is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    /// Partition key value; sent as a one-element JSON array.
    pub partition_key: Option<serde_json::Value>,
    /// Consistency level override.
    pub consistency_level: Option<ConsistencyLevel>,
    /// Session token for session consistency.
    pub session_token: Option<String>,
    /// Read the change feed instead of the plain feed.
    pub change_feed: bool,
    /// Only succeed if the resource's etag matches.
    pub if_match: Option<String>,
    /// Only succeed if the resource's etag differs (change feed start point).
    pub if_none_match: Option<String>,
    /// Restrict the request to one partition key range.
    pub partition_key_range_id: Option<String>,
    /// Allow a query to fan out across partitions.
    pub enable_cross_partition: bool,
    /// Create or replace on POST.
    pub upsert: bool,
    /// Provisioned throughput for database or container creation.
    pub throughput: Option<Throughput>,
    /// Indexing directive for document writes.
    pub indexing_directive: Option<IndexingDirective>,
    /// Validity of resource tokens returned when reading permissions.
    pub resource_token_expiry_seconds: Option<u32>,
}

impl RequestOptions {
    /// Creates an empty set of options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the partition key value.
    #[must_use]
    pub fn partition_key(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.partition_key = Some(value.into());
        self
    }

    /// Sets the consistency level.
    #[must_use]
    pub const fn consistency_level(mut self, level: ConsistencyLevel) -> Self {
        self.consistency_level = Some(level);
        self
    }

    /// Sets the session token.
    #[must_use]
    pub fn session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Reads the incremental change feed.
    #[must_use]
    pub const fn change_feed(mut self) -> Self {
        self.change_feed = true;
        self
    }

    /// Sets the `If-Match` etag.
    #[must_use]
    pub fn if_match(mut self, etag: impl Into<String>) -> Self {
        self.if_match = Some(etag.into());
        self
    }

    /// Sets the `If-None-Match` etag.
    #[must_use]
    pub fn if_none_match(mut self, etag: impl Into<String>) -> Self {
        self.if_none_match = Some(etag.into());
        self
    }

    /// Restricts the request to a partition key range.
    #[must_use]
    pub fn partition_key_range_id(mut self, id: impl Into<String>) -> Self {
        self.partition_key_range_id = Some(id.into());
        self
    }

    /// Enables cross-partition queries.
    #[must_use]
    pub const fn enable_cross_partition(mut self) -> Self {
        self.enable_cross_partition = true;
        self
    }

    /// Turns a create into an upsert.
    #[must_use]
    pub const fn upsert(mut self) -> Self {
        self.upsert = true;
        self
    }

    /// Sets provisioned throughput.
    #[must_use]
    pub const fn throughput(mut self, throughput: Throughput) -> Self {
        self.throughput = Some(throughput);
        self
    }

    /// Sets the indexing directive.
    #[must_use]
    pub const fn indexing_directive(mut self, directive: IndexingDirective) -> Self {
        self.indexing_directive = Some(directive);
        self
    }

    /// Sets the validity of issued resource tokens.
    #[must_use]
    pub const fn resource_token_expiry_seconds(mut self, seconds: u32) -> Self {
        self.resource_token_expiry_seconds = Some(seconds);
        self
    }
}

/// Builds the header set for one request.
#[derive(Clone, Debug)]
pub struct HeaderBuilder {
    headers: HashMap<String, String>,
}

impl HeaderBuilder {
    /// Creates the mandatory headers and signs the request.
    ///
    /// `date` is sent as `x-ms-date` and covered by the signature.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the configured token cannot sign requests.
    pub fn new(
        config: &CosmosConfig,
        verb: HttpMethod,
        path: &str,
        date: &str,
    ) -> Result<Self, AuthError> {
        let authorization = sign(
            verb,
            path,
            config.auth_token().as_ref(),
            config.token_version(),
            date,
        )?;

        let mut headers = HashMap::new();
        headers.insert(names::VERSION.to_string(), config.api_version().to_string());
        headers.insert(names::HOST.to_string(), config.endpoint().host().to_string());
        headers.insert(names::ACCEPT.to_string(), "*/*".to_string());
        headers.insert(names::CONNECTION.to_string(), "keep-alive".to_string());
        headers.insert(names::MS_DATE.to_string(), date.to_string());
        headers.insert(names::AUTHORIZATION.to_string(), authorization);

        Ok(Self { headers })
    }

    fn set(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_string(), value.into());
        self
    }

    /// Sets the partition key as a one-element JSON array.
    #[must_use]
    pub fn partition_key(self, value: &serde_json::Value) -> Self {
        let encoded = serde_json::Value::Array(vec![value.clone()]).to_string();
        self.set(names::PARTITION_KEY, encoded)
    }

    /// Sets the consistency level.
    #[must_use]
    pub fn consistency_level(self, level: ConsistencyLevel) -> Self {
        self.set(names::CONSISTENCY_LEVEL, level.to_string())
    }

    /// Sets the session token.
    #[must_use]
    pub fn session_token(self, token: &str) -> Self {
        self.set(names::SESSION_TOKEN, token)
    }

    /// Requests the incremental change feed.
    #[must_use]
    pub fn change_feed(self) -> Self {
        self.set(names::A_IM, "Incremental feed")
    }

    /// Sets `If-Match`.
    #[must_use]
    pub fn if_match(self, etag: &str) -> Self {
        self.set(names::IF_MATCH, etag)
    }

    /// Sets `If-None-Match`.
    #[must_use]
    pub fn if_none_match(self, etag: &str) -> Self {
        self.set(names::IF_NONE_MATCH, etag)
    }

    /// Restricts the request to a partition key range.
    #[must_use]
    pub fn partition_key_range_id(self, id: &str) -> Self {
        self.set(names::PARTITION_KEY_RANGE_ID, id)
    }

    /// Allows a query to span partitions.
    #[must_use]
    pub fn enable_cross_partition(self) -> Self {
        self.set(names::ENABLE_CROSS_PARTITION, "true")
    }

    /// Marks a POST as an upsert.
    #[must_use]
    pub fn upsert(self) -> Self {
        self.set(names::IS_UPSERT, "true")
    }

    /// Sets the indexing directive.
    #[must_use]
    pub fn indexing_directive(self, directive: IndexingDirective) -> Self {
        self.set(names::INDEXING_DIRECTIVE, directive.to_string())
    }

    /// Sets provisioned throughput.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ThroughputBelowMinimum`] for manual
    /// throughput under [`MIN_MANUAL_THROUGHPUT`].
    pub fn throughput(self, throughput: Throughput) -> Result<Self, ValidationError> {
        match throughput {
            Throughput::Manual(requested) if requested < MIN_MANUAL_THROUGHPUT => {
                Err(ValidationError::ThroughputBelowMinimum {
                    requested,
                    minimum: MIN_MANUAL_THROUGHPUT,
                })
            }
            Throughput::Manual(requested) => {
                Ok(self.set(names::OFFER_THROUGHPUT, requested.to_string()))
            }
            Throughput::Autoscale { max_throughput } => {
                let settings = serde_json::json!({ "maxThroughput": max_throughput }).to_string();
                Ok(self.set(names::OFFER_AUTOPILOT, settings))
            }
        }
    }

    /// Sets the validity of issued resource tokens.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ExpiryOutOfRange`] outside
    /// [`MIN_TOKEN_EXPIRY_SECONDS`]..=[`MAX_TOKEN_EXPIRY_SECONDS`].
    pub fn resource_token_expiry(self, seconds: u32) -> Result<Self, ValidationError> {
        validate_token_expiry(seconds)?;
        Ok(self.set(names::EXPIRY_SECONDS, seconds.to_string()))
    }

    /// Sets the page size bound.
    #[must_use]
    pub fn max_item_count(self, count: u32) -> Self {
        self.set(names::MAX_ITEM_COUNT, count.to_string())
    }

    /// Sets the continuation cursor from a previous page.
    #[must_use]
    pub fn continuation(self, token: &str) -> Self {
        self.set(names::CONTINUATION, token)
    }

    /// Marks the request as a SQL query.
    #[must_use]
    pub fn query(self) -> Self {
        self.set(names::IS_QUERY, "true")
            .set(names::CONTENT_TYPE, DataType::Query.as_content_type())
    }

    /// Applies every modifier set in `options`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`]; the builder is consumed, so no
    /// partially applied header set survives.
    pub fn apply(self, options: &RequestOptions) -> Result<Self, ValidationError> {
        let mut builder = self;

        if let Some(value) = &options.partition_key {
            builder = builder.partition_key(value);
        }
        if let Some(level) = options.consistency_level {
            builder = builder.consistency_level(level);
        }
        if let Some(token) = &options.session_token {
            builder = builder.session_token(token);
        }
        if options.change_feed {
            builder = builder.change_feed();
        }
        if let Some(etag) = &options.if_match {
            builder = builder.if_match(etag);
        }
        if let Some(etag) = &options.if_none_match {
            builder = builder.if_none_match(etag);
        }
        if let Some(id) = &options.partition_key_range_id {
            builder = builder.partition_key_range_id(id);
        }
        if options.enable_cross_partition {
            builder = builder.enable_cross_partition();
        }
        if options.upsert {
            builder = builder.upsert();
        }
        if let Some(directive) = options.indexing_directive {
            builder = builder.indexing_directive(directive);
        }
        if let Some(throughput) = options.throughput {
            builder = builder.throughput(throughput)?;
        }
        if let Some(seconds) = options.resource_token_expiry_seconds {
            builder = builder.resource_token_expiry(seconds)?;
        }

        Ok(builder)
    }

    /// Returns the finished header map.
    #[must_use]
    pub fn build(self) -> HashMap<String, String> {
        self.headers
    }
}

/// Checks a resource token validity period against the service bounds.
///
/// # Errors
///
/// Returns [`ValidationError::ExpiryOutOfRange`] when `seconds` is outside
/// [`MIN_TOKEN_EXPIRY_SECONDS`]..=[`MAX_TOKEN_EXPIRY_SECONDS`].
pub const fn validate_token_expiry(seconds: u32) -> Result<u32, ValidationError> {
    if seconds < MIN_TOKEN_EXPIRY_SECONDS || seconds > MAX_TOKEN_EXPIRY_SECONDS {
        return Err(ValidationError::ExpiryOutOfRange {
            seconds,
            min: MIN_TOKEN_EXPIRY_SECONDS,
            max: MAX_TOKEN_EXPIRY_SECONDS,
        });
    }
    Ok(seconds)
}
