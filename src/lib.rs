//! # Cosmos DB REST client
//!
//! A Rust client for the Azure Cosmos DB SQL REST API, providing type-safe
//! configuration, request signing, and continuation-driven paging.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`CosmosConfig`] and [`CosmosConfigBuilder`]
//! - Validated newtypes for the account endpoint and credentials
//! - Master key (HMAC-SHA256) and resource token request signing via [`auth`]
//! - Header assembly with per-request modifiers via [`clients::RequestOptions`]
//! - Paged listing and querying of every resource kind via [`feed`]
//! - Async HTTP client with per-resource operations via [`CosmosClient`]
//!
//! ## Quick Start
//!
//! ```rust
//! use cosmos_rest::{AccountEndpoint, ApiVersion, AuthToken, CosmosConfig};
//!
//! // Create configuration using the builder pattern
//! let config = CosmosConfig::builder()
//!     .endpoint(AccountEndpoint::new("https://myaccount.documents.azure.com:443/").unwrap())
//!     .auth_token(AuthToken::new("bWFzdGVyLWtleQ==").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Signing Requests
//!
//! Signing is a pure function of its inputs, so the date is passed in:
//!
//! ```rust
//! use cosmos_rest::auth::sign;
//! use cosmos_rest::HttpMethod;
//!
//! let header = sign(
//!     HttpMethod::Get,
//!     "/dbs/MyDb/colls/Orders/docs",
//!     "bWFzdGVyLWtleQ==",
//!     "1.0",
//!     "Tue, 01 Nov 1994 08:12:31 GMT",
//! )
//! .unwrap();
//! assert!(header.starts_with("type%3Dmaster"));
//! ```
//!
//! ## Listing and Querying
//!
//! ```rust,ignore
//! use cosmos_rest::{CosmosClient, ResourceKind};
//! use cosmos_rest::clients::{RequestOptions, SqlQuery};
//! use cosmos_rest::feed::FeedRequest;
//!
//! let client = CosmosClient::new(config);
//!
//! // Drain every page into one ordered result
//! let docs = client
//!     .list::<serde_json::Value>(
//!         ResourceKind::Documents,
//!         "/dbs/MyDb/colls/Orders",
//!         &RequestOptions::default(),
//!     )
//!     .await?;
//!
//! // Or go page by page
//! let request = FeedRequest::query(
//!     ResourceKind::Documents,
//!     "/dbs/MyDb/colls/Orders",
//!     SqlQuery::new("SELECT * FROM c WHERE c.total > @min").param("@min", 100),
//! );
//! let mut pager = client.pager::<serde_json::Value>(request, Some(50));
//! while let Some(page) = pager.next_page().await {
//!     println!("{} items", page?.items.len());
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No hidden retries**: The first failure is returned as is

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod feed;

// Re-export public types at crate root for convenience
pub use auth::{AuthError, TokenType};
pub use config::{AccountEndpoint, ApiVersion, AuthToken, CosmosConfig, CosmosConfigBuilder};
pub use error::{ConfigError, ValidationError};

// Re-export HTTP client types
pub use clients::{
    ApiError, CosmosClient, CosmosError, CosmosResponse, DataType, ErrorKind, HttpClient,
    HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidHttpRequestError, RequestOptions, ResponseHeaders,
};

// Re-export feed types
pub use feed::{FeedPage, FeedPager, FeedRequest, FeedResponse, ProtocolError, ResourceKind};
