//! HTTP client types for Cosmos DB communication.
//!
//! This module provides the HTTP layer for making authenticated requests to
//! the Cosmos DB REST API: request and header assembly, the transport, and
//! response parsing.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async transport for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response, with [`ResponseHeaders`] metadata
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`DataType`]: Content types for request bodies
//! - [`HeaderBuilder`] / [`RequestOptions`]: Signed header sets and per-request modifiers
//! - [`cosmos::CosmosClient`]: Higher-level client with per-resource operations
//! - [`cosmos::CosmosError`]: The error every client operation returns
//!
//! # Retry Behavior
//!
//! Nothing is retried. The first transport failure or non-success status is
//! returned to the caller, who can layer a retry policy on top using
//! [`cosmos::CosmosError::kind`] and [`cosmos::CosmosError::status_code`].

pub mod cosmos;
mod errors;
pub mod headers;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{ApiError, HttpError, InvalidHttpRequestError};
pub use headers::{
    names, validate_token_expiry, ConsistencyLevel, HeaderBuilder, IndexingDirective,
    RequestOptions, Throughput, MAX_TOKEN_EXPIRY_SECONDS, MIN_MANUAL_THROUGHPUT,
    MIN_TOKEN_EXPIRY_SECONDS,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, ResponseHeaders};

// Re-export Cosmos client types at the clients module level
pub use cosmos::{CosmosClient, CosmosError, CosmosResponse, ErrorKind, SqlParameter, SqlQuery};
