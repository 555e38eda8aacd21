//! Cosmos DB client for the SQL REST API.
//!
//! This module provides [`CosmosClient`], which signs and sends requests and
//! exposes the per-resource operations, and [`CosmosError`], the error every
//! operation returns.
//!
//! # Example
//!
//! ```rust,ignore
//! use cosmos_rest::clients::cosmos::{CosmosClient, SqlQuery};
//! use cosmos_rest::clients::RequestOptions;
//!
//! let client = CosmosClient::new(config);
//!
//! let query = SqlQuery::new("SELECT * FROM c WHERE c.status = @status")
//!     .param("@status", "open");
//! let options = RequestOptions::new().enable_cross_partition();
//! let orders = client
//!     .query_documents::<Order>("Shop", "Orders", query, &options)
//!     .await?;
//! ```

mod client;
mod errors;
mod operations;
mod query;

pub use client::{CosmosClient, CosmosResponse};
pub use errors::{CosmosError, ErrorKind};
pub use operations::{PermissionMode, TriggerOperation, TriggerType};
pub use query::{SqlParameter, SqlQuery};
