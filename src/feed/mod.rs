//! Paged listing and querying of resources.
//!
//! # Overview
//!
//! - [`ResourceKind`]: the listable resource kinds, their URL segments and
//!   envelope fields
//! - [`FeedRequest`]: what to fetch (listing or SQL query) and with which modifiers
//! - [`fetch_page`] / [`stream`] / [`FeedPager`]: the paging engine
//! - [`FeedPage`] / [`FeedResponse`]: one page, and the accumulated result
//! - [`ProtocolError`]: well-formed responses with an unexpected shape
//!
//! # Example
//!
//! ```rust,ignore
//! use cosmos_rest::feed::{stream, FeedRequest};
//! use cosmos_rest::ResourceKind;
//!
//! let request = FeedRequest::list(ResourceKind::Collections, "/dbs/MyDb");
//! let collections = stream::<serde_json::Value>(&client, &request, None).await?;
//! for collection in &collections {
//!     println!("{}", collection["id"]);
//! }
//! println!("charge: {} RU", collections.request_charge());
//! ```

mod errors;
mod kind;
mod pager;
mod response;

pub use errors::ProtocolError;
pub use kind::ResourceKind;
pub use pager::{decode_page, fetch_page, stream, FeedPager, FeedRequest};
pub use response::{FeedPage, FeedResponse};
