//! Resource path resolution for request signing.
//!
//! Every Cosmos DB REST path alternates between a resource type segment and
//! a resource id segment, for example `/dbs/{db}/colls/{coll}/docs/{doc}`.
//! The signature covers a `(resource type, resource link)` pair derived from
//! that path:
//!
//! - A path ending in a type segment addresses a feed (list, create, query).
//!   The type is that last segment and the link is the parent path.
//! - A path ending in an id segment addresses a single resource. The type is
//!   the segment before it and the link is the full path.
//!
//! Offers live in a flat collection and are signed with their lower-cased id
//! rather than a hierarchical link.
//!
//! # Example
//!
//! ```rust
//! use cosmos_rest::auth::resolve;
//!
//! let link = resolve("/dbs/D1/colls/C1/docs");
//! assert_eq!(link.resource_type, "docs");
//! assert_eq!(link.resource_id, "dbs/D1/colls/C1");
//!
//! let link = resolve("/dbs/D1/colls/C1/docs/Doc1");
//! assert_eq!(link.resource_type, "docs");
//! assert_eq!(link.resource_id, "dbs/D1/colls/C1/docs/Doc1");
//! ```

const OFFERS: &str = "offers";

/// The `(resource type, resource id)` pair a request is signed against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceLink {
    /// Lower-cased resource type segment (e.g. `docs`, `colls`).
    pub resource_type: String,
    /// Resource link as signed; empty for top-level feeds.
    pub resource_id: String,
}

/// Resolves a REST path into the resource type and id used for signing.
///
/// The path is normalised to start with a single `/` and a trailing `/` is
/// ignored. `/` on its own resolves to an empty type and id, which is how
/// the database account resource is signed.
#[must_use]
pub fn resolve(path: &str) -> ResourceLink {
    let trimmed = path.trim_end_matches('/');
    let path = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };

    let segments: Vec<&str> = path.split('/').collect();
    let last = segments.len() - 1;
    let is_feed = last % 2 == 1;

    let resource_type = if is_feed {
        segments[last]
    } else {
        segments[last - 1]
    }
    .to_lowercase();

    let resource_id = if resource_type == OFFERS {
        if is_feed {
            String::new()
        } else {
            segments[last].to_lowercase()
        }
    } else if is_feed {
        if last > 1 {
            // Parent path: drop the leading '/' and the trailing type segment
            path.rfind('/')
                .map_or_else(String::new, |end| path[1..end].to_string())
        } else {
            String::new()
        }
    } else {
        path[1..].to_string()
    };

    ResourceLink {
        resource_type,
        resource_id,
    }
}
