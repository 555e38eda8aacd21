//! Resource kinds served through feeds.
//!
//! Every listable resource shares the same paging protocol and differs only
//! in the URL segment it lives under and the envelope field that carries its
//! items. [`ResourceKind`] is the single table of those two facts.

use std::fmt;
use std::str::FromStr;

use crate::feed::errors::ProtocolError;

/// A kind of resource that can be listed or queried.
///
/// # Example
///
/// ```rust
/// use cosmos_rest::ResourceKind;
///
/// let kind: ResourceKind = "docs".parse().unwrap();
/// assert_eq!(kind, ResourceKind::Documents);
/// assert_eq!(kind.envelope_field(), "Documents");
/// assert_eq!(kind.feed_path("/dbs/D1/colls/C1"), "/dbs/D1/colls/C1/docs");
/// assert_eq!(kind.item_path("/dbs/D1/colls/C1", "doc1"), "/dbs/D1/colls/C1/docs/doc1");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Databases (`dbs`), under the account.
    Databases,
    /// Collections (`colls`), under a database.
    Collections,
    /// Documents (`docs`), under a collection.
    Documents,
    /// Stored procedures (`sprocs`), under a collection.
    StoredProcedures,
    /// User-defined functions (`udfs`), under a collection.
    UserDefinedFunctions,
    /// Triggers (`triggers`), under a collection.
    Triggers,
    /// Users (`users`), under a database.
    Users,
    /// Permissions (`permissions`), under a user.
    Permissions,
    /// Partition key ranges (`pkranges`), under a collection.
    PartitionKeyRanges,
    /// Throughput offers (`offers`), under the account.
    Offers,
}

impl ResourceKind {
    /// All kinds, in hierarchy order.
    pub const ALL: [Self; 10] = [
        Self::Databases,
        Self::Collections,
        Self::Documents,
        Self::StoredProcedures,
        Self::UserDefinedFunctions,
        Self::Triggers,
        Self::Users,
        Self::Permissions,
        Self::PartitionKeyRanges,
        Self::Offers,
    ];

    /// Returns the envelope field holding this kind's items in a feed response.
    #[must_use]
    pub const fn envelope_field(&self) -> &'static str {
        match self {
            Self::Databases => "Databases",
            Self::Collections => "DocumentCollections",
            Self::Documents => "Documents",
            Self::StoredProcedures => "StoredProcedures",
            Self::UserDefinedFunctions => "UserDefinedFunctions",
            Self::Triggers => "Triggers",
            Self::Users => "Users",
            Self::Permissions => "Permissions",
            Self::PartitionKeyRanges => "PartitionKeyRanges",
            Self::Offers => "Offers",
        }
    }

    /// Returns the URL segment this kind lives under.
    #[must_use]
    pub const fn path_segment(&self) -> &'static str {
        match self {
            Self::Databases => "dbs",
            Self::Collections => "colls",
            Self::Documents => "docs",
            Self::StoredProcedures => "sprocs",
            Self::UserDefinedFunctions => "udfs",
            Self::Triggers => "triggers",
            Self::Users => "users",
            Self::Permissions => "permissions",
            Self::PartitionKeyRanges => "pkranges",
            Self::Offers => "offers",
        }
    }

    /// Builds the feed path of this kind under `parent`.
    ///
    /// `parent` is the path of the owning resource, e.g. `/dbs/D1` for
    /// collections. Account-level kinds use an empty parent.
    #[must_use]
    pub fn feed_path(&self, parent: &str) -> String {
        let parent = parent.trim_matches('/');
        if parent.is_empty() {
            format!("/{}", self.path_segment())
        } else {
            format!("/{parent}/{}", self.path_segment())
        }
    }

    /// Builds the path of a single resource of this kind.
    #[must_use]
    pub fn item_path(&self, parent: &str, id: &str) -> String {
        format!("{}/{id}", self.feed_path(parent))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.envelope_field())
    }
}

impl FromStr for ResourceKind {
    type Err = ProtocolError;

    /// Parses an envelope field name or a path segment, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.envelope_field().eq_ignore_ascii_case(s)
                    || kind.path_segment().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| ProtocolError::UnknownResourceKind {
                kind: s.to_string(),
            })
    }
}
