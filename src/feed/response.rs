//! Page and result types produced by the pager.
//!
//! A [`FeedPage`] is what one round trip returns. A [`FeedResponse`] is the
//! ordered, replayable result of a whole listing: it implements
//! `Deref<Target = [T]>`, so it can be indexed and iterated like a slice.
//!
//! ```rust
//! use cosmos_rest::feed::{FeedPage, FeedResponse};
//! use cosmos_rest::clients::ResponseHeaders;
//!
//! let mut response = FeedResponse::new();
//! response.push_page(FeedPage {
//!     items: vec![1, 2],
//!     continuation: None,
//!     headers: ResponseHeaders::default(),
//! });
//!
//! assert_eq!(response.len(), 2);
//! assert_eq!(response[1], 2);
//! assert_eq!(response.iter().sum::<i32>(), 3);
//! ```

use std::ops::Deref;

use crate::clients::ResponseHeaders;

/// One page of a feed.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedPage<T> {
    /// Items in service order.
    pub items: Vec<T>,
    /// Cursor for the next page, if the service reported more.
    pub continuation: Option<String>,
    /// Metadata of the response that carried this page.
    pub headers: ResponseHeaders,
}

impl<T> FeedPage<T> {
    /// Creates a page without items, as returned for `204 No Content`.
    #[must_use]
    pub const fn empty(headers: ResponseHeaders) -> Self {
        Self {
            items: Vec::new(),
            continuation: None,
            headers,
        }
    }

    /// Returns `true` when the service reported further pages.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.continuation.is_some()
    }
}

/// The accumulated result of a listing or query.
///
/// Besides the items it keeps the continuation of the last page fetched
/// (set only when a bounded fetch stopped early), the number of pages, the
/// summed request charge, the most recent session token, and the metadata
/// of the last response.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedResponse<T> {
    items: Vec<T>,
    continuation: Option<String>,
    pages: usize,
    request_charge: f64,
    session_token: Option<String>,
    headers: ResponseHeaders,
}

impl<T> Default for FeedResponse<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            continuation: None,
            pages: 0,
            request_charge: 0.0,
            session_token: None,
            headers: ResponseHeaders::default(),
        }
    }
}

impl<T> FeedResponse<T> {
    /// Creates an empty response.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a page into the response, keeping service order.
    pub fn push_page(&mut self, page: FeedPage<T>) {
        let FeedPage {
            mut items,
            continuation,
            headers,
        } = page;

        self.items.append(&mut items);
        self.continuation = continuation;
        self.pages += 1;
        if let Some(charge) = headers.request_charge_value() {
            self.request_charge += charge;
        }
        if headers.session_token.is_some() {
            self.session_token.clone_from(&headers.session_token);
        }
        self.headers = headers;
    }

    /// Cursor left by the last page, if paging stopped before the end.
    #[must_use]
    pub fn continuation(&self) -> Option<&str> {
        self.continuation.as_deref()
    }

    /// Number of round trips that produced this response.
    #[must_use]
    pub const fn pages(&self) -> usize {
        self.pages
    }

    /// Request units consumed across all pages.
    #[must_use]
    pub const fn request_charge(&self) -> f64 {
        self.request_charge
    }

    /// Session token reported by the latest page that carried one.
    #[must_use]
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    /// Metadata of the last page fetched.
    ///
    /// For a change feed read, `headers().etag` is the position to pass as
    /// `If-None-Match` on the next read.
    #[must_use]
    pub const fn headers(&self) -> &ResponseHeaders {
        &self.headers
    }

    /// Consumes the response and returns the items.
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T> Deref for FeedResponse<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> IntoIterator for FeedResponse<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a FeedResponse<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(
        items: Vec<&'static str>,
        continuation: Option<&str>,
        charge: &str,
    ) -> FeedPage<&'static str> {
        FeedPage {
            items,
            continuation: continuation.map(ToString::to_string),
            headers: ResponseHeaders {
                request_charge: Some(charge.to_string()),
                session_token: Some(format!("0:{charge}")),
                etag: Some(format!("\"{charge}\"")),
                ..ResponseHeaders::default()
            },
        }
    }

    #[test]
    fn test_push_page_preserves_order_and_sums_charge() {
        let mut response = FeedResponse::new();
        response.push_page(page(vec!["a", "b"], Some("c1"), "1.5"));
        response.push_page(page(vec!["c"], None, "2.25"));

        assert_eq!(&*response, &["a", "b", "c"]);
        assert_eq!(response.pages(), 2);
        assert!((response.request_charge() - 3.75).abs() < f64::EPSILON);
        assert_eq!(response.session_token(), Some("0:2.25"));
        assert!(response.continuation().is_none());
    }

    #[test]
    fn test_push_page_keeps_last_page_headers() {
        let mut response = FeedResponse::new();
        response.push_page(page(vec!["a"], Some("c1"), "1"));
        response.push_page(FeedPage::empty(ResponseHeaders {
            activity_id: Some("act-2".to_string()),
            ..ResponseHeaders::default()
        }));

        assert_eq!(response.headers().activity_id.as_deref(), Some("act-2"));
        assert!(response.headers().etag.is_none());
        assert_eq!(response.session_token(), Some("0:1"));
        assert_eq!(response.pages(), 2);
    }

    #[test]
    fn test_response_is_replayable() {
        let mut response = FeedResponse::new();
        response.push_page(page(vec!["a", "b"], None, "1"));

        let first: Vec<_> = response.iter().collect();
        let second: Vec<_> = (&response).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(response.into_inner(), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_page() {
        let page: FeedPage<u8> = FeedPage::empty(ResponseHeaders::default());
        assert!(page.items.is_empty());
        assert!(!page.has_more());
    }
}
