//! Continuation-driven paging over feeds.
//!
//! List and query endpoints answer one page per call and report further
//! pages through the `x-ms-continuation` response header. The functions
//! here drive that protocol for any [`ResourceKind`]:
//!
//! - [`fetch_page`]: one round trip, returning the page and its cursor
//! - [`stream`]: without a page bound, drains every page into one
//!   [`FeedResponse`]; with a bound, returns after the first page
//! - [`FeedPager`]: explicit page-at-a-time access for callers that want
//!   to stop early or process pages as they arrive
//!
//! Listings are sent as GET; SQL queries as POST with the query as body.
//! The first failure aborts the chain and discards what was accumulated.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::clients::cosmos::{CosmosClient, CosmosError, SqlQuery};
use crate::clients::{
    DataType, HttpError, HttpMethod, HttpResponse, RequestOptions, ResponseHeaders,
};
use crate::feed::errors::ProtocolError;
use crate::feed::kind::ResourceKind;
use crate::feed::response::{FeedPage, FeedResponse};

/// Describes what a feed request fetches: a plain listing or a SQL query
/// over a resource kind, plus the request modifiers sent with every page.
///
/// # Example
///
/// ```rust
/// use cosmos_rest::clients::cosmos::SqlQuery;
/// use cosmos_rest::feed::FeedRequest;
/// use cosmos_rest::ResourceKind;
///
/// let listing = FeedRequest::list(ResourceKind::Databases, "");
/// assert_eq!(listing.path(), "/dbs");
///
/// let query = FeedRequest::query(
///     ResourceKind::Documents,
///     "/dbs/D1/colls/C1",
///     SqlQuery::new("SELECT * FROM c WHERE c.kind = @kind").param("@kind", "order"),
/// );
/// assert!(query.sql().is_some());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FeedRequest {
    kind: ResourceKind,
    path: String,
    query: Option<SqlQuery>,
    options: RequestOptions,
}

impl FeedRequest {
    /// Lists every resource of `kind` under `parent`.
    #[must_use]
    pub fn list(kind: ResourceKind, parent: &str) -> Self {
        Self {
            kind,
            path: kind.feed_path(parent),
            query: None,
            options: RequestOptions::default(),
        }
    }

    /// Runs a SQL query over the resources of `kind` under `parent`.
    #[must_use]
    pub fn query(kind: ResourceKind, parent: &str, query: SqlQuery) -> Self {
        Self {
            query: Some(query),
            ..Self::list(kind, parent)
        }
    }

    /// Sets the modifiers sent with every page request.
    #[must_use]
    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the resource kind being fetched.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Returns the feed path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the SQL query, for query requests.
    #[must_use]
    pub const fn sql(&self) -> Option<&SqlQuery> {
        self.query.as_ref()
    }

    /// Returns the request modifiers.
    #[must_use]
    pub const fn request_options(&self) -> &RequestOptions {
        &self.options
    }
}

/// Fetches a single page.
///
/// `max_item_count` bounds the page size; `continuation` resumes from a
/// cursor returned by an earlier page. On a change feed read, `304 Not
/// Modified` means no changes since the etag sent and yields an empty page.
///
/// # Errors
///
/// Returns [`CosmosError`] if the request modifiers are invalid, signing
/// fails, the transport fails, the service answers with a non-success
/// status, or the success envelope lacks the kind's array field.
pub async fn fetch_page<T: DeserializeOwned>(
    client: &CosmosClient,
    request: &FeedRequest,
    max_item_count: Option<u32>,
    continuation: Option<&str>,
) -> Result<FeedPage<T>, CosmosError> {
    let method = if request.query.is_some() {
        HttpMethod::Post
    } else {
        HttpMethod::Get
    };

    let mut headers = client.headers(method, &request.path, &request.options)?;
    if let Some(token) = continuation {
        headers = headers.continuation(token);
    }
    if let Some(count) = max_item_count {
        headers = headers.max_item_count(count);
    }

    let body = match &request.query {
        Some(query) => {
            headers = headers.query();
            let body = serde_json::to_value(query).map_err(ProtocolError::from)?;
            Some((body, DataType::Query))
        }
        None => None,
    };

    let response = match client.dispatch(method, &request.path, body, headers).await {
        Err(CosmosError::Http(HttpError::Api(error)))
            if error.code == 304 && request.options.change_feed =>
        {
            tracing::debug!(kind = %request.kind, "Change feed has no new changes");
            return Ok(FeedPage::empty(ResponseHeaders {
                activity_id: error.activity_id,
                ..ResponseHeaders::default()
            }));
        }
        result => result?,
    };
    let page = decode_page(request.kind, response)?;

    tracing::debug!(
        kind = %request.kind,
        items = page.items.len(),
        has_more = page.has_more(),
        "Fetched feed page"
    );

    Ok(page)
}

/// Fetches a feed into one ordered result.
///
/// Without `max_item_count` every page is fetched, one after the other,
/// until the service stops returning a continuation. With a bound exactly
/// one page is fetched and its cursor is left on the response for the
/// caller to resume from.
///
/// # Errors
///
/// Returns the first [`CosmosError`] of any page; items accumulated from
/// earlier pages are dropped.
pub async fn stream<T: DeserializeOwned>(
    client: &CosmosClient,
    request: &FeedRequest,
    max_item_count: Option<u32>,
) -> Result<FeedResponse<T>, CosmosError> {
    let mut response = FeedResponse::new();
    let mut continuation: Option<String> = None;

    loop {
        let page = fetch_page(client, request, max_item_count, continuation.as_deref()).await?;
        continuation.clone_from(&page.continuation);
        response.push_page(page);

        if continuation.is_none() || max_item_count.is_some() {
            return Ok(response);
        }
    }
}

/// Decodes the envelope of a feed response.
///
/// `204 No Content` and empty bodies yield an empty page.
///
/// # Errors
///
/// Returns [`ProtocolError::MissingEnvelopeField`] when the kind's array
/// field is absent, and [`ProtocolError::InvalidPayload`] when an item does
/// not decode into `T`.
pub fn decode_page<T: DeserializeOwned>(
    kind: ResourceKind,
    response: HttpResponse,
) -> Result<FeedPage<T>, ProtocolError> {
    let HttpResponse {
        code,
        mut body,
        response_headers,
        ..
    } = response;

    if code == 204 || body.is_null() {
        return Ok(FeedPage::empty(response_headers));
    }

    let field = kind.envelope_field();
    let items = match body.get_mut(field).map(serde_json::Value::take) {
        Some(serde_json::Value::Array(items)) => items,
        _ => return Err(ProtocolError::MissingEnvelopeField { field }),
    };

    let items = items
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<T>, _>>()?;

    Ok(FeedPage {
        items,
        continuation: response_headers.continuation.clone(),
        headers: response_headers,
    })
}

/// Page-at-a-time access to a feed.
///
/// Each call to [`next_page`](Self::next_page) performs one round trip and
/// carries the continuation forward. The pager is exhausted after the page
/// without a continuation, or after the first error.
///
/// # Example
///
/// ```rust,ignore
/// let mut pager = client.pager::<serde_json::Value>(
///     FeedRequest::list(ResourceKind::Documents, "/dbs/D1/colls/C1"),
///     Some(100),
/// );
/// while let Some(page) = pager.next_page().await {
///     for item in page?.items {
///         println!("{item}");
///     }
/// }
/// ```
#[derive(Debug)]
pub struct FeedPager<'a, T> {
    client: &'a CosmosClient,
    request: FeedRequest,
    max_item_count: Option<u32>,
    continuation: Option<String>,
    finished: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: DeserializeOwned> FeedPager<'a, T> {
    /// Creates a pager starting at the first page.
    #[must_use]
    pub const fn new(
        client: &'a CosmosClient,
        request: FeedRequest,
        max_item_count: Option<u32>,
    ) -> Self {
        Self {
            client,
            request,
            max_item_count,
            continuation: None,
            finished: false,
            _marker: PhantomData,
        }
    }

    /// Creates a pager resuming from a cursor returned earlier.
    #[must_use]
    pub fn resume(
        client: &'a CosmosClient,
        request: FeedRequest,
        max_item_count: Option<u32>,
        continuation: impl Into<String>,
    ) -> Self {
        Self {
            continuation: Some(continuation.into()),
            ..Self::new(client, request, max_item_count)
        }
    }

    /// Returns the cursor the next call will send, if any.
    #[must_use]
    pub fn continuation(&self) -> Option<&str> {
        self.continuation.as_deref()
    }

    /// Returns `true` once no further pages will be fetched.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Fetches the next page, or returns `None` when the feed is exhausted.
    pub async fn next_page(&mut self) -> Option<Result<FeedPage<T>, CosmosError>> {
        if self.finished {
            return None;
        }

        let result = fetch_page(
            self.client,
            &self.request,
            self.max_item_count,
            self.continuation.as_deref(),
        )
        .await;

        match &result {
            Ok(page) => {
                self.continuation.clone_from(&page.continuation);
                self.finished = self.continuation.is_none();
            }
            Err(_) => self.finished = true,
        }

        Some(result)
    }

    /// Fetches the remaining pages into one response.
    ///
    /// # Errors
    ///
    /// Returns the first [`CosmosError`]; pages already collected are dropped.
    pub async fn collect_all(mut self) -> Result<FeedResponse<T>, CosmosError> {
        let mut response = FeedResponse::new();
        while let Some(page) = self.next_page().await {
            response.push_page(page?);
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Doc {
        id: String,
    }

    fn response(code: u16, body: serde_json::Value, continuation: Option<&str>) -> HttpResponse {
        let mut headers = HashMap::new();
        if let Some(token) = continuation {
            headers.insert("x-ms-continuation".to_string(), vec![token.to_string()]);
        }
        HttpResponse::new(code, headers, body)
    }

    #[test]
    fn test_decode_page_reads_envelope_in_order() {
        let body = json!({
            "_rid": "abc",
            "Documents": [{"id": "1"}, {"id": "2"}],
            "_count": 2
        });
        let page: FeedPage<Doc> =
            decode_page(ResourceKind::Documents, response(200, body, Some("next"))).unwrap();

        assert_eq!(
            page.items,
            vec![Doc { id: "1".to_string() }, Doc { id: "2".to_string() }]
        );
        assert_eq!(page.continuation.as_deref(), Some("next"));
    }

    #[test]
    fn test_decode_page_no_content_is_empty() {
        let page: FeedPage<Doc> = decode_page(
            ResourceKind::Documents,
            response(204, serde_json::Value::Null, None),
        )
        .unwrap();
        assert!(page.items.is_empty());
        assert!(page.continuation.is_none());
    }

    #[test]
    fn test_decode_page_missing_field_is_protocol_error() {
        let body = json!({"Databases": []});
        let result: Result<FeedPage<Doc>, _> =
            decode_page(ResourceKind::Documents, response(200, body, None));
        assert_eq!(
            result.unwrap_err(),
            ProtocolError::MissingEnvelopeField { field: "Documents" }
        );
    }

    #[test]
    fn test_decode_page_non_array_field_is_protocol_error() {
        let body = json!({"Offers": {"id": "x"}});
        let result: Result<FeedPage<serde_json::Value>, _> =
            decode_page(ResourceKind::Offers, response(200, body, None));
        assert!(matches!(
            result,
            Err(ProtocolError::MissingEnvelopeField { field: "Offers" })
        ));
    }

    #[test]
    fn test_decode_page_bad_item_is_invalid_payload() {
        let body = json!({"Documents": [{"name": "no id"}]});
        let result: Result<FeedPage<Doc>, _> =
            decode_page(ResourceKind::Documents, response(200, body, None));
        assert!(matches!(result, Err(ProtocolError::InvalidPayload { .. })));
    }

    #[test]
    fn test_feed_request_paths() {
        let request = FeedRequest::list(ResourceKind::Permissions, "/dbs/D1/users/U1");
        assert_eq!(request.path(), "/dbs/D1/users/U1/permissions");
        assert_eq!(request.kind(), ResourceKind::Permissions);
        assert!(request.sql().is_none());

        let request = FeedRequest::query(
            ResourceKind::Documents,
            "/dbs/D1/colls/C1",
            SqlQuery::new("SELECT * FROM c"),
        )
        .options(RequestOptions::new().enable_cross_partition());
        assert!(request.request_options().enable_cross_partition);
    }
}
