//! HTTP response types for the Cosmos DB client.
//!
//! This module provides the [`HttpResponse`] type and the [`ResponseHeaders`]
//! extracted from every response.

use std::collections::HashMap;

use crate::clients::headers::names;

/// Service metadata carried in response headers.
///
/// Every field is optional; the service only sends what applies to the
/// request. The continuation token drives pagination, the rest is passed
/// through to callers.
///
/// # Example
///
/// ```rust
/// use cosmos_rest::clients::ResponseHeaders;
/// use std::collections::HashMap;
///
/// let mut headers = HashMap::new();
/// headers.insert("x-ms-request-charge".to_string(), vec!["2.79".to_string()]);
/// headers.insert("x-ms-continuation".to_string(), vec!["+RID:abc".to_string()]);
///
/// let parsed = ResponseHeaders::from_map(&headers);
/// assert_eq!(parsed.continuation.as_deref(), Some("+RID:abc"));
/// assert_eq!(parsed.request_charge_value(), Some(2.79));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    /// Cursor for the next page (`x-ms-continuation`).
    pub continuation: Option<String>,
    /// Session token for session consistency (`x-ms-session-token`).
    pub session_token: Option<String>,
    /// Request units consumed (`x-ms-request-charge`).
    pub request_charge: Option<String>,
    /// Quota usage of the resource (`x-ms-resource-usage`).
    pub resource_usage: Option<String>,
    /// Entity tag of the returned resource (`etag`).
    pub etag: Option<String>,
    /// Server date (`date`).
    pub date: Option<String>,
    /// Activity id for support requests (`x-ms-activity-id`).
    pub activity_id: Option<String>,
}

impl ResponseHeaders {
    /// Extracts the known headers from a lower-cased header map.
    ///
    /// An empty continuation header is treated as absent.
    #[must_use]
    pub fn from_map(headers: &HashMap<String, Vec<String>>) -> Self {
        let first = |name: &str| {
            headers
                .get(name)
                .and_then(|values| values.first())
                .cloned()
        };

        Self {
            continuation: first(names::CONTINUATION).filter(|value| !value.is_empty()),
            session_token: first(names::SESSION_TOKEN),
            request_charge: first(names::REQUEST_CHARGE),
            resource_usage: first(names::RESOURCE_USAGE),
            etag: first(names::ETAG),
            date: first(names::DATE),
            activity_id: first(names::ACTIVITY_ID),
        }
    }

    /// Returns the request charge parsed as request units.
    #[must_use]
    pub fn request_charge_value(&self) -> Option<f64> {
        self.request_charge
            .as_deref()
            .and_then(|value| value.trim().parse().ok())
    }
}

/// An HTTP response from the service.
///
/// Contains the response status code, raw headers, parsed body, and the
/// [`ResponseHeaders`] metadata extracted on construction.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lower-cased name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body; `Null` when the body is empty.
    pub body: serde_json::Value,
    /// Service metadata extracted from `headers`.
    pub response_headers: ResponseHeaders,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, extracting [`ResponseHeaders`].
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let response_headers = ResponseHeaders::from_map(&headers);
        Self {
            code,
            headers,
            body,
            response_headers,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` for `204 No Content`.
    #[must_use]
    pub const fn is_no_content(&self) -> bool {
        self.code == 204
    }

    /// Returns the continuation token, if more pages remain.
    #[must_use]
    pub fn continuation(&self) -> Option<&str> {
        self.response_headers.continuation.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), vec![(*v).to_string()]))
            .collect()
    }

    #[test]
    fn test_response_headers_extracts_all_fields() {
        let map = headers(&[
            ("x-ms-continuation", "next-page"),
            ("x-ms-session-token", "0:12"),
            ("x-ms-request-charge", "3.5"),
            ("x-ms-resource-usage", "documentsCount=5"),
            ("etag", "\"0000-0001\""),
            ("date", "Tue, 01 Nov 1994 08:12:31 GMT"),
            ("x-ms-activity-id", "act-1"),
        ]);

        let parsed = ResponseHeaders::from_map(&map);
        assert_eq!(parsed.continuation.as_deref(), Some("next-page"));
        assert_eq!(parsed.session_token.as_deref(), Some("0:12"));
        assert_eq!(parsed.request_charge.as_deref(), Some("3.5"));
        assert_eq!(parsed.resource_usage.as_deref(), Some("documentsCount=5"));
        assert_eq!(parsed.etag.as_deref(), Some("\"0000-0001\""));
        assert_eq!(parsed.date.as_deref(), Some("Tue, 01 Nov 1994 08:12:31 GMT"));
        assert_eq!(parsed.activity_id.as_deref(), Some("act-1"));
    }

    #[test]
    fn test_empty_continuation_is_absent() {
        let parsed = ResponseHeaders::from_map(&headers(&[("x-ms-continuation", "")]));
        assert!(parsed.continuation.is_none());
    }

    #[test]
    fn test_request_charge_value_ignores_garbage() {
        let parsed = ResponseHeaders::from_map(&headers(&[("x-ms-request-charge", "n/a")]));
        assert!(parsed.request_charge_value().is_none());
    }

    #[test]
    fn test_http_response_status_helpers() {
        let response = HttpResponse::new(204, HashMap::new(), serde_json::Value::Null);
        assert!(response.is_ok());
        assert!(response.is_no_content());
        assert!(response.continuation().is_none());

        let response = HttpResponse::new(404, HashMap::new(), json!({"message": "not found"}));
        assert!(!response.is_ok());
    }
}
