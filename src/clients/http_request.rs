//! HTTP request types for the Cosmos DB client.
//!
//! An [`HttpRequest`] is the unsigned shape of one REST call: verb, resource
//! path, optional JSON body and the header set produced by
//! [`HeaderBuilder`](crate::clients::HeaderBuilder). Reads and listings are
//! GET without a body, creates and queries are POST, replaces are PUT, and
//! deletes are DELETE without a body.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the Cosmos DB REST API.
///
/// `Display` renders the lower-case verb, which is also the form covered
/// by the request signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for reading resources and feeds.
    Get,
    /// HTTP POST method for creating resources and running queries.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Content type for HTTP request bodies.
///
/// Resource bodies are plain JSON. A SQL query is posted as
/// `{"query": ..., "parameters": [...]}` with the dedicated query content
/// type, which the service requires before it runs the query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    /// JSON content type (`application/json`).
    Json,
    /// SQL query content type (`application/query+json`).
    Query,
}

impl DataType {
    /// Returns the MIME type string for this data type.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Query => "application/query+json",
        }
    }
}

/// An HTTP request to be sent to the service.
///
/// `path` is the resource path relative to the account endpoint, e.g.
/// `/dbs/MyDb/colls/Items/docs`. `extra_headers` carries the signed header
/// set produced by [`HeaderBuilder`](crate::clients::HeaderBuilder).
///
/// # Example
///
/// ```rust
/// use cosmos_rest::clients::{DataType, HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Post, "/dbs/MyDb/colls/Items/docs")
///     .body(json!({"id": "1"}))
///     .body_type(DataType::Json)
///     .build()
///     .unwrap();
/// assert_eq!(request.path, "/dbs/MyDb/colls/Items/docs");
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The resource path for this request.
    pub path: String,
    /// The request body, if any.
    pub body: Option<serde_json::Value>,
    /// The content type of the body.
    pub body_type: Option<DataType>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Checks the request before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `body` is `Some` but `body_type` is `None`
    /// - `http_method` is `Post` or `Put` but `body` is `None`; creates,
    ///   replaces, queries and stored procedure calls all carry a body
    /// - `body_type` is [`DataType::Query`] on any verb other than `Post`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.body.is_some() && self.body_type.is_none() {
            return Err(InvalidHttpRequestError::MissingBodyType);
        }

        if self.body_type == Some(DataType::Query) && self.http_method != HttpMethod::Post {
            return Err(InvalidHttpRequestError::QueryRequiresPost {
                method: self.http_method.to_string(),
            });
        }

        if matches!(self.http_method, HttpMethod::Post | HttpMethod::Put) && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for [`HttpRequest`].
///
/// The signed headers are attached in one go with
/// [`extra_headers`](Self::extra_headers); [`header`](Self::header) adds a
/// single one on top.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
    body_type: Option<DataType>,
    extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            body_type: None,
            extra_headers: None,
        }
    }

    /// Sets the JSON body: a resource definition, a SQL query, or the
    /// argument array of a stored procedure.
    ///
    /// A body needs a matching [`body_type`](Self::body_type).
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the content type of the body; [`DataType::Query`] only with POST.
    #[must_use]
    pub const fn body_type(mut self, body_type: DataType) -> Self {
        self.body_type = Some(body_type);
        self
    }

    /// Sets all extra headers at once.
    #[must_use]
    pub fn extra_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.extra_headers = Some(headers);
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            body_type: self.body_type,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}
