//! Cosmos DB client implementation.
//!
//! This module provides the [`CosmosClient`] type. Every operation follows
//! the same steps: build and sign the headers for the path, send the request
//! through [`HttpClient`], and map the response.

use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::auth::format_http_date;
use crate::clients::cosmos::{CosmosError, SqlQuery};
use crate::clients::{
    DataType, HeaderBuilder, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse,
    RequestOptions, ResponseHeaders,
};
use crate::config::CosmosConfig;
use crate::feed::{self, FeedPager, FeedRequest, FeedResponse, ProtocolError, ResourceKind};

/// A single resource returned by a point operation, with its metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct CosmosResponse<T> {
    /// The decoded resource.
    pub item: T,
    /// Metadata of the response.
    pub headers: ResponseHeaders,
}

impl<T> CosmosResponse<T> {
    /// Consumes the response and returns the resource.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.item
    }
}

/// Client for the Cosmos DB SQL REST API.
///
/// # Thread Safety
///
/// `CosmosClient` is `Send + Sync`, making it safe to share across async
/// tasks. Each operation carries its own state; nothing is cached between
/// calls.
///
/// # Example
///
/// ```rust,ignore
/// use cosmos_rest::{AccountEndpoint, AuthToken, CosmosClient, CosmosConfig};
/// use cosmos_rest::clients::RequestOptions;
///
/// let config = CosmosConfig::builder()
///     .endpoint(AccountEndpoint::new("https://myaccount.documents.azure.com:443/")?)
///     .auth_token(AuthToken::new(std::env::var("COSMOS_KEY")?)?)
///     .build()?;
/// let client = CosmosClient::new(config);
///
/// let databases = client.list_databases(&RequestOptions::default()).await?;
/// println!("{} databases", databases.len());
/// ```
#[derive(Debug)]
pub struct CosmosClient {
    config: CosmosConfig,
    http_client: HttpClient,
}

// Verify CosmosClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CosmosClient>();
};

impl CosmosClient {
    /// Creates a new client for the configured account.
    #[must_use]
    pub fn new(config: CosmosConfig) -> Self {
        let http_client = HttpClient::new(&config);
        Self {
            config,
            http_client,
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &CosmosConfig {
        &self.config
    }

    /// Builds the signed header set for a request dated now, with `options`
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::Auth`] if signing fails and
    /// [`CosmosError::Validation`] if an option is out of range.
    pub fn headers(
        &self,
        method: HttpMethod,
        path: &str,
        options: &RequestOptions,
    ) -> Result<HeaderBuilder, CosmosError> {
        let date = format_http_date(Utc::now());
        let headers = HeaderBuilder::new(&self.config, method, path, &date)?;
        Ok(headers.apply(options)?)
    }

    /// Sends a request with a prepared header set.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::Http`] for transport failures and non-success
    /// statuses.
    pub async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<(serde_json::Value, DataType)>,
        headers: HeaderBuilder,
    ) -> Result<HttpResponse, CosmosError> {
        let mut builder = HttpRequest::builder(method, path).extra_headers(headers.build());
        if let Some((body, body_type)) = body {
            builder = builder.body(body).body_type(body_type);
        }
        let request = builder.build().map_err(HttpError::from)?;

        Ok(self.http_client.request(request).await?)
    }

    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
        options: &RequestOptions,
    ) -> Result<HttpResponse, CosmosError> {
        let headers = self.headers(method, path, options)?;
        let body = body.map(|body| (body, DataType::Json));
        self.dispatch(method, path, body, headers).await
    }

    fn decode<T: DeserializeOwned>(
        response: HttpResponse,
    ) -> Result<CosmosResponse<T>, CosmosError> {
        let item = serde_json::from_value(response.body).map_err(ProtocolError::from)?;
        Ok(CosmosResponse {
            item,
            headers: response.response_headers,
        })
    }

    /// Reads the resource at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails or the body does not
    /// decode into `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<CosmosResponse<T>, CosmosError> {
        let response = self.send(HttpMethod::Get, path, None, options).await?;
        Self::decode(response)
    }

    /// Posts a JSON body to `path` (create, upsert, or execute).
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails or the body does not
    /// decode into `T`.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
        options: &RequestOptions,
    ) -> Result<CosmosResponse<T>, CosmosError> {
        let response = self.send(HttpMethod::Post, path, Some(body), options).await?;
        Self::decode(response)
    }

    /// Replaces the resource at `path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails or the body does not
    /// decode into `T`.
    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
        options: &RequestOptions,
    ) -> Result<CosmosResponse<T>, CosmosError> {
        let response = self.send(HttpMethod::Put, path, Some(body), options).await?;
        Self::decode(response)
    }

    /// Deletes the resource at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError`] if the request fails.
    pub async fn delete(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<ResponseHeaders, CosmosError> {
        let response = self.send(HttpMethod::Delete, path, None, options).await?;
        Ok(response.response_headers)
    }

    /// Lists every resource of `kind` under `parent`, draining all pages.
    ///
    /// # Errors
    ///
    /// Returns the first [`CosmosError`] of any page.
    pub async fn list<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        parent: &str,
        options: &RequestOptions,
    ) -> Result<FeedResponse<T>, CosmosError> {
        let request = FeedRequest::list(kind, parent).options(options.clone());
        feed::stream(self, &request, None).await
    }

    /// Runs a SQL query over resources of `kind` under `parent`, draining
    /// all pages.
    ///
    /// # Errors
    ///
    /// Returns the first [`CosmosError`] of any page.
    pub async fn query<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        parent: &str,
        query: impl Into<SqlQuery>,
        options: &RequestOptions,
    ) -> Result<FeedResponse<T>, CosmosError> {
        let request = FeedRequest::query(kind, parent, query.into()).options(options.clone());
        feed::stream(self, &request, None).await
    }

    /// Returns a pager for page-at-a-time access to a feed.
    #[must_use]
    pub const fn pager<T: DeserializeOwned>(
        &self,
        request: FeedRequest,
        max_item_count: Option<u32>,
    ) -> FeedPager<'_, T> {
        FeedPager::new(self, request, max_item_count)
    }
}
