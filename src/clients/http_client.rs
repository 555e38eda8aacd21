//! HTTP client for Cosmos DB communication.
//!
//! This module provides the [`HttpClient`] type, the transport that sends an
//! already signed [`HttpRequest`] and turns the reply into an
//! [`HttpResponse`] or an [`HttpError`].

use std::collections::HashMap;

use crate::clients::errors::{ApiError, HttpError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::CosmosConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP transport for the Cosmos DB REST API.
///
/// The client handles:
/// - Base URL construction from the account endpoint
/// - Default headers (User-Agent)
/// - Body parsing and mapping of non-2xx responses to [`ApiError`]
///
/// It never retries; the first failure is returned to the caller.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
/// The underlying `reqwest::Client` pools connections across requests.
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL (e.g., `https://acct.documents.azure.com:443`).
    base_url: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the configured account.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use cosmos_rest::{AccountEndpoint, AuthToken, CosmosConfig};
    /// use cosmos_rest::clients::HttpClient;
    ///
    /// let config = CosmosConfig::builder()
    ///     .endpoint(AccountEndpoint::new("https://acct.documents.azure.com:443/").unwrap())
    ///     .auth_token(AuthToken::new("a2V5").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HttpClient::new(&config);
    /// assert_eq!(client.base_url(), "https://acct.documents.azure.com:443");
    /// ```
    #[must_use]
    pub fn new(config: &CosmosConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}cosmos-rest v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.endpoint().base_url().to_string(),
            default_headers,
        }
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request to the service.
    ///
    /// A `204 No Content` or empty body yields a `Null` body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error or timeout occurs (`Network`)
    /// - Non-2xx response received (`Api`)
    /// - A 2xx body is not JSON (`MalformedBody`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!("{}{}", self.base_url, Self::normalize_path(&request.path));

        let mut headers = self.default_headers.clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };
        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!(method = %request.http_method, path = %request.path, "Sending request");

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        if (200..=299).contains(&code) {
            let body = if body_text.trim().is_empty() {
                serde_json::Value::Null
            } else {
                serde_json::from_str(&body_text).map_err(|e| HttpError::MalformedBody {
                    code,
                    reason: e.to_string(),
                })?
            };
            return Ok(HttpResponse::new(code, res_headers, body));
        }

        let response = HttpResponse::new(code, res_headers, serde_json::Value::Null);
        Err(HttpError::Api(Self::api_error(&response, &body_text)))
    }

    /// Ensures the path joins onto the base URL with exactly one slash.
    fn normalize_path(path: &str) -> String {
        format!("/{}", path.trim_start_matches('/'))
    }

    /// Parses response headers into a `HashMap` keyed by lower-cased name.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Builds an [`ApiError`] from an error response.
    ///
    /// The service reports `{"code": "...", "message": "..."}`; other bodies
    /// are passed through as text.
    fn api_error(response: &HttpResponse, body_text: &str) -> ApiError {
        let activity_id = response.response_headers.activity_id.clone();

        match serde_json::from_str::<serde_json::Value>(body_text) {
            Ok(body) => {
                let message = body
                    .get("message")
                    .and_then(serde_json::Value::as_str)
                    .map_or_else(|| body.to_string(), ToString::to_string);
                let error_code = body
                    .get("code")
                    .and_then(serde_json::Value::as_str)
                    .map(ToString::to_string);
                ApiError {
                    code: response.code,
                    error_code,
                    message,
                    activity_id,
                }
            }
            Err(_) => {
                if !body_text.is_empty() {
                    tracing::warn!(
                        code = response.code,
                        "Error response body is not JSON; passing it through as text"
                    );
                }
                ApiError {
                    code: response.code,
                    error_code: None,
                    message: body_text.to_string(),
                    activity_id,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccountEndpoint, AuthToken};
    use serde_json::json;

    fn config(prefix: Option<&str>) -> CosmosConfig {
        let mut builder = CosmosConfig::builder()
            .endpoint(AccountEndpoint::new("https://acct.documents.azure.com:443/").unwrap())
            .auth_token(AuthToken::new("a2V5").unwrap());
        if let Some(prefix) = prefix {
            builder = builder.user_agent_prefix(prefix);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_client_base_url_drops_trailing_slash() {
        let client = HttpClient::new(&config(None));
        assert_eq!(client.base_url(), "https://acct.documents.azure.com:443");
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&config(None));
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("cosmos-rest v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let client = HttpClient::new(&config(Some("MyApp/1.0")));
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(HttpClient::normalize_path("/dbs"), "/dbs");
        assert_eq!(HttpClient::normalize_path("dbs/D1"), "/dbs/D1");
    }

    #[test]
    fn test_api_error_uses_service_message() {
        let mut headers = HashMap::new();
        headers.insert("x-ms-activity-id".to_string(), vec!["act-9".to_string()]);
        let response = HttpResponse::new(404, headers, serde_json::Value::Null);

        let body = json!({"code": "NotFound", "message": "not found"}).to_string();
        let error = HttpClient::api_error(&response, &body);

        assert_eq!(error.code, 404);
        assert_eq!(error.message, "not found");
        assert_eq!(error.error_code.as_deref(), Some("NotFound"));
        assert_eq!(error.activity_id.as_deref(), Some("act-9"));
    }

    #[test]
    fn test_api_error_passes_text_bodies_through() {
        let response = HttpResponse::new(503, HashMap::new(), serde_json::Value::Null);
        let error = HttpClient::api_error(&response, "Service Unavailable");

        assert_eq!(error.code, 503);
        assert_eq!(error.message, "Service Unavailable");
        assert!(error.error_code.is_none());
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
