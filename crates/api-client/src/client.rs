//! Main API client implementation

use crate::config::ClientConfig;
use crate::content::ContentKind;
use crate::endpoints::{AuthApi, ImagesApi, ProductsApi};
use crate::error::{error_message, ApiError, ApiResult};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, RwLock};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Snaplook API client
///
/// This client wraps `reqwest` and adds:
/// - Bearer-token auth applied from a per-instance slot
/// - One-shot response classification and typed decoding
/// - A single error shape for every failure path
/// - Request correlation IDs for tracing
///
/// The handle is cheap to clone; clones share the connection pool,
/// configuration, and auth token slot.
#[derive(Clone)]
pub struct SnaplookClient {
    inner: Client,
    config: Arc<ClientConfig>,
    auth_token: Arc<RwLock<Option<String>>>,
}

impl SnaplookClient {
    /// Create a new client with configuration from the environment
    pub fn new() -> ApiResult<Self> {
        Self::with_config(ClientConfig::from_env())
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static("snaplook-api-client/0.1"),
        );

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| ApiError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner,
            config: Arc::new(config),
            auth_token: Arc::new(RwLock::new(None)),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    // -------------------------------------------------------------------------
    // Auth token slot
    // -------------------------------------------------------------------------

    /// Set the bearer token attached to subsequent requests
    ///
    /// Requests already in flight keep whatever token they were built with.
    /// The client never calls this itself; applying a token returned by
    /// login is the caller's decision.
    pub fn set_auth_token(&self, token: impl Into<String>) {
        // Handle poisoned lock by recovering the data (still valid even after panic)
        let mut slot = self.auth_token.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(token.into());
    }

    /// Remove the bearer token
    ///
    /// Subsequent requests carry no `Authorization` header at all.
    pub fn clear_auth_token(&self) {
        let mut slot = self.auth_token.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    /// Snapshot of the currently set bearer token
    #[must_use]
    pub fn auth_token(&self) -> Option<String> {
        self.auth_token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access authentication endpoints
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// Access image endpoints
    #[must_use]
    pub fn images(&self) -> ImagesApi {
        ImagesApi::new(self.clone())
    }

    /// Access product endpoints
    #[must_use]
    pub fn products(&self) -> ProductsApi {
        ProductsApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods
    // -------------------------------------------------------------------------

    /// Perform a GET request decoding a JSON response
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let request = self.request_builder(Method::GET, path);
        self.execute(request).await
    }

    /// Perform a POST request with a JSON body
    #[instrument(skip(self, body))]
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let request = self.request_builder(Method::POST, path).json(body);
        self.execute(request).await
    }

    /// Perform a POST request with no body
    #[instrument(skip(self))]
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let request = self.request_builder(Method::POST, path);
        self.execute(request).await
    }

    /// Perform a POST request with a URL-encoded form body
    ///
    /// The form serializer replaces the client's JSON `Content-Type`
    /// default for this request.
    #[instrument(skip(self, form))]
    pub async fn post_form<T: DeserializeOwned, F: Serialize + ?Sized>(
        &self,
        path: &str,
        form: &F,
    ) -> ApiResult<T> {
        let request = self.request_builder(Method::POST, path).form(form);
        self.execute(request).await
    }

    /// Perform a POST request with a multipart body
    ///
    /// The transport layer sets the boundary `Content-Type` itself,
    /// overriding the JSON default.
    #[instrument(skip(self, form))]
    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> ApiResult<T> {
        let request = self.request_builder(Method::POST, path).multipart(form);
        self.execute(request).await
    }

    /// Perform a GET request returning the raw body as text
    ///
    /// Non-JSON success bodies pass through undecoded; error statuses still
    /// map to [`ApiError::Api`] like every other call.
    #[instrument(skip(self))]
    pub async fn get_text(&self, path: &str) -> ApiResult<String> {
        let response = self.request_builder(Method::GET, path).send().await?;
        let status = response.status();
        let kind = ContentKind::from_headers(response.headers());
        let bytes = response.bytes().await?;

        if status.is_success() {
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        } else {
            warn!(status = status.as_u16(), "API returned error status");
            Err(ApiError::api_response(
                status.as_u16(),
                error_message(kind, &bytes),
            ))
        }
    }

    /// Build a request builder for custom requests
    ///
    /// The returned builder already carries the joined URL, the correlation
    /// ID header, and the bearer token snapshot taken at this moment.
    pub fn request_builder(&self, method: Method, path: &str) -> RequestBuilder {
        let url = join_url(&self.config.base_url, path);
        let request_id = Uuid::new_v4().to_string();

        debug!(
            request_id = %request_id,
            method = %method,
            url = %url,
            "Dispatching request"
        );

        let mut request = self
            .inner
            .request(method, &url)
            .header(X_REQUEST_ID, &request_id);

        if let Some(token) = self.auth_token() {
            request = request.bearer_auth(token);
        }

        request
    }

    /// Execute a raw request and return the response untouched
    pub async fn execute_raw(&self, request: RequestBuilder) -> ApiResult<Response> {
        Ok(request.send().await?)
    }

    /// Execute a prepared request and decode the JSON response
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Handle an HTTP response: classify, check status, decode
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> ApiResult<T> {
        let status = response.status();
        let kind = ContentKind::from_headers(response.headers());
        let bytes = response.bytes().await?;

        if status.is_success() {
            if !kind.is_json() {
                debug!(
                    status = status.as_u16(),
                    ?kind,
                    "non-JSON body on a typed request"
                );
            }
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            warn!(status = status.as_u16(), "API returned error status");
            Err(ApiError::api_response(
                status.as_u16(),
                error_message(kind, &bytes),
            ))
        }
    }
}

/// Join the base URL and an endpoint path with a single separator
fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::AUTHORIZATION;

    fn test_client() -> SnaplookClient {
        SnaplookClient::with_config(ClientConfig::default()).unwrap()
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:8000/api", "auth/me"),
            "http://localhost:8000/api/auth/me"
        );
        assert_eq!(
            join_url("http://localhost:8000/api/", "/auth/me"),
            "http://localhost:8000/api/auth/me"
        );
    }

    #[test]
    fn test_client_creation() {
        let client = SnaplookClient::with_config(ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_auth_token_slot() {
        let client = test_client();
        assert_eq!(client.auth_token(), None);

        client.set_auth_token("abc123");
        assert_eq!(client.auth_token(), Some("abc123".to_string()));

        client.clear_auth_token();
        assert_eq!(client.auth_token(), None);
    }

    #[test]
    fn test_token_shared_across_clones() {
        let client = test_client();
        let clone = client.clone();

        client.set_auth_token("shared");
        assert_eq!(clone.auth_token(), Some("shared".to_string()));
    }

    #[test]
    fn test_request_carries_bearer_token() {
        let client = test_client();
        client.set_auth_token("X");

        let request = client
            .request_builder(Method::GET, "auth/me")
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "http://localhost:8000/api/auth/me"
        );
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            &HeaderValue::from_static("Bearer X")
        );
        assert!(request.headers().contains_key(X_REQUEST_ID));
    }

    #[test]
    fn test_form_body_replaces_json_content_type() {
        let client = test_client();

        let request = client
            .request_builder(Method::POST, "auth/login")
            .form(&[("username", "user@example.com"), ("password", "hunter2")])
            .build()
            .unwrap();

        assert_eq!(
            request.headers().get(CONTENT_TYPE).unwrap(),
            &HeaderValue::from_static("application/x-www-form-urlencoded")
        );
    }

    #[test]
    fn test_multipart_body_sets_boundary_content_type() {
        let client = test_client();
        let form = Form::new().text("file", "bytes");

        let request = client
            .request_builder(Method::POST, "images/upload")
            .multipart(form)
            .build()
            .unwrap();

        let content_type = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
    }

    #[test]
    fn test_cleared_token_omits_header() {
        let client = test_client();
        client.set_auth_token("X");
        client.clear_auth_token();

        let request = client
            .request_builder(Method::GET, "products/history")
            .build()
            .unwrap();

        assert!(!request.headers().contains_key(AUTHORIZATION));
    }
}
