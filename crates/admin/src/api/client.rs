//! HTTP plumbing shared by every resource: auth headers, envelope unwrapping,
//! status-code mapping.

use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::instrument;
use url::Url;

use rentdesk_core::Pagination;

use super::ApiError;
use super::types::{Envelope, Page};
use crate::config::ApiConfig;

/// Backend admin API client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

/// Pagination query parameters.
///
/// The backend accepts either `limit` or `per_page`, so both are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageParams {
    page: u32,
    limit: u32,
    per_page: u32,
}

impl PageParams {
    /// Request page `page` (1-indexed) of `per_page` rows.
    #[must_use]
    pub const fn new(page: u32, per_page: u32) -> Self {
        let page = if page == 0 { 1 } else { page };
        Self {
            page,
            limit: per_page,
            per_page,
        }
    }

    /// Requested page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Requested page size.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }
}

/// Outcome of a mutation.
///
/// Mutations are followed by a re-fetch, so only the backend's message is kept.
#[derive(Debug, Clone, Default)]
pub struct Ack {
    /// Human readable message from the envelope, if any.
    pub message: Option<String>,
}

/// Error body shapes the backend uses on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<serde_json::Value>,
}

impl ErrorBody {
    /// `message` followed by the first message of every field error.
    fn describe(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(message) = self.message.as_deref().filter(|m| !m.is_empty()) {
            parts.push(message.to_string());
        }
        if let Some(serde_json::Value::Object(fields)) = &self.errors {
            for value in fields.values() {
                let first = match value {
                    serde_json::Value::Array(items) => items.first().and_then(|v| v.as_str()),
                    serde_json::Value::String(s) => Some(s.as_str()),
                    _ => None,
                };
                if let Some(text) = first
                    && !parts.iter().any(|p| p == text)
                {
                    parts.push(text.to_string());
                }
            }
        }
        parts.join(" ")
    }
}

/// `skip_serializing_if` predicate for optional text filters.
///
/// Blank search boxes must not reach the backend as `q=`.
pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

impl ApiClient {
    /// Create a new backend API client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the token is not a valid header value, or
    /// `ApiError::Http` if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();

        let mut auth_value =
            HeaderValue::from_str(&format!("Bearer {}", config.token.expose_secret()))
                .map_err(|e| ApiError::Config(format!("Invalid API token format: {e}")))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .user_agent(concat!("rentdesk-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve an API path such as `admin/bookings/4` against the base URL.
    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path.trim_start_matches('/'))?)
    }

    // =========================================================================
    // Verbs
    // =========================================================================

    /// GET a single record.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path)?;
        let response = self.inner.client.get(url).send().await?;
        Self::handle_response::<T>(response)
            .await?
            .data
            .ok_or(ApiError::MissingData)
    }

    /// GET a single record, mapping 404 to `None`.
    pub(crate) async fn find<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, ApiError> {
        match self.get(path).await {
            Ok(record) => Ok(Some(record)),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// GET a collection with pagination and filter parameters.
    pub(crate) async fn list<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        page: PageParams,
        filter: &Q,
    ) -> Result<Page<T>, ApiError> {
        let url = self.url(path)?;
        let response = self
            .inner
            .client
            .get(url)
            .query(&page)
            .query(filter)
            .send()
            .await?;
        let envelope = Self::handle_response::<Vec<T>>(response).await?;
        Ok(Page::from_envelope(envelope, page))
    }

    /// GET a complete, unpaginated collection.
    pub(crate) async fn list_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let url = self.url(path)?;
        let response = self.inner.client.get(url).send().await?;
        Ok(Self::handle_response::<Vec<T>>(response)
            .await?
            .data
            .unwrap_or_default())
    }

    /// POST a JSON body.
    pub(crate) async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Ack, ApiError> {
        let url = self.url(path)?;
        let response = self.inner.client.post(url).json(body).send().await?;
        Self::ack(response).await
    }

    /// PUT a JSON body (full or partial update).
    pub(crate) async fn put<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Ack, ApiError> {
        let url = self.url(path)?;
        let response = self.inner.client.put(url).json(body).send().await?;
        Self::ack(response).await
    }

    /// DELETE a record.
    pub(crate) async fn delete(&self, path: &str) -> Result<Ack, ApiError> {
        let url = self.url(path)?;
        let response = self.inner.client.delete(url).send().await?;
        Self::ack(response).await
    }

    /// Check that the backend answers and accepts the token.
    ///
    /// # Errors
    ///
    /// Returns the mapped `ApiError` if the settings collection cannot be read.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<(), ApiError> {
        let url = self.url("admin/settings")?;
        let response = self
            .inner
            .client
            .get(url)
            .query(&PageParams::new(1, 1))
            .send()
            .await?;
        Self::handle_response::<serde_json::Value>(response).await?;
        Ok(())
    }

    // =========================================================================
    // Response Handling
    // =========================================================================

    async fn ack(response: reqwest::Response) -> Result<Ack, ApiError> {
        if !response.status().is_success() {
            return Err(Self::parse_error(response).await);
        }
        // 204s and some 200s carry no envelope at all.
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Ack::default());
        }
        let envelope = Self::parse_envelope::<serde_json::Value>(&body)?;
        Ok(Ack {
            message: envelope.message,
        })
    }

    /// Map status codes, parse the envelope and check its `success` flag.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Envelope<T>, ApiError> {
        if !response.status().is_success() {
            return Err(Self::parse_error(response).await);
        }
        let body = response.text().await?;
        Self::parse_envelope(&body)
    }

    fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<Envelope<T>, ApiError> {
        let envelope: Envelope<T> = serde_json::from_str(body)
            .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")))?;

        if !envelope.success {
            return Err(ApiError::Unsuccessful(
                envelope.message.unwrap_or_default(),
            ));
        }

        Ok(envelope)
    }

    /// Map a non-2xx response to an `ApiError`.
    async fn parse_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let path = response.url().path().to_string();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return ApiError::RateLimited(retry_after);
        }

        if status == 401 || status == 403 {
            return ApiError::Unauthorized;
        }

        if status == 404 {
            return ApiError::NotFound(path);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.describe())
            .unwrap_or_default();

        if status == 422 {
            return ApiError::Validation(message);
        }

        ApiError::Api { status, message }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl<T> Page<T> {
    fn from_envelope(envelope: Envelope<Vec<T>>, requested: PageParams) -> Self {
        let meta = envelope.meta.unwrap_or_default();
        let items = envelope.data.unwrap_or_default();
        let per_page = meta.per_page.unwrap_or(requested.per_page);
        let page = meta.current_page.unwrap_or(requested.page);
        // Without a total the rows we hold are all there is.
        let total = meta.total.unwrap_or(items.len() as u64);
        Self {
            items,
            pagination: Pagination::new(page, per_page, total).with_last_page(meta.last_page),
            info: envelope.info.unwrap_or_default(),
        }
    }
}
