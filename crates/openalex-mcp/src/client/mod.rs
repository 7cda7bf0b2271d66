//! OpenAlex API client.
//!
//! Provides an async HTTP client with:
//! - Connection pooling via reqwest
//! - Retry with capped exponential backoff and observable attempt counts
//! - Identifier-safety normalization for every point lookup
//! - Bounded FIFO response cache with TTL expiry (optional per client)
//! - Polite-pool identity (`mailto`) or premium API key on every request

mod filters;
mod ids;

pub use filters::{FilterSet, normalize_sort, publication_year_filter};
pub use ids::normalize_entity_id;

use std::time::Duration;

use reqwest::Client;

use crate::cache::ResponseCache;
use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{Author, AutocompleteMatch, EntityType, ListResponse, Work};

/// Parameters for a list query against any entity collection.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Full-text search query.
    pub search: Option<String>,

    /// Filter expressions.
    pub filters: FilterSet,

    /// Sort field; bare names are normalized to `:desc` before transmission.
    pub sort: Option<String>,

    /// Page number (1-based).
    pub page: Option<i32>,

    /// Page size.
    pub per_page: Option<i32>,

    /// Field projection.
    pub select: Option<Vec<String>>,

    /// Group-by field; mutually exclusive with paginated results upstream.
    pub group_by: Option<String>,

    /// Random-sample count.
    pub sample: Option<i32>,
}

impl SearchOptions {
    /// Serialize into query parameters, applying sort normalization.
    fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(ref search) = self.search {
            params.push(("search".to_string(), search.clone()));
        }

        if let Some(filter) = self.filters.to_query() {
            params.push(("filter".to_string(), filter));
        }

        if let Some(ref sort) = self.sort {
            params.push(("sort".to_string(), normalize_sort(sort).into_owned()));
        }

        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }

        if let Some(per_page) = self.per_page {
            params.push(("per_page".to_string(), per_page.to_string()));
        }

        if let Some(ref select) = self.select {
            if !select.is_empty() {
                params.push(("select".to_string(), select.join(",")));
            }
        }

        if let Some(ref group_by) = self.group_by {
            params.push(("group_by".to_string(), group_by.clone()));
        }

        if let Some(sample) = self.sample {
            params.push(("sample".to_string(), sample.to_string()));
        }

        params
    }
}

/// Capped exponential backoff schedule.
#[derive(Debug, Clone)]
struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
    backoff_factor: f64,
    max_delay: Duration,
}

impl RetryPolicy {
    /// Delay to sleep before the given attempt (1-based; attempt 1 never waits).
    fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }

        let exponent = attempt.saturating_sub(2);
        let delay =
            self.initial_delay.as_secs_f64() * self.backoff_factor.powi(exponent as i32);
        Duration::from_secs_f64(delay.min(self.max_delay.as_secs_f64()))
    }
}

/// OpenAlex API client.
pub struct OpenAlexClient {
    /// HTTP client with pooling.
    http: Client,

    /// Response cache.
    cache: ResponseCache,

    /// Whether the cache is consulted at all.
    enable_cache: bool,

    /// Premium API key (takes precedence over mailto).
    api_key: Option<String>,

    /// Polite-pool contact email.
    mailto: Option<String>,

    /// API base URL.
    base_url: String,

    /// Polite delay before each network request.
    rate_limit_delay: Duration,

    /// Backoff schedule.
    retry: RetryPolicy,
}

impl OpenAlexClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        // Reject a malformed base URL at startup rather than on first request.
        let base_url = url::Url::parse(&config.base_url)
            .map_err(|e| anyhow::anyhow!("invalid base URL '{}': {e}", config.base_url))?;
        let base_url = base_url.as_str().trim_end_matches('/').to_string();

        let http = Client::builder()
            .user_agent(config.user_agent())
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        Ok(Self {
            http,
            cache: ResponseCache::new(config.cache_max_size, config.cache_ttl),
            enable_cache: config.enable_cache,
            api_key: config.api_key,
            mailto: config.mailto,
            base_url,
            rate_limit_delay: config.rate_limit_delay,
            retry: RetryPolicy {
                max_attempts: config.max_retries.max(1),
                initial_delay: config.initial_retry_delay,
                backoff_factor: config.backoff_factor,
                max_delay: config.max_retry_delay,
            },
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Drop every cached response.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of cached responses.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// List works matching the given options.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn list_works(&self, options: &SearchOptions) -> ClientResult<ListResponse<Work>> {
        let value = self.get_json("/works", &options.to_query_params()).await?;
        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// Get a single work by identifier (OpenAlex ID, DOI, or URL).
    ///
    /// # Errors
    ///
    /// Returns error on API failure or unusable identifier.
    pub async fn get_work(&self, work_id: &str) -> ClientResult<Work> {
        let id = normalize_entity_id(work_id)?;
        let value = self.get_json(&format!("/works/{id}"), &[]).await?;
        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// List authors matching the given options.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn list_authors(
        &self,
        options: &SearchOptions,
    ) -> ClientResult<ListResponse<Author>> {
        let value = self.get_json("/authors", &options.to_query_params()).await?;
        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// Get a single author by identifier.
    ///
    /// # Errors
    ///
    /// Returns error on API failure or unusable identifier.
    pub async fn get_author(&self, author_id: &str) -> ClientResult<Author> {
        let id = normalize_entity_id(author_id)?;
        let value = self.get_json(&format!("/authors/{id}"), &[]).await?;
        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// List any entity collection, returning untyped records.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn list_entities(
        &self,
        entity_type: EntityType,
        options: &SearchOptions,
    ) -> ClientResult<ListResponse<serde_json::Value>> {
        let value = self.get_json(&entity_type.path(), &options.to_query_params()).await?;
        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// Get a single entity of any type by identifier, returning the raw record.
    ///
    /// # Errors
    ///
    /// Returns error on API failure or unusable identifier.
    pub async fn get_entity(
        &self,
        entity_type: EntityType,
        entity_id: &str,
    ) -> ClientResult<serde_json::Value> {
        let id = normalize_entity_id(entity_id)?;
        self.get_json(&format!("{}/{id}", entity_type.path()), &[]).await
    }

    /// Autocomplete a partial query against an entity collection.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn autocomplete(
        &self,
        entity_type: EntityType,
        query: &str,
    ) -> ClientResult<Vec<AutocompleteMatch>> {
        let path = format!("/autocomplete/{entity_type}");
        let params = vec![("q".to_string(), query.to_string())];

        #[derive(serde::Deserialize)]
        struct AutocompleteResponse {
            #[serde(default)]
            results: Vec<AutocompleteMatch>,
        }

        let value = self.get_json(&path, &params).await?;
        let response: AutocompleteResponse =
            serde_json::from_value(value).map_err(ClientError::from)?;
        Ok(response.results)
    }

    /// Find works similar to the given text via the similarity endpoint.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn find_similar_works(
        &self,
        text: &str,
        per_page: Option<i32>,
    ) -> ClientResult<ListResponse<Work>> {
        let mut params = vec![("text".to_string(), text.to_string())];
        if let Some(per_page) = per_page {
            params.push(("per_page".to_string(), per_page.to_string()));
        }

        let value = self.get_json("/find/works", &params).await?;
        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// Make a GET request with caching, identity, and retry.
    async fn get_json(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> ClientResult<serde_json::Value> {
        let url = format!("{}{path}", self.base_url);
        let params = self.with_identity(params);
        let key = cache_key(&url, &params);

        if self.enable_cache {
            if let Some(hit) = self.cache.get(&key) {
                tracing::debug!(path, "cache hit");
                return Ok(hit);
            }
        }

        let value = self.fetch_with_retry(path, &url, &params).await?;

        if self.enable_cache {
            self.cache.insert(key, value.clone());
        }

        Ok(value)
    }

    /// Run a single request through the backoff schedule.
    ///
    /// Retryable failures are reattempted up to the configured maximum. On
    /// exhaustion a rate-limit error keeps its own kind so callers can tell
    /// throttling from unavailability; anything else is wrapped with the
    /// operation, attempt count, and last cause.
    async fn fetch_with_retry(
        &self,
        path: &str,
        url: &str,
        params: &[(String, String)],
    ) -> ClientResult<serde_json::Value> {
        let max_attempts = self.retry.max_attempts;
        let mut last_error: Option<ClientError> = None;

        for attempt in 1..=max_attempts {
            let backoff = self.retry.delay_before(attempt);
            if !backoff.is_zero() {
                tracing::debug!(
                    path,
                    attempt,
                    backoff_ms = backoff.as_millis() as u64,
                    "backing off before retry"
                );
                tokio::time::sleep(backoff).await;
            }

            tokio::time::sleep(self.rate_limit_delay).await;

            match self.send(path, url, params, attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() => {
                    tracing::warn!(path, attempt, error = %err, "retryable request failure");
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        match last_error {
            Some(rate_limited @ ClientError::RateLimited { .. }) => Err(rate_limited),
            Some(last) => Err(ClientError::retries_exhausted(path, max_attempts, &last)),
            None => Err(ClientError::retries_exhausted(
                path,
                max_attempts,
                &ClientError::bad_request("no attempts were made"),
            )),
        }
    }

    /// Send one HTTP request and classify the response.
    async fn send(
        &self,
        path: &str,
        url: &str,
        params: &[(String, String)],
        attempt: u32,
    ) -> ClientResult<serde_json::Value> {
        let started = std::time::Instant::now();
        let response = self.http.get(url).query(params).send().await?;
        let status = response.status();

        tracing::debug!(
            path,
            attempt,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            params = params.len(),
            "openalex request"
        );

        let response = Self::check_status(path, response).await?;
        Ok(response.json().await?)
    }

    /// Map non-success status codes into the error taxonomy.
    async fn check_status(
        path: &str,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => Err(ClientError::not_found(path)),
            400 | 403 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }

    /// Append the identity parameter; the API key wins over mailto when both exist.
    fn with_identity(&self, params: &[(String, String)]) -> Vec<(String, String)> {
        let mut params = params.to_vec();

        if let Some(ref key) = self.api_key {
            params.push(("api_key".to_string(), key.clone()));
        } else if let Some(ref mailto) = self.mailto {
            params.push(("mailto".to_string(), mailto.clone()));
        }

        params
    }
}

/// Deterministic cache key over the normalized request shape.
fn cache_key(url: &str, params: &[(String, String)]) -> String {
    use md5::{Digest, Md5};

    let mut hasher = Md5::new();
    hasher.update(url.as_bytes());
    hasher.update(b"|");

    for (k, v) in params {
        hasher.update(k.as_bytes());
        hasher.update(b"=");
        hasher.update(v.as_bytes());
        hasher.update(b"&");
    }

    format!("{:x}", hasher.finalize())
}

impl std::fmt::Debug for OpenAlexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAlexClient")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.has_api_key())
            .field("enable_cache", &self.enable_cache)
            .finish()
    }
}
