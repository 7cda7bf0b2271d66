//! Configuration for the OpenAlex MCP server.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the OpenAlex API.
    pub const BASE_URL: &str = "https://api.openalex.org";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Polite delay between requests (100ms = 10 req/s, the polite-pool ceiling).
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_millis(100);

    /// Cache TTL (5 minutes).
    pub const CACHE_TTL: Duration = Duration::from_secs(300);

    /// Maximum cache entries before FIFO eviction kicks in.
    pub const CACHE_MAX_SIZE: usize = 100;

    /// Maximum fetch attempts per request.
    pub const MAX_RETRIES: u32 = 3;

    /// Delay before the first retry.
    pub const INITIAL_RETRY_DELAY: Duration = Duration::from_secs(1);

    /// Multiplier applied to the retry delay after each attempt.
    pub const BACKOFF_FACTOR: f64 = 2.0;

    /// Upper bound on any single backoff delay.
    pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

    /// Default page size for list requests.
    pub const DEFAULT_PER_PAGE: i32 = 25;

    /// Maximum page size accepted by OpenAlex.
    pub const MAX_PER_PAGE: i32 = 200;

    /// Default citation floor for the influential-works lookup.
    pub const DEFAULT_MIN_CITATIONS: i32 = 50;

    /// Cap on concurrent in-flight requests when resolving id lists.
    pub const MAX_CONCURRENT_LOOKUPS: usize = 5;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Contact email for the OpenAlex polite pool (optional).
    pub mailto: Option<String>,

    /// Premium API key (optional, takes precedence over mailto).
    pub api_key: Option<String>,

    /// Base URL for the API (overridable for testing with mock servers).
    pub base_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Polite delay between requests.
    pub rate_limit_delay: Duration,

    /// Whether responses are cached at all.
    pub enable_cache: bool,

    /// Cache TTL.
    pub cache_ttl: Duration,

    /// Maximum cache entries.
    pub cache_max_size: usize,

    /// Maximum fetch attempts per request.
    pub max_retries: u32,

    /// Delay before the first retry.
    pub initial_retry_delay: Duration,

    /// Multiplier applied to the retry delay after each attempt.
    pub backoff_factor: f64,

    /// Upper bound on any single backoff delay.
    pub max_retry_delay: Duration,
}

impl Config {
    /// Create a new configuration with optional polite-pool email and API key.
    #[must_use]
    pub fn new(mailto: Option<String>, api_key: Option<String>) -> Self {
        Self {
            mailto,
            api_key,
            base_url: api::BASE_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            rate_limit_delay: api::RATE_LIMIT_DELAY,
            enable_cache: true,
            cache_ttl: api::CACHE_TTL,
            cache_max_size: api::CACHE_MAX_SIZE,
            max_retries: api::MAX_RETRIES,
            initial_retry_delay: api::INITIAL_RETRY_DELAY,
            backoff_factor: api::BACKOFF_FACTOR,
            max_retry_delay: api::MAX_RETRY_DELAY,
        }
    }

    /// Create a test configuration pointed at a mock server.
    ///
    /// Caching and politeness delays are off so tests observe every request,
    /// and retry delays are zero so failure paths run fast.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            mailto: None,
            api_key: None,
            base_url: base_url.to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            rate_limit_delay: Duration::from_millis(0),
            enable_cache: false,
            cache_ttl: Duration::from_secs(300),
            cache_max_size: api::CACHE_MAX_SIZE,
            max_retries: api::MAX_RETRIES,
            initial_retry_delay: Duration::from_millis(0),
            backoff_factor: api::BACKOFF_FACTOR,
            max_retry_delay: Duration::from_millis(0),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `OPENALEX_MAILTO` and `OPENALEX_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let mailto = std::env::var("OPENALEX_MAILTO").ok();
        let api_key = std::env::var("OPENALEX_API_KEY").ok();
        Ok(Self::new(mailto, api_key))
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Client-identification header value, embedding the contact email when set.
    #[must_use]
    pub fn user_agent(&self) -> String {
        let base = concat!("openalex-mcp/", env!("CARGO_PKG_VERSION"));
        match &self.mailto {
            Some(mailto) => format!("{base} (mailto:{mailto})"),
            None => base.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}
