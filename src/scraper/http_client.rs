use crate::config::ScraperConfig;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::RetryIf;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("page not found: {0}")]
    NotFound(String),

    #[error("rate limited ({status}) by {url}")]
    RateLimited { status: StatusCode, url: String },

    #[error("HTTP {status} from {url}")]
    Status { status: StatusCode, url: String },

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),
}

impl FetchError {
    /// Rate limiting and transport failures are worth another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::RateLimited { .. } | FetchError::Request { .. })
    }
}

pub struct HttpClient {
    inner: reqwest::Client,
    config: ScraperConfig,
}

impl HttpClient {
    pub fn new(config: &ScraperConfig) -> Result<Self, FetchError> {
        let inner = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            // Accept cookies so session-based pages work
            .cookie_store(true)
            .build()
            .map_err(FetchError::Build)?;

        Ok(Self {
            inner,
            config: config.clone(),
        })
    }

    /// Fetch a URL as text with a polite delay and jittered exponential retry.
    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        self.polite_delay().await;

        let strategy = ExponentialBackoff::from_millis(2)
            .factor(self.config.request_delay_ms / 2)
            .map(jitter)
            .take(self.config.max_retries as usize);

        let mut attempt = 0u32;
        RetryIf::start(
            strategy,
            move || {
                attempt += 1;
                self.try_get(url, attempt)
            },
            |e: &FetchError| e.is_transient(),
        )
        .await
    }

    async fn try_get(&self, url: &str, attempt: u32) -> Result<String, FetchError> {
        debug!("GET {} (attempt {})", url, attempt);

        let resp = self.inner.get(url).send().await.map_err(|source| {
            warn!("Request failed on attempt {}: {}", attempt, source);
            FetchError::Request {
                url: url.to_string(),
                source,
            }
        })?;

        let status = resp.status();
        if status.is_success() {
            return resp.text().await.map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            });
        }

        let err = classify(status, url);
        if err.is_transient() {
            warn!("Rate limited ({}) on attempt {}", status, attempt);
        }
        Err(err)
    }

    /// Sleep for the configured delay + random jitter.
    async fn polite_delay(&self) {
        let extra = jitter(Duration::from_millis(self.config.jitter_ms));
        sleep(Duration::from_millis(self.config.request_delay_ms) + extra).await;
    }
}

/// Error for a non-success status. 429 and 503 are retried; other 4xx are not.
fn classify(status: StatusCode, url: &str) -> FetchError {
    match status {
        StatusCode::NOT_FOUND => FetchError::NotFound(url.to_string()),
        StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE => FetchError::RateLimited {
            status,
            url: url.to_string(),
        },
        _ => FetchError::Status {
            status,
            url: url.to_string(),
        },
    }
}
