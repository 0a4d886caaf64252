//! Ordering API client.

use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::{RetryPolicy, api::ApiConfig};

pub mod envelope;
pub mod retry;

pub use envelope::{unwrap_item, unwrap_list};
pub use retry::with_retry;

/// Errors raised by the ordering API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The configured base URL is not an absolute http(s) URL.
    #[error("invalid API base URL {0:?}")]
    InvalidBaseUrl(String),

    /// The request never produced a response.
    #[error("request to {url} failed")]
    Transport {
        /// Requested URL
        url: String,

        /// Underlying error
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("request to {url} returned {status}")]
    Status {
        /// Requested URL
        url: String,

        /// Response status
        status: StatusCode,
    },

    /// The response body is not JSON.
    #[error("response from {url} is not valid JSON")]
    Decode {
        /// Requested URL
        url: String,

        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Whether trying again could succeed.
    ///
    /// Transport failures and server errors qualify; client errors never do.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Status { status, .. } => status.is_server_error(),
            Self::Client(_) | Self::InvalidBaseUrl(_) | Self::Decode { .. } => false,
        }
    }

    /// Whether the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

/// JSON client for the ordering API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] for a base URL that cannot carry
    /// paths, or [`ApiError::Client`] if the TLS backend cannot be
    /// initialised.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(config.base_url())
            .ok()
            .filter(|url| !url.cannot_be_a_base() && matches!(url.scheme(), "http" | "https"))
            .ok_or_else(|| ApiError::InvalidBaseUrl(config.base_url.clone()))?;

        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url,
            retry: config.retry_policy(),
        })
    }

    /// Base URL requests are made against.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Absolute URL for an API path, one percent-encoded segment per item.
    pub fn url<S: AsRef<str>>(&self, segments: &[S]) -> Url {
        let mut url = self.base_url.clone();

        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(segments.iter().map(AsRef::as_ref));
        }

        url
    }

    /// `GET` a JSON document, retrying per the configured policy.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] once the final attempt fails.
    #[instrument(skip(self, segments, query), fields(base_url = %self.base_url))]
    pub async fn get_json<S: AsRef<str>>(
        &self,
        segments: &[S],
        query: &[(&str, String)],
    ) -> Result<Value, ApiError> {
        let url = self.url(segments);

        with_retry(self.retry, || self.get_once(&url, query)).await
    }

    async fn get_once(&self, url: &Url, query: &[(&str, String)]) -> Result<Value, ApiError> {
        let url = url.as_str();

        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();

        debug!(%status, url, "ordering API responded");

        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
