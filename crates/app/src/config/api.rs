//! Ordering API config

use std::time::Duration;

use clap::Args;

/// Ordering API settings.
#[derive(Debug, Clone, Args)]
pub struct ApiConfig {
    /// Base URL of the ordering API
    #[arg(
        long = "api-base-url",
        env = "BISTRO_API_BASE_URL",
        default_value = "https://moobeefsteak.online/api"
    )]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long = "http-timeout-secs", env = "BISTRO_HTTP_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Attempts per request, including the first
    #[arg(
        long,
        env = "BISTRO_RETRY_ATTEMPTS",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub retry_attempts: u32,

    /// Delay between attempts in milliseconds
    #[arg(long, env = "BISTRO_RETRY_BACKOFF_MS", default_value_t = 250)]
    pub retry_backoff_ms: u64,
}

impl ApiConfig {
    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Retry policy for idempotent reads.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_attempts,
            backoff: Duration::from_millis(self.retry_backoff_ms),
        }
    }
}

/// How often a failed request is tried again.
///
/// Only transport failures and server errors are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts including the first; `1` disables retries.
    pub max_attempts: u32,

    /// Delay between attempts.
    pub backoff: Duration,
}

impl RetryPolicy {
    /// A policy that never retries.
    pub const NONE: Self = Self {
        max_attempts: 1,
        backoff: Duration::ZERO,
    };
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::NONE
    }
}
