//! Retry logic for catalog page requests.
//!
//! Attempts are numbered from 1. After failed attempt `n` (and only if another attempt
//! remains) the caller waits `backoff_base_secs * 2^n` seconds. Exhausting every attempt
//! is fatal for the whole run, not only for the page.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, warn};

use crate::contract::CatalogClient;
use crate::error::ExtractError;
use crate::page::{Page, PageQuery};

/// Configuration for retry behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total number of attempts per page, including the first.
    pub max_retries: u32,
    pub backoff_base_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base_secs: 1,
        }
    }
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_backoff_base_secs(mut self, backoff_base_secs: u64) -> Self {
        self.backoff_base_secs = backoff_base_secs;
        self
    }

    /// Wait after failed attempt `attempt`.
    pub fn backoff_duration(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        Duration::from_secs(self.backoff_base_secs.saturating_mul(factor))
    }
}

/// Fetch `query`, retrying transient failures according to `policy`.
///
/// Non-retryable failures (see [`crate::error::FetchError::is_retryable`]) are returned
/// straight away as [`ExtractError::Fetch`].
pub async fn fetch_with_retry<C>(
    client: &C,
    query: &PageQuery,
    policy: &RetryPolicy,
) -> Result<Page, ExtractError>
where
    C: CatalogClient + ?Sized,
{
    if policy.max_retries == 0 {
        return Err(ExtractError::Config(
            "max_retries must be at least 1".to_string(),
        ));
    }

    let mut attempt = 1;
    loop {
        match client.fetch_page(query.clone()).await {
            Ok(page) => return Ok(page),
            Err(e) if !e.is_retryable() => {
                error!(offset = query.offset, attempt, error = %e, "Non-retryable fetch error");
                return Err(ExtractError::Fetch {
                    offset: query.offset,
                    source: e,
                });
            }
            Err(e) => {
                warn!(offset = query.offset, attempt, error = %e, "Attempt {attempt} failed");
                if attempt >= policy.max_retries {
                    error!(
                        offset = query.offset,
                        attempts = attempt,
                        "Max retries reached. Aborting."
                    );
                    return Err(ExtractError::RetriesExhausted {
                        offset: query.offset,
                        attempts: attempt,
                        source: e,
                    });
                }
                let backoff = policy.backoff_duration(attempt);
                warn!(
                    offset = query.offset,
                    backoff_secs = backoff.as_secs(),
                    "Backing off before next attempt"
                );
                sleep(backoff).await;
                attempt += 1;
            }
        }
    }
}
