//! Error types for the extraction pipeline.
//!
//! [`FetchError`] is what a [`crate::contract::CatalogClient`] returns for a single request;
//! [`ExtractError`] is what a whole run returns when it stops early.

use thiserror::Error;

use crate::contract::StoreError;

/// Failure of a single catalog page request.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection failure, timeout or any other transport-level problem.
    #[error("request failed: {0}")]
    Transport(String),

    /// The API answered with a non-2xx status.
    #[error("catalog API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not JSON, or lacked `itemCount` / `products`.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}

impl FetchError {
    /// Transport and status failures are worth another attempt; a malformed body is not.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FetchError::UnexpectedShape(_))
    }
}

/// Reason an extraction run stopped before the catalog was exhausted.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("max retries ({attempts}) reached fetching offset {offset}: {source}")]
    RetriesExhausted {
        offset: u64,
        attempts: u32,
        #[source]
        source: FetchError,
    },

    #[error("fetching offset {offset} failed: {source}")]
    Fetch {
        offset: u64,
        #[source]
        source: FetchError,
    },

    #[error("failed to serialise page at offset {offset}: {source}")]
    Serialize {
        offset: u64,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to upload {key}: {source}")]
    Upload {
        key: String,
        #[source]
        source: StoreError,
    },
}
