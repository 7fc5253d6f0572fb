#![allow(unused)]

//! # contract: collaborator interfaces for the extraction pipeline
//!
//! The pipeline talks to exactly two outside systems:
//! - a product catalog API, behind [`CatalogClient`]
//! - an object storage service, behind [`ObjectStore`]
//!
//! Both traits are async and annotated for `mockall`, so the extraction loop and the
//! bucket lister can be driven entirely by mocks in tests. Concrete implementations live
//! in [`crate::catalog`] (reqwest) and in the CLI crate (aws-sdk-s3).
//!
//! ## Errors
//! - Catalog requests return the typed [`FetchError`] because the caller decides
//!   whether to retry based on its variant.
//! - Storage calls return a boxed error; the pipeline never retries them, it only reports.

use async_trait::async_trait;

use mockall::{automock, predicate::*};

use crate::error::FetchError;
use crate::page::{Page, PageQuery};

/// Error type for [`ObjectStore`] (simple boxed error)
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Everything needed to write one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewObject {
    pub bucket: String,
    pub key: String,
    /// Raw object contents.
    pub body: Vec<u8>,
    pub content_type: String,
}

/// Read side: fetch one page of a catalog listing.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Perform a single request for `query`. Implementations must not retry internally.
    async fn fetch_page(&self, query: PageQuery) -> Result<Page, FetchError>;
}

/// Write side: object storage.
///
/// The trait is implemented by real clients and by test mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload one object from an in-memory buffer.
    async fn put_object(&self, object: NewObject) -> Result<(), StoreError>;

    /// Names of all buckets visible to the configured credentials, in service order.
    async fn list_buckets(&self) -> Result<Vec<String>, StoreError>;
}
