//! High-level pipeline: paginate the catalog and upload every page to the bucket.
//!
//! Each iteration:
//!   - builds a [`PageQuery`] for the current offset
//!   - fetches it through [`fetch_with_retry`]; exhausting the retries ends the run
//!   - uploads the pretty-printed body under a timestamped key; a failed upload ends the run
//!   - stops once `offset + limit >= itemCount`, otherwise advances the offset and sleeps
//!
//! # Error Handling
//! Every failure is logged where it happens and returned as an [`ExtractError`]. Objects
//! already written stay in the bucket. There is no checkpoint: a new run starts again
//! at offset 0.
//!
//! # Navigation
//! - Main entrypoint: [`extract_and_upload`]
//! - Supporting types: [`ExtractConfig`], [`ExtractReport`].

use chrono::Utc;
use tokio::time::sleep;
use tracing::{error, info, Instrument};
use uuid::Uuid;

use crate::contract::{CatalogClient, NewObject, ObjectStore, JSON_CONTENT_TYPE};
use crate::error::ExtractError;
use crate::page::PageQuery;
use crate::retry::fetch_with_retry;

pub use crate::config::ExtractConfig;

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct ExtractReport {
    pub run_id: Uuid,
    /// `itemCount` from the last page fetched.
    pub item_count: u64,
    pub pages: Vec<UploadedPage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedPage {
    pub offset: u64,
    pub key: String,
    pub products: usize,
    pub bytes: usize,
}

pub async fn extract_and_upload<C, S>(
    config: &ExtractConfig,
    catalog: &C,
    store: &S,
) -> Result<ExtractReport, ExtractError>
where
    C: CatalogClient + ?Sized,
    S: ObjectStore + ?Sized,
{
    config.validate()?;

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!(
        "extract",
        %run_id,
        category_id = config.category_id,
        bucket = %config.bucket
    );
    run(config, catalog, store, run_id).instrument(span).await
}

async fn run<C, S>(
    config: &ExtractConfig,
    catalog: &C,
    store: &S,
    run_id: Uuid,
) -> Result<ExtractReport, ExtractError>
where
    C: CatalogClient + ?Sized,
    S: ObjectStore + ?Sized,
{
    info!(limit = config.limit, "[EXTRACT] Starting catalog extraction");

    let mut offset: u64 = 0;
    let mut pages: Vec<UploadedPage> = Vec::new();

    loop {
        let query = PageQuery::new(&config.locale, config.category_id, offset, config.limit);
        let page = fetch_with_retry(catalog, &query, &config.retry).await?;

        let key = config.keys.key_for(config.category_id, Utc::now(), offset);
        let body = page.to_pretty_json().map_err(|e| {
            error!(offset, error = %e, "[EXTRACT][ERROR] Failed to serialise page");
            ExtractError::Serialize { offset, source: e }
        })?;
        let bytes = body.len();

        let object = NewObject {
            bucket: config.bucket.clone(),
            key: key.clone(),
            body,
            content_type: JSON_CONTENT_TYPE.to_string(),
        };
        if let Err(e) = store.put_object(object).await {
            error!(key = %key, error = %e, "[EXTRACT][ERROR] Failed to upload {key}");
            return Err(ExtractError::Upload { key, source: e });
        }
        info!(offset, bytes, "Uploaded: s3://{}/{}", config.bucket, key);

        pages.push(UploadedPage {
            offset,
            key,
            products: page.products.len(),
            bytes,
        });

        if offset.saturating_add(config.limit) >= page.item_count {
            info!(
                item_count = page.item_count,
                pages = pages.len(),
                "[EXTRACT] All data retrieved and uploaded."
            );
            return Ok(ExtractReport {
                run_id,
                item_count: page.item_count,
                pages,
            });
        }

        offset += config.limit;
        let delay = config.pacing.next_delay();
        info!(next_offset = offset, "Sleeping {} seconds before next request", delay.as_secs());
        sleep(delay).await;
    }
}
