use tracing::{debug, info};

use crate::error::ExtractError;
use crate::object_key::KeyLayout;
use crate::pacing::PagePacing;
use crate::page::CatalogLocale;
use crate::retry::RetryPolicy;

pub const DEFAULT_PAGE_LIMIT: u64 = 48;

/// Everything one extraction run needs besides its two clients.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub category_id: u64,
    pub bucket: String,
    pub keys: KeyLayout,
    /// Page size.
    pub limit: u64,
    pub locale: CatalogLocale,
    pub retry: RetryPolicy,
    pub pacing: PagePacing,
}

impl ExtractConfig {
    pub fn new(category_id: u64, bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            category_id,
            bucket: bucket.into(),
            keys: KeyLayout::new(prefix),
            limit: DEFAULT_PAGE_LIMIT,
            locale: CatalogLocale::default(),
            retry: RetryPolicy::default(),
            pacing: PagePacing::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.bucket.trim().is_empty() {
            return Err(ExtractError::Config("bucket must not be empty".to_string()));
        }
        if self.limit == 0 {
            return Err(ExtractError::Config("limit must be at least 1".to_string()));
        }
        if self.retry.max_retries == 0 {
            return Err(ExtractError::Config(
                "max_retries must be at least 1".to_string(),
            ));
        }
        if self.pacing.min_secs > self.pacing.max_secs {
            return Err(ExtractError::Config(format!(
                "pacing.min_secs ({}) is greater than pacing.max_secs ({})",
                self.pacing.min_secs, self.pacing.max_secs
            )));
        }
        Ok(())
    }

    pub fn trace_loaded(&self) {
        info!(
            category_id = self.category_id,
            bucket = %self.bucket,
            prefix = %self.keys.prefix,
            limit = self.limit,
            max_retries = self.retry.max_retries,
            "Loaded ExtractConfig"
        );
        debug!(?self, "ExtractConfig loaded (full debug)");
    }
}
