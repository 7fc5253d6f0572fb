use chrono::{DateTime, Utc};

use crate::catalog::DEFAULT_CATEGORIZATION;

/// `2024-05-01T09-30-00Z`: colons are replaced so the key stays path friendly.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%SZ";
pub const SOURCE_LABEL: &str = "ASOS";

/// Naming scheme for uploaded pages:
/// `{prefix}/{source_label}_{categorization}_{category_id}_{timestamp}_offset{offset}.json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLayout {
    pub prefix: String,
    pub source_label: String,
    /// Must match [`crate::catalog::CatalogEndpoint::categorization`] of the same run.
    pub categorization: String,
}

impl KeyLayout {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            source_label: SOURCE_LABEL.to_string(),
            categorization: DEFAULT_CATEGORIZATION.to_string(),
        }
    }

    pub fn with_categorization(mut self, categorization: impl Into<String>) -> Self {
        self.categorization = categorization.into();
        self
    }

    pub fn file_name(&self, category_id: u64, at: DateTime<Utc>, offset: u64) -> String {
        format!(
            "{}_{}_{}_{}_offset{}.json",
            self.source_label,
            self.categorization,
            category_id,
            at.format(TIMESTAMP_FORMAT),
            offset
        )
    }

    pub fn key_for(&self, category_id: u64, at: DateTime<Utc>, offset: u64) -> String {
        let file_name = self.file_name(category_id, at, offset);
        // A trailing slash on the prefix would otherwise produce an empty path segment.
        let prefix = self.prefix.trim_end_matches('/');
        if prefix.is_empty() {
            file_name
        } else {
            format!("{prefix}/{file_name}")
        }
    }
}
