//! `load_config` module: Loads a static YAML config and injects the catalog API key from the
//! environment, producing everything the `extract` command needs.
//!
//! This module is the only place where untrusted YAML is parsed and mapped onto the core
//! domain types ([`ExtractConfig`], [`CatalogEndpoint`]).
//!
//! # Accepted YAML
//! ```yaml
//! catalog:
//!   category_id: 4209
//!   limit: 48              # optional, default 48
//!   base_url: ...          # optional, default https://asos2.p.rapidapi.com
//!   categorization: ...    # optional, default products; used in the URL and object keys
//!   timeout_secs: 10       # optional
//!   locale: { store: US }  # optional, any subset of store/country/sort/currency/size_schema/lang
//! retry:                   # optional
//!   max_retries: 3
//!   backoff_base_secs: 1
//! pacing:                  # optional
//!   min_secs: 1
//!   max_secs: 3
//! storage:
//!   bucket: my-bucket
//!   prefix: raw/asos
//!   region: eu-west-1      # optional
//!   endpoint_url: ...      # optional
//! ```
//!
//! # Errors
//! All errors use `anyhow::Error` and are surfaced at the CLI boundary.

use anyhow::{Context, Result};
use catalog_bucket_core::catalog::CatalogEndpoint;
use catalog_bucket_core::config::{ExtractConfig, DEFAULT_PAGE_LIMIT};
use catalog_bucket_core::object_key::KeyLayout;
use catalog_bucket_core::pacing::PagePacing;
use catalog_bucket_core::page::CatalogLocale;
use catalog_bucket_core::retry::RetryPolicy;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{error, info};

use crate::storage::S3Settings;

/// Environment variable holding the RapidAPI key.
pub const API_KEY_ENV: &str = "RAPIDAPI_KEY";

#[derive(Debug)]
pub struct CliConfig {
    pub extract: ExtractConfig,
    pub endpoint: CatalogEndpoint,
    pub storage: S3Settings,
    pub api_key: String,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    catalog: CatalogSection,
    #[serde(default)]
    retry: RetryPolicy,
    #[serde(default)]
    pacing: PagePacing,
    storage: StorageSection,
}

#[derive(Debug, Deserialize)]
struct CatalogSection {
    category_id: u64,
    #[serde(default = "default_limit")]
    limit: u64,
    #[serde(default)]
    locale: CatalogLocale,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    api_host: Option<String>,
    #[serde(default)]
    categorization: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_LIMIT
}

#[derive(Debug, Deserialize)]
struct StorageSection {
    bucket: String,
    #[serde(default)]
    prefix: String,
    #[serde(flatten)]
    s3: S3Settings,
}

/// Loads a static YAML config file (no secrets) and injects required env vars for secrets.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let raw: RawConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    let api_key = std::env::var(API_KEY_ENV)
        .map_err(|e| {
            error!(error = ?e, "{API_KEY_ENV} environment variable not set");
            e
        })
        .with_context(|| format!("{API_KEY_ENV} environment variable not set"))?;
    info!("{API_KEY_ENV} found in env");

    let mut endpoint = CatalogEndpoint::default();
    if let Some(base_url) = raw.catalog.base_url {
        endpoint.base_url = base_url;
    }
    if let Some(api_host) = raw.catalog.api_host {
        endpoint.api_host = api_host;
    }
    if let Some(categorization) = raw.catalog.categorization {
        endpoint.categorization = categorization;
    }
    if let Some(timeout_secs) = raw.catalog.timeout_secs {
        endpoint.timeout_secs = timeout_secs;
    }

    let extract = ExtractConfig {
        category_id: raw.catalog.category_id,
        bucket: raw.storage.bucket,
        keys: KeyLayout::new(raw.storage.prefix)
            .with_categorization(endpoint.categorization.clone()),
        limit: raw.catalog.limit,
        locale: raw.catalog.locale,
        retry: raw.retry,
        pacing: raw.pacing,
    };
    extract.validate().context("Invalid extract configuration")?;
    extract.trace_loaded();

    Ok(CliConfig {
        extract,
        endpoint,
        storage: raw.storage.s3,
        api_key,
    })
}
