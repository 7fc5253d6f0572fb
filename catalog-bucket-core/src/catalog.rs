//! HTTP implementation of [`CatalogClient`] for the RapidAPI-hosted ASOS catalog.
//!
//! One call to [`CatalogClient::fetch_page`] is exactly one GET request; retrying is the
//! caller's job (see [`crate::retry`]).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};

use crate::contract::CatalogClient;
use crate::error::FetchError;
use crate::page::{Page, PageQuery};

pub const DEFAULT_BASE_URL: &str = "https://asos2.p.rapidapi.com";
pub const DEFAULT_API_HOST: &str = "asos2.p.rapidapi.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Path segment of the list endpoint. Object keys carry the same label.
pub const DEFAULT_CATEGORIZATION: &str = "products";

/// Where and how to reach the catalog API. Everything except the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEndpoint {
    pub base_url: String,
    /// Value of the `x-rapidapi-host` header.
    pub api_host: String,
    pub categorization: String,
    pub timeout_secs: u64,
}

impl Default for CatalogEndpoint {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_host: DEFAULT_API_HOST.to_string(),
            categorization: DEFAULT_CATEGORIZATION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CatalogEndpoint {
    pub fn list_url(&self) -> String {
        format!(
            "{}/{}/v2/list",
            self.base_url.trim_end_matches('/'),
            self.categorization
        )
    }
}

pub struct RapidApiCatalog {
    client: Client,
    list_url: String,
    api_host: String,
    api_key: String,
}

impl RapidApiCatalog {
    pub fn new(
        api_key: impl Into<String>,
        endpoint: &CatalogEndpoint,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(endpoint.timeout_secs))
            .build()
            .map_err(|e| {
                error!(error = ?e, "Failed to build HTTP client");
                FetchError::Transport(e.to_string())
            })?;
        let list_url = endpoint.list_url();
        info!(
            url = %list_url,
            timeout_secs = endpoint.timeout_secs,
            "Initialised catalog client"
        );
        Ok(Self {
            client,
            list_url,
            api_host: endpoint.api_host.clone(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl CatalogClient for RapidApiCatalog {
    async fn fetch_page(&self, query: PageQuery) -> Result<Page, FetchError> {
        debug!(
            url = %self.list_url,
            offset = query.offset,
            limit = query.limit,
            "Requesting catalog page"
        );

        let resp = self
            .client
            .get(&self.list_url)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.api_host)
            .query(&query.params())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Transport(format!("timed out: {e}"))
                } else {
                    FetchError::Transport(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| String::from("<Failed to decode response body>"));
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let page = Page::from_slice(&bytes)?;
        debug!(
            offset = query.offset,
            item_count = page.item_count,
            products = page.products.len(),
            "Catalog page received"
        );
        Ok(page)
    }
}
