//! S3 integration for CLI and core: implements the core `ObjectStore` trait on top of
//! aws-sdk-s3.
//!
//! # Object storage (CLI <-> Core)
//!
//! Bridges [`catalog_bucket_core::contract::ObjectStore`] to Amazon S3 (or any S3-compatible
//! endpoint such as LocalStack or MinIO).
//!
//! - Credentials come from the standard AWS provider chain (env vars, profile, IMDS, ...).
//! - Region is optional; when omitted the provider chain decides.
//! - Uploads carry no client-side timeout; only the catalog request is time-bounded.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use serde::Deserialize;

use catalog_bucket_core::contract::{NewObject, ObjectStore, StoreError};

/// Connection settings for the storage service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct S3Settings {
    #[serde(default)]
    pub region: Option<String>,
    /// Custom endpoint, e.g. `http://localhost:4566` for LocalStack.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub async fn connect(settings: &S3Settings) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &settings.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint) = &settings.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let aws_config = loader.load().await;
        let s3_config_builder = aws_sdk_s3::config::Builder::from(&aws_config);
        // Custom endpoints rarely support virtual-hosted bucket addressing.
        let s3_config = if settings.endpoint_url.is_some() {
            s3_config_builder.force_path_style(true).build()
        } else {
            s3_config_builder.build()
        };

        tracing::info!(
            region = ?aws_config.region().map(|r| r.to_string()),
            endpoint_url = ?settings.endpoint_url,
            "Initialised S3 client"
        );
        Self::from_client(Client::from_conf(s3_config))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_object(&self, object: NewObject) -> Result<(), StoreError> {
        tracing::debug!(
            bucket = %object.bucket,
            key = %object.key,
            bytes = object.body.len(),
            "Uploading object"
        );
        self.client
            .put_object()
            .bucket(&object.bucket)
            .key(&object.key)
            .content_type(&object.content_type)
            .body(ByteStream::from(object.body))
            .send()
            .await
            .map_err(|e| -> StoreError {
                format!("PutObject failed: {}", DisplayErrorContext(&e)).into()
            })?;
        Ok(())
    }

    async fn list_buckets(&self) -> Result<Vec<String>, StoreError> {
        let response = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| -> StoreError {
                format!("ListBuckets failed: {}", DisplayErrorContext(&e)).into()
            })?;

        Ok(response
            .buckets()
            .iter()
            .filter_map(|bucket| bucket.name().map(str::to_string))
            .collect())
    }
}
