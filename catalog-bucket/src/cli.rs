//!
//! This module implements the CLI interface for catalog-bucket: command parsing, wiring the
//! concrete clients together and user-visible output.
//!
//! All core logic (pagination, retry, key layout) lives in the [`catalog-bucket-core`] crate.
//! This module is strictly CLI glue.
//!
//! ## Commands
//! - `extract --config <file>`: paginate the catalog and upload every page.
//! - `list-buckets`: print the name of every visible bucket, one per line.
//!
//! [`catalog-bucket-core`]: ../../catalog-bucket-core/

use crate::load_config::load_config;
use crate::storage::{S3Settings, S3Store};
use anyhow::{Context, Result};
use catalog_bucket_core::buckets::{list_bucket_names, write_bucket_names};
use catalog_bucket_core::catalog::RapidApiCatalog;
use catalog_bucket_core::extract::extract_and_upload;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI for catalog-bucket: snapshot a paginated product catalog into object storage.
#[derive(Parser)]
#[clap(
    name = "catalog-bucket",
    version,
    about = "Fetch paginated catalog listings and store each page as a JSON object in S3"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Paginate the catalog API and upload every page to the configured bucket
    Extract {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
    },
    /// Print the names of all buckets visible to the configured credentials
    ListBuckets {
        /// Storage region; defaults to the AWS provider chain
        #[clap(long)]
        region: Option<String>,
        /// Custom S3-compatible endpoint
        #[clap(long)]
        endpoint_url: Option<String>,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Extract { config } => {
            let config = load_config(config)?;
            tracing::info!(command = "extract", "Starting catalog extraction");

            let catalog = RapidApiCatalog::new(config.api_key.clone(), &config.endpoint)
                .context("Failed to construct catalog client")?;
            let store = S3Store::connect(&config.storage).await;

            match extract_and_upload(&config.extract, &catalog, &store).await {
                Ok(report) => {
                    tracing::info!(
                        command = "extract",
                        run_id = %report.run_id,
                        pages = report.pages.len(),
                        item_count = report.item_count,
                        "Extraction complete"
                    );
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "extract", error = %e, "Extraction failed");
                    Err(anyhow::Error::new(e))
                }
            }
        }
        Commands::ListBuckets {
            region,
            endpoint_url,
        } => {
            let settings = S3Settings {
                region,
                endpoint_url,
            };
            let store = S3Store::connect(&settings).await;
            let names = list_bucket_names(&store)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list buckets: {e}"))?;
            write_bucket_names(&names, &mut std::io::stdout().lock())
                .context("Failed to write bucket names")?;
            Ok(())
        }
    }
}
