//! Diagnostic listing of the buckets visible to the configured storage credentials.

use std::io::Write;

use tracing::{error, info};

use crate::contract::{ObjectStore, StoreError};

pub async fn list_bucket_names<S>(store: &S) -> Result<Vec<String>, StoreError>
where
    S: ObjectStore + ?Sized,
{
    match store.list_buckets().await {
        Ok(names) => {
            info!(buckets = names.len(), "Listed buckets");
            Ok(names)
        }
        Err(e) => {
            error!(error = %e, "Failed to list buckets");
            Err(e)
        }
    }
}

/// One name per line, in the order given.
pub fn write_bucket_names<W: Write>(names: &[String], out: &mut W) -> std::io::Result<()> {
    for name in names {
        writeln!(out, "{name}")?;
    }
    out.flush()
}
