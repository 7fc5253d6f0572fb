use serial_test::serial;
use std::env;
use std::fs::write;
use tempfile::NamedTempFile;

use catalog_bucket::load_config::{load_config, API_KEY_ENV};

fn config_file(yaml: &str) -> NamedTempFile {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), yaml).unwrap();
    config_file
}

#[test]
#[serial]
fn test_load_config_full_file_with_env_secret() {
    let config_file = config_file(
        r#"
catalog:
  category_id: 4209
  limit: 24
  base_url: "http://localhost:9999"
  timeout_secs: 5
  locale:
    store: COM
    currency: GBP
retry:
  max_retries: 5
  backoff_base_secs: 2
pacing:
  min_secs: 2
  max_secs: 4
storage:
  bucket: catalog-raw
  prefix: raw/asos
  region: eu-west-1
  endpoint_url: "http://localhost:4566"
"#,
    );
    env::set_var(API_KEY_ENV, "test-key");

    let config = load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.api_key, "test-key");
    assert_eq!(config.extract.category_id, 4209);
    assert_eq!(config.extract.limit, 24);
    assert_eq!(config.extract.bucket, "catalog-raw");
    assert_eq!(config.extract.keys.prefix, "raw/asos");
    assert_eq!(config.extract.keys.source_label, "ASOS");
    assert_eq!(config.extract.locale.store, "COM");
    assert_eq!(config.extract.locale.currency, "GBP");
    // Unset locale fields keep their defaults.
    assert_eq!(config.extract.locale.lang, "en-US");
    assert_eq!(config.extract.retry.max_retries, 5);
    assert_eq!(config.extract.retry.backoff_base_secs, 2);
    assert_eq!(config.extract.pacing.min_secs, 2);
    assert_eq!(config.extract.pacing.max_secs, 4);
    assert_eq!(config.endpoint.base_url, "http://localhost:9999");
    assert_eq!(config.endpoint.timeout_secs, 5);
    assert_eq!(config.endpoint.api_host, "asos2.p.rapidapi.com");
    assert_eq!(config.storage.region.as_deref(), Some("eu-west-1"));
    assert_eq!(
        config.storage.endpoint_url.as_deref(),
        Some("http://localhost:4566")
    );

    env::remove_var(API_KEY_ENV);
}

#[test]
#[serial]
fn test_load_config_minimal_file_uses_defaults() {
    let config_file = config_file(
        r#"
catalog:
  category_id: 4209
storage:
  bucket: catalog-raw
  prefix: raw
"#,
    );
    env::set_var(API_KEY_ENV, "k");

    let config = load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.extract.limit, 48);
    assert_eq!(config.extract.retry.max_retries, 3);
    assert_eq!(config.extract.retry.backoff_base_secs, 1);
    assert_eq!(config.extract.pacing.min_secs, 1);
    assert_eq!(config.extract.pacing.max_secs, 3);
    assert_eq!(config.extract.locale.sort, "freshness");
    assert_eq!(config.endpoint.base_url, "https://asos2.p.rapidapi.com");
    assert_eq!(config.endpoint.timeout_secs, 10);
    assert_eq!(config.storage.region, None);
    assert_eq!(config.storage.endpoint_url, None);
    assert_eq!(config.extract.keys.categorization, "products");

    env::remove_var(API_KEY_ENV);
}

#[test]
#[serial]
fn test_load_config_categorization_drives_url_and_keys() {
    let config_file = config_file(
        "catalog:\n  category_id: 1\n  categorization: categories\nstorage:\n  bucket: b\n  prefix: p\n",
    );
    env::set_var(API_KEY_ENV, "k");

    let config = load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.endpoint.categorization, "categories");
    assert_eq!(config.extract.keys.categorization, "categories");
    assert!(config.endpoint.list_url().ends_with("/categories/v2/list"));

    env::remove_var(API_KEY_ENV);
}

#[test]
#[serial]
fn test_load_config_requires_api_key_in_env() {
    let config_file = config_file(
        "catalog:\n  category_id: 1\nstorage:\n  bucket: b\n  prefix: p\n",
    );
    env::remove_var(API_KEY_ENV);

    let err = load_config(config_file.path()).unwrap_err();
    assert!(
        err.to_string().contains(API_KEY_ENV),
        "error should name the missing variable: {err}"
    );
}

#[test]
#[serial]
fn test_load_config_rejects_invalid_yaml() {
    let config_file = config_file("catalog: [this is: not valid");
    env::set_var(API_KEY_ENV, "k");

    let err = load_config(config_file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config YAML"));

    env::remove_var(API_KEY_ENV);
}

#[test]
#[serial]
fn test_load_config_rejects_zero_limit() {
    let config_file = config_file(
        "catalog:\n  category_id: 1\n  limit: 0\nstorage:\n  bucket: b\n  prefix: p\n",
    );
    env::set_var(API_KEY_ENV, "k");

    let err = load_config(config_file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("limit must be at least 1"));

    env::remove_var(API_KEY_ENV);
}

#[test]
#[serial]
fn test_load_config_missing_file() {
    let err = load_config("does/not/exist.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
