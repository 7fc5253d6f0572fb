use std::time::Duration;

use catalog_bucket_core::catalog::{CatalogEndpoint, RapidApiCatalog};
use catalog_bucket_core::contract::CatalogClient;
use catalog_bucket_core::error::FetchError;
use catalog_bucket_core::page::{CatalogLocale, PageQuery};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn endpoint(server: &MockServer) -> CatalogEndpoint {
    CatalogEndpoint {
        base_url: server.uri(),
        ..CatalogEndpoint::default()
    }
}

fn query(offset: u64) -> PageQuery {
    PageQuery::new(&CatalogLocale::default(), 4209, offset, 48)
}

#[tokio::test]
async fn test_fetch_page_sends_headers_and_all_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/v2/list"))
        .and(header("x-rapidapi-key", "secret-key"))
        .and(header("x-rapidapi-host", "asos2.p.rapidapi.com"))
        .and(query_param("store", "US"))
        .and(query_param("offset", "96"))
        .and(query_param("categoryId", "4209"))
        .and(query_param("country", "US"))
        .and(query_param("sort", "freshness"))
        .and(query_param("currency", "USD"))
        .and(query_param("sizeSchema", "US"))
        .and(query_param("limit", "48"))
        .and(query_param("lang", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "itemCount": 100,
            "products": [{"id": 96}, {"id": 97}, {"id": 98}, {"id": 99}],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = RapidApiCatalog::new("secret-key", &endpoint(&server)).unwrap();
    let page = catalog.fetch_page(query(96)).await.expect("fetch should succeed");

    assert_eq!(page.item_count, 100);
    assert_eq!(page.products.len(), 4);
}

#[tokio::test]
async fn test_non_success_status_is_reported_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/v2/list"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too many requests"))
        .mount(&server)
        .await;

    let catalog = RapidApiCatalog::new("k", &endpoint(&server)).unwrap();
    let err = catalog.fetch_page(query(0)).await.unwrap_err();

    match err {
        FetchError::Status { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "Too many requests");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_unexpected_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let catalog = RapidApiCatalog::new("k", &endpoint(&server)).unwrap();
    let err = catalog.fetch_page(query(0)).await.unwrap_err();

    assert!(matches!(err, FetchError::UnexpectedShape(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_missing_item_count_is_unexpected_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .mount(&server)
        .await;

    let catalog = RapidApiCatalog::new("k", &endpoint(&server)).unwrap();
    let err = catalog.fetch_page(query(0)).await.unwrap_err();

    assert!(matches!(err, FetchError::UnexpectedShape(_)));
}

#[tokio::test]
async fn test_slow_response_times_out_as_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"itemCount": 0, "products": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let endpoint = CatalogEndpoint {
        timeout_secs: 1,
        ..endpoint(&server)
    };
    let catalog = RapidApiCatalog::new("k", &endpoint).unwrap();
    let err = catalog.fetch_page(query(0)).await.unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
    assert!(err.is_retryable());
}
