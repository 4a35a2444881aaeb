//! HttpPageFetcher 폴백 동작 테스트 (mockito)

use screener_core::Symbol;
use screener_data::{DataError, HttpPageFetcher, PageFetcher, PageFetcherConfig};
use std::time::Duration;

const LIVE_PAGE: &str = r#"<html><body><ul id="top-ratios"><li>ok</li></ul></body></html>"#;
const PLACEHOLDER_PAGE: &str = "<html><body>None</body></html>";

fn config(base: &str) -> PageFetcherConfig {
    PageFetcherConfig {
        primary_url: format!("{}/company/{{symbol}}/consolidated/", base),
        fallback_url: Some(format!("{}/company/{{symbol}}/", base)),
        timeout: Duration::from_secs(5),
        ..PageFetcherConfig::default()
    }
}

fn tcs() -> Symbol {
    Symbol::parse("TCS").unwrap()
}

#[tokio::test]
async fn test_primary_with_probe_skips_fallback() {
    let mut server = mockito::Server::new_async().await;
    let primary = server
        .mock("GET", "/company/TCS/consolidated/")
        .with_status(200)
        .with_body(LIVE_PAGE)
        .expect(1)
        .create_async()
        .await;
    let fallback = server
        .mock("GET", "/company/TCS/")
        .expect(0)
        .create_async()
        .await;

    let fetcher = HttpPageFetcher::new(config(&server.url())).unwrap();
    let document = fetcher.fetch(&tcs()).await.unwrap();

    assert!(document.url().ends_with("/company/TCS/consolidated/"));
    primary.assert_async().await;
    fallback.assert_async().await;
}

#[tokio::test]
async fn test_missing_probe_uses_fallback() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/company/TCS/consolidated/")
        .with_status(200)
        .with_body(PLACEHOLDER_PAGE)
        .create_async()
        .await;
    let fallback = server
        .mock("GET", "/company/TCS/")
        .with_status(200)
        .with_body(LIVE_PAGE)
        .expect(1)
        .create_async()
        .await;

    let fetcher = HttpPageFetcher::new(config(&server.url())).unwrap();
    let document = fetcher.fetch(&tcs()).await.unwrap();

    assert!(document.html().contains("top-ratios"));
    assert!(document.url().ends_with("/company/TCS/"));
    fallback.assert_async().await;
}

#[tokio::test]
async fn test_no_fallback_configured_returns_primary() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/company/TCS/consolidated/")
        .with_status(200)
        .with_body(PLACEHOLDER_PAGE)
        .create_async()
        .await;

    let config = PageFetcherConfig {
        fallback_url: None,
        ..config(&server.url())
    };
    let fetcher = HttpPageFetcher::new(config).unwrap();
    let document = fetcher.fetch(&tcs()).await.unwrap();

    assert_eq!(document.html(), PLACEHOLDER_PAGE);
}

#[tokio::test]
async fn test_server_error_is_fetch_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/company/TCS/consolidated/")
        .with_status(500)
        .create_async()
        .await;
    let fallback = server
        .mock("GET", "/company/TCS/")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let fetcher = HttpPageFetcher::new(config(&server.url())).unwrap();
    let err = fetcher.fetch(&tcs()).await.unwrap_err();

    assert!(matches!(err, DataError::Fetch(_)));
    fallback.assert_async().await;
}

#[tokio::test]
async fn test_primary_not_found_uses_fallback() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/company/TCS/consolidated/")
        .with_status(404)
        .with_body(LIVE_PAGE)
        .create_async()
        .await;
    let fallback = server
        .mock("GET", "/company/TCS/")
        .with_status(200)
        .with_body(LIVE_PAGE)
        .expect(1)
        .create_async()
        .await;

    let fetcher = HttpPageFetcher::new(config(&server.url())).unwrap();
    let document = fetcher.fetch(&tcs()).await.unwrap();

    assert!(document.url().ends_with("/company/TCS/"));
    assert!(document.html().contains("top-ratios"));
    fallback.assert_async().await;
}

#[tokio::test]
async fn test_primary_not_found_without_fallback_is_fetch_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/company/TCS/consolidated/")
        .with_status(404)
        .create_async()
        .await;

    let mut cfg = config(&server.url());
    cfg.fallback_url = None;
    let fetcher = HttpPageFetcher::new(cfg).unwrap();
    let err = fetcher.fetch(&tcs()).await.unwrap_err();

    assert!(matches!(err, DataError::Fetch(_)));
}

#[tokio::test]
async fn test_too_many_requests_is_rate_limited() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/company/TCS/consolidated/")
        .with_status(429)
        .create_async()
        .await;

    let fetcher = HttpPageFetcher::new(config(&server.url())).unwrap();
    let err = fetcher.fetch(&tcs()).await.unwrap_err();

    assert!(matches!(err, DataError::RateLimited(_)));
}

#[tokio::test]
async fn test_fallback_failure_is_fetch_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/company/TCS/consolidated/")
        .with_status(200)
        .with_body(PLACEHOLDER_PAGE)
        .create_async()
        .await;
    server
        .mock("GET", "/company/TCS/")
        .with_status(404)
        .create_async()
        .await;

    let fetcher = HttpPageFetcher::new(config(&server.url())).unwrap();
    let err = fetcher.fetch(&tcs()).await.unwrap_err();

    assert!(matches!(err, DataError::Fetch(_)));
}

#[tokio::test]
async fn test_locator_symbol_is_used_verbatim() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/custom/page")
        .with_status(200)
        .with_body(LIVE_PAGE)
        .expect(1)
        .create_async()
        .await;

    let symbol = Symbol::parse(&format!("{}/custom/page", server.url())).unwrap();
    let fetcher = HttpPageFetcher::new(config(&server.url())).unwrap();
    fetcher.fetch(&symbol).await.unwrap();

    mock.assert_async().await;
}
