// Fetch module tests.

use std::sync::Arc;

use super::{FetchConfig, FetchError, Fetcher};
use crate::adsystems::KnownAdSystems;
use crate::records::Severity;
use httptest::{matchers::*, responders::*, Expectation, Server};

const ADS_TXT: &str = "greenadexchange.com, XF7342, DIRECT, 5jyxf8k54\nexample.com, 1, RESELLER\n";

fn fetcher() -> Fetcher {
    Fetcher::new(FetchConfig::default()).expect("client should build")
}

#[tokio::test]
async fn test_fetch_invalid_target_fails_before_network() {
    let err = fetcher().fetch("ftp://example.com").await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidUrl(_)));
    assert_eq!(err.kind(), "invalid URL");
}

#[tokio::test]
async fn test_fetch_parses_plain_text_body() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/ads.txt")).respond_with(
            status_code(200)
                .append_header("Content-Type", "text/plain")
                .body(ADS_TXT),
        ),
    );

    let result = fetcher()
        .fetch(&format!("http://{}", server.addr()))
        .await
        .expect("fetch should succeed");

    assert_eq!(result.request.domain, server.addr().ip().to_string());
    assert!(result.request.url.ends_with("/ads.txt"));
    assert_eq!(result.result.data_records.len(), 2);
    assert!(result.result.warnings.is_empty());
    assert_eq!(result.result.body.len(), 2);
}

#[tokio::test]
async fn test_fetch_with_ad_systems_flags_unknown_names() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/ads.txt")).respond_with(
            status_code(200)
                .append_header("Content-Type", "text/plain; charset=utf-8")
                .body(ADS_TXT),
        ),
    );

    let registry = KnownAdSystems::from_entries([(1, "greenadexchange", "greenadexchange.com")]);
    let result = fetcher()
        .with_ad_systems(Arc::new(registry))
        .fetch(&format!("http://{}/", server.addr()))
        .await
        .expect("fetch should succeed");

    assert_eq!(result.result.data_records.len(), 2);
    assert_eq!(result.result.warnings.len(), 1);
    assert_eq!(result.result.warnings[0].severity, Severity::Low);
    assert_eq!(result.result.warnings[0].line_index, 2);
}

#[tokio::test]
async fn test_fetch_body_too_large() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/ads.txt")).respond_with(
            status_code(200)
                .append_header("Content-Type", "text/plain")
                .body(ADS_TXT),
        ),
    );

    let config = FetchConfig {
        max_body_size: 16,
        ..FetchConfig::default()
    };
    let err = Fetcher::new(config)
        .unwrap()
        .fetch(&format!("http://{}", server.addr()))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::BodyTooLarge { limit: 16, .. }));
}

#[tokio::test]
async fn test_fetch_unreachable_host_is_transport_error() {
    // Bind then drop a listener so the port is very likely closed
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let err = fetcher()
        .fetch(&format!("http://{addr}"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }));
}
