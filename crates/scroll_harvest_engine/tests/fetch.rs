use std::sync::Arc;

use scroll_harvest_core::Item;
use scroll_harvest_engine::{
    FailureKind, FetchSettings, HttpPageSource, IncrementalScraper, NullSink, PageSource,
    ScraperSettings, SourceError,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING: &str = r#"<html><body>
<a class="targets-list-item" href="/targets/1"><h4 class="target-tooltip-codename-header">Caf&eacute; Owl</h4></a>
</body></html>"#;

#[tokio::test]
async fn http_source_returns_decoded_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/targets"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(LISTING, "text/html; charset=utf-8"))
        .mount(&server)
        .await;

    let url = format!("{}/targets", server.uri());
    let source = HttpPageSource::new(&url, FetchSettings::default()).unwrap();
    let html = source.load().await.expect("load ok");
    assert!(html.contains("targets-list-item"));
    assert_eq!(source.describe(), url);
}

#[tokio::test]
async fn http_source_feeds_the_scraper() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/targets"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(LISTING, "text/html"))
        .mount(&server)
        .await;

    let url = format!("{}/targets", server.uri());
    let source = Arc::new(HttpPageSource::new(&url, FetchSettings::default()).unwrap());
    let settings = ScraperSettings {
        item_delay: std::time::Duration::ZERO,
        ..ScraperSettings::default()
    };
    let scraper = IncrementalScraper::new(source, settings, Arc::new(NullSink));

    scraper.extract().await;
    assert_eq!(
        scraper.snapshot(),
        vec![Item::new("/targets/1", "Caf\u{e9} Owl")]
    );
}

#[tokio::test]
async fn http_source_fails_on_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());
    let source = HttpPageSource::new(&url, FetchSettings::default()).unwrap();
    match source.load().await {
        Err(SourceError::Fetch(err)) => assert_eq!(err.kind, FailureKind::HttpStatus(404)),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn http_source_rejects_too_large_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/html")
                .set_body_string("01234567890"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let url = format!("{}/large", server.uri());
    let source = HttpPageSource::new(&url, settings).unwrap();
    match source.load().await {
        Err(SourceError::Fetch(err)) => assert_eq!(
            err.kind,
            FailureKind::TooLarge {
                max_bytes: 10,
                actual: Some(11)
            }
        ),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn http_source_rejects_non_html() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let url = format!("{}/data", server.uri());
    let source = HttpPageSource::new(&url, FetchSettings::default()).unwrap();
    match source.load().await {
        Err(SourceError::Fetch(err)) => assert_eq!(
            err.kind,
            FailureKind::UnsupportedContentType {
                content_type: "application/json".to_string()
            }
        ),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn invalid_url_is_rejected_up_front() {
    let err = HttpPageSource::new("not a url", FetchSettings::default()).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
