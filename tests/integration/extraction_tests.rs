//! Content extraction and caching against a mock origin

use crate::test_config;
use futures::future::join_all;
use seo_mirror::config::SiteDefaults;
use seo_mirror::Coordinator;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html")
}

const ACME_HOME: &str = r#"<html><head><title>Acme</title></head>
<body><h1>Welcome</h1><p>Twenty-five chars long!!!</p></body></html>"#;

#[tokio::test]
async fn test_extracts_basic_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(ACME_HOME))
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(test_config(&server)).unwrap();
    let summary = coordinator.extract(None).await;

    assert_eq!(summary.title, "Acme");
    assert_eq!(summary.description, SiteDefaults::default().description);
    assert_eq!(summary.headings, vec!["Welcome"]);
    assert_eq!(summary.paragraphs, vec!["Twenty-five chars long!!!"]);
    assert_eq!(summary.favicon_url, format!("{}/favicon.ico", server.uri()));
    assert!(summary.extraction_error.is_none());
}

#[tokio::test]
async fn test_second_extraction_is_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_response(ACME_HOME))
        .expect(1)
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(test_config(&server)).unwrap();
    let url = format!("{}/about", server.uri());

    let first = coordinator.extract(Some(&url)).await;
    let second = coordinator.extract(Some(&url)).await;

    assert_eq!(first, second);
    assert!(second.extraction_error.is_none());
    assert_eq!(coordinator.cache().len(), 1);
}

#[tokio::test]
async fn test_failed_extraction_is_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(test_config(&server)).unwrap();
    let url = format!("{}/flaky", server.uri());

    let first = coordinator.extract(Some(&url)).await;
    let second = coordinator.extract(Some(&url)).await;

    assert!(first.extraction_error.is_some());
    assert!(second.extraction_error.is_some());
    assert_eq!(first.canonical_url, url);
    assert!(coordinator.cache().is_empty());
}

#[tokio::test]
async fn test_concurrent_misses_fetch_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/busy"))
        .respond_with(html_response(ACME_HOME).set_delay(Duration::from_millis(200)))
        .expect(1)
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(test_config(&server)).unwrap();
    let url = format!("{}/busy", server.uri());

    let summaries = join_all((0..5).map(|_| coordinator.extract(Some(&url)))).await;

    assert_eq!(summaries.len(), 5);
    for summary in &summaries {
        assert_eq!(summary.title, "Acme");
        assert!(summary.extraction_error.is_none());
    }
}

#[tokio::test]
async fn test_slow_origin_times_out_to_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html_response(ACME_HOME).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let mut config = test_config(&server);
    config.crawler.fetch_timeout_secs = 1;
    config.fallback.title = "Fallback Title".to_string();
    let coordinator = Coordinator::new(config).unwrap();

    let summary = coordinator
        .extract(Some(&format!("{}/slow", server.uri())))
        .await;

    assert_eq!(summary.title, "Fallback Title");
    let error = summary.extraction_error.unwrap();
    assert!(error.contains("timed out"), "unexpected error: {}", error);
}

#[tokio::test]
async fn test_unusable_bodies_yield_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"title": "<not html>"}"#, "application/json"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(vec![0x89, b'P', b'N', b'G', 0, 0, 0, 13], "image/png"),
        )
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(test_config(&server)).unwrap();

    for page in ["/empty", "/data.json", "/logo.png"] {
        let url = format!("{}{}", server.uri(), page);
        let summary = coordinator.extract(Some(&url)).await;
        assert!(summary.extraction_error.is_some(), "{} was not a fallback", page);
        assert_eq!(summary.canonical_url, url);
    }
    assert!(coordinator.cache().is_empty());
}

#[tokio::test]
async fn test_svg_favicon_preferred_over_shortcut_icon() {
    let server = MockServer::start().await;
    let page = r#"<html><head>
        <title>Icons</title>
        <link rel="shortcut icon" href="/favicon.ico">
        <link rel="icon" type="image/svg+xml" href="/icon.svg">
        <meta property="og:image" content="/og.png">
    </head><body></body></html>"#;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(page))
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(test_config(&server)).unwrap();
    let summary = coordinator.extract(None).await;

    assert_eq!(summary.favicon_url, format!("{}/icon.svg", server.uri()));
    assert_eq!(summary.og_image_url, "/og.png");
}

#[tokio::test]
async fn test_unreachable_origin_yields_fallback() {
    let coordinator =
        Coordinator::new(seo_mirror::config::Config::new("http://127.0.0.1:9")).unwrap();
    let summary = coordinator.extract(None).await;

    assert!(summary.extraction_error.is_some());
    assert_eq!(summary.favicon_url, "http://127.0.0.1:9/favicon.ico");
}
