//! Page resolution against a mock origin

use crate::{test_config, url_entry, urlset};
use seo_mirror::crawler::PageDescriptor;
use seo_mirror::Coordinator;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn xml_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "application/xml")
}

fn html_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html")
}

#[tokio::test]
async fn test_sitemap_with_two_pages() {
    let server = MockServer::start().await;
    let base = server.uri();

    let sitemap = urlset(&[
        format!("<url><loc>{}/</loc><priority>1.0</priority></url>", base),
        format!(
            "<url><loc>{}/about</loc><priority>0.5</priority><changefreq>monthly</changefreq></url>",
            base
        ),
    ]);
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(xml_response(sitemap))
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(test_config(&server)).unwrap();
    let pages = coordinator.resolve_pages().await;

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].url, format!("{}/", base));
    assert_eq!(pages[0].priority, Some(1.0));
    assert_eq!(pages[1].url, format!("{}/about", base));
    assert_eq!(pages[1].priority, Some(0.5));
    assert_eq!(pages[1].change_frequency.as_deref(), Some("monthly"));

    assert_eq!(coordinator.page_paths().await, vec!["/", "/about"]);
}

#[tokio::test]
async fn test_sitemap_index_keeps_listing_order_and_skips_failed_child() {
    let server = MockServer::start().await;
    let base = server.uri();

    let index = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>{base}/sitemap-a.xml</loc></sitemap>
  <sitemap><loc>{base}/sitemap-broken.xml</loc></sitemap>
  <sitemap><loc>{base}/sitemap-b.xml</loc></sitemap>
  <sitemap><loc>{base}/sitemap-a.xml</loc></sitemap>
</sitemapindex>"#
    );
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(xml_response(index))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sitemap-a.xml"))
        .respond_with(xml_response(urlset(&[
            url_entry(&format!("{}/a1", base)),
            url_entry(&format!("{}/a2", base)),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sitemap-broken.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sitemap-b.xml"))
        .respond_with(xml_response(urlset(&[url_entry(&format!("{}/b1", base))])))
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(test_config(&server)).unwrap();
    let urls: Vec<String> = coordinator
        .resolve_pages()
        .await
        .into_iter()
        .map(|page| page.url)
        .collect();

    assert_eq!(
        urls,
        vec![
            format!("{}/a1", base),
            format!("{}/a2", base),
            format!("{}/b1", base),
        ]
    );
}

#[tokio::test]
async fn test_sitemap_index_fanout_is_capped() {
    let server = MockServer::start().await;
    let base = server.uri();

    let children: String = (0..12)
        .map(|i| format!("<sitemap><loc>{}/child-{}.xml</loc></sitemap>", base, i))
        .collect();
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(xml_response(format!("<sitemapindex>{}</sitemapindex>", children)))
        .mount(&server)
        .await;

    for i in 0..12 {
        Mock::given(method("GET"))
            .and(path(format!("/child-{}.xml", i)))
            .respond_with(xml_response(urlset(&[url_entry(&format!(
                "{}/page-{}",
                base, i
            ))])))
            .expect(if i < 10 { 1 } else { 0 })
            .mount(&server)
            .await;
    }

    let coordinator = Coordinator::new(test_config(&server)).unwrap();
    let pages = coordinator.resolve_pages().await;

    assert_eq!(pages.len(), 10);
    assert_eq!(pages[0].url, format!("{}/page-0", base));
    assert_eq!(pages[9].url, format!("{}/page-9", base));
}

#[tokio::test]
async fn test_missing_sitemap_falls_back_to_link_discovery() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let home = r##"<html><body>
        <a href="/about">About</a>
        <a href="/about?ref=nav">About again</a>
        <a href="contact">Contact</a>
        <a href="#top">Top</a>
        <a href="mailto:hi@example.com">Mail</a>
        <a href="https://elsewhere.test/page">Elsewhere</a>
        <a href="/">Home</a>
    </body></html>"##;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(home))
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(test_config(&server)).unwrap();
    let pages = coordinator.resolve_pages().await;

    assert_eq!(
        pages,
        vec![
            PageDescriptor::new(base.clone()).with_priority(1.0),
            PageDescriptor::new(format!("{}/about", base)).with_priority(0.8),
            PageDescriptor::new(format!("{}/contact", base)).with_priority(0.8),
        ]
    );
    assert_eq!(coordinator.page_paths().await, vec!["/", "/about", "/contact"]);
}

#[tokio::test]
async fn test_empty_urlset_falls_back_to_link_discovery() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(xml_response(urlset(&[])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(r#"<a href="/pricing">Pricing</a>"#))
        .expect(1)
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(test_config(&server)).unwrap();
    let pages = coordinator.resolve_pages().await;

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].url, format!("{}/pricing", base));
}

#[tokio::test]
async fn test_malformed_sitemap_falls_back_to_link_discovery() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(html_response("<html><body>Not a sitemap</body></html>"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response("<html><body>No links</body></html>"))
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(test_config(&server)).unwrap();
    let pages = coordinator.resolve_pages().await;

    assert_eq!(pages, vec![PageDescriptor::new(server.uri()).with_priority(1.0)]);
}

#[tokio::test]
async fn test_everything_failing_yields_single_entry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(test_config(&server)).unwrap();
    let pages = coordinator.resolve_pages().await;

    assert_eq!(pages, vec![PageDescriptor::new(server.uri()).with_priority(1.0)]);
    assert_eq!(coordinator.page_paths().await, vec!["/"]);
}
