//! Bulk export, revalidation and the mirrored sitemap

use crate::{test_config, url_entry, urlset};
use seo_mirror::crawler::{parse_urlset, RevalidationStatus};
use seo_mirror::output::render_sitemap_xml;
use seo_mirror::Coordinator;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page(title: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!(
            "<html><head><title>{}</title></head><body><h1>{}</h1></body></html>",
            title, title
        ),
        "text/html",
    )
}

async fn mount_sitemap(server: &MockServer, paths: &[&str]) {
    let entries: Vec<String> = paths
        .iter()
        .map(|p| url_entry(&format!("{}{}", server.uri(), p)))
        .collect();
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(urlset(&entries), "application/xml"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_bulk_export_splits_successes_and_failures() {
    let server = MockServer::start().await;
    mount_sitemap(&server, &["/", "/about", "/broken"]).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(page("Home"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(page("About"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(test_config(&server)).unwrap();
    let export = coordinator.bulk_export().await;

    assert_eq!(export.total_pages, 3);

    let successful: Vec<(&str, &str)> = export
        .successful
        .iter()
        .map(|p| (p.path.as_str(), p.seo.title.as_str()))
        .collect();
    assert_eq!(successful, vec![("/", "Home"), ("/about", "About")]);
    assert_eq!(export.successful[0].url, server.uri());

    assert_eq!(export.failed.len(), 1);
    assert_eq!(export.failed[0].path, "/broken");
    assert_eq!(export.failed[0].url, format!("{}/broken", server.uri()));
    assert!(export.failed[0].error.contains("500"));

    let json = serde_json::to_value(&export).unwrap();
    assert_eq!(json["totalPages"], 3);
    assert_eq!(json["successful"][1]["seo"]["title"], "About");
}

#[tokio::test]
async fn test_revalidate_bypasses_cache() {
    let server = MockServer::start().await;
    mount_sitemap(&server, &["/", "/gone"]).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(page("Home"))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(test_config(&server)).unwrap();

    let cached = coordinator.extract(None).await;
    assert_eq!(cached.title, "Home");
    assert_eq!(coordinator.cache().len(), 1);

    let report = coordinator.revalidate().await;

    assert_eq!(report.total, 2);
    assert_eq!(report.refreshed(), 1);
    assert_eq!(report.paths[0].path, "/");
    assert_eq!(report.paths[0].status, RevalidationStatus::Refreshed);
    assert_eq!(report.paths[1].path, "/gone");
    assert!(matches!(
        &report.paths[1].status,
        RevalidationStatus::Fallback(error) if error.contains("404")
    ));
    assert_eq!(coordinator.cache().len(), 1);
}

#[tokio::test]
async fn test_mirrored_sitemap_maps_origin_onto_gateway() {
    let server = MockServer::start().await;
    let base = server.uri();

    let sitemap = urlset(&[
        format!(
            "<url><loc>{}/pricing</loc><priority>0.9</priority><changefreq>hourly</changefreq><lastmod>2024-05-01</lastmod></url>",
            base
        ),
        format!("<url><loc>{}/blog/</loc><changefreq>often</changefreq></url>", base),
    ]);
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(sitemap, "application/xml"))
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(test_config(&server)).unwrap();
    let urls = coordinator.mirrored_sitemap().await;
    let xml = render_sitemap_xml(&urls).unwrap();
    let mirrored = parse_urlset(&xml).unwrap();

    let locs: Vec<&str> = mirrored.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        locs,
        vec![
            "https://www.example.com/",
            "https://www.example.com/pricing",
            "https://www.example.com/blog/",
        ]
    );

    assert_eq!(mirrored[0].priority, Some(1.0));
    assert_eq!(mirrored[0].change_frequency.as_deref(), Some("daily"));
    assert_eq!(mirrored[1].priority, Some(0.9));
    assert_eq!(mirrored[1].change_frequency.as_deref(), Some("hourly"));
    assert_eq!(mirrored[1].last_modified.as_deref(), Some("2024-05-01T00:00:00Z"));
    assert_eq!(mirrored[2].priority, Some(0.5));
    assert_eq!(mirrored[2].change_frequency.as_deref(), Some("weekly"));
}
