use std::time::{Duration, Instant};

use favicon_scout::config::FetcherConfig;
use favicon_scout::favicon::{build_http_client, fan_out, find_favicon, FetchContext};
use favicon_scout::FaviconError;
use reqwest::Client;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client() -> Client {
    build_http_client(&FetcherConfig::default()).expect("Failed to build client")
}

async fn mount_page(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_find_favicon_resolves_against_page_host() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/deep/page.html",
        r#"<html><head><link rel="icon" sizes="32x32" href="/static/icon.png"></head></html>"#,
    )
    .await;

    let url = format!("{}/deep/page.html", mock_server.uri());
    let icon = find_favicon(&test_client(), &FetchContext::new(), &url)
        .await
        .unwrap();
    assert_eq!(icon, format!("{}/static/icon.png", mock_server.uri()));
}

#[tokio::test]
async fn test_find_favicon_fallback_uses_normalized_base() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/about", "<html><body>No icons</body></html>").await;

    let host = mock_server.uri().trim_start_matches("http://").to_string();
    let icon = find_favicon(&test_client(), &FetchContext::new(), &format!("{}/about", host))
        .await
        .unwrap();
    assert_eq!(icon, format!("http://{}/favicon.ico", host));
}

#[tokio::test]
async fn test_find_favicon_surfaces_first_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let result = find_favicon(&test_client(), &FetchContext::new(), &mock_server.uri()).await;
    assert!(matches!(
        result,
        Err(FaviconError::HttpStatus { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_batch_mixed_results() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(
        &mock_server,
        "/with-icon",
        r#"<html><head><link rel="shortcut icon" href="/c.ico"></head></html>"#,
    )
    .await;
    mount_page(&mock_server, "/plain", "<html><body>plain</body></html>").await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let with_icon = format!("{}/with-icon", base);
    let plain = format!("{}/plain", base);
    let gone = format!("{}/gone", base);
    let urls = vec![
        with_icon.clone(),
        gone.clone(),
        plain.clone(),
        with_icon.clone(),
    ];

    let entries = fan_out(&test_client(), &FetchContext::new(), urls.clone()).await;
    assert_eq!(entries.len(), urls.len());

    let mut requested = urls.clone();
    let mut returned: Vec<String> = entries.iter().map(|e| e.url.clone()).collect();
    requested.sort();
    returned.sort();
    assert_eq!(requested, returned);

    for entry in &entries {
        if entry.url == with_icon {
            assert!(entry.success);
            assert_eq!(entry.icon, format!("{}/c.ico", base));
        } else if entry.url == plain {
            assert!(entry.success);
            assert_eq!(entry.icon, format!("{}/favicon.ico", base));
        } else {
            assert_eq!(entry.url, gone);
            assert!(!entry.success);
            assert!(entry.icon.is_empty());
        }
    }
}

#[tokio::test]
async fn test_batch_runs_concurrently() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html></html>")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let urls: Vec<String> = (0..8)
        .map(|i| format!("{}/page{}", mock_server.uri(), i))
        .collect();

    let started = Instant::now();
    let entries = fan_out(&test_client(), &FetchContext::new(), urls).await;

    assert_eq!(entries.len(), 8);
    assert!(entries.iter().all(|e| e.success));
    // Sequential fetching would take at least 4 seconds
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_batch_slow_target_does_not_block_others() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html></html>")
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/fast", "<html></html>").await;

    let slow = format!("{}/slow", mock_server.uri());
    let fast = format!("{}/fast", mock_server.uri());

    let ctx = FetchContext::with_timeout(Duration::from_millis(500));
    let entries = fan_out(&test_client(), &ctx, vec![slow.clone(), fast.clone()]).await;

    assert_eq!(entries.len(), 2);
    // The fast page finishes first
    assert_eq!(entries[0].url, fast);
    assert!(entries[0].success);
    assert_eq!(entries[1].url, slow);
    assert!(!entries[1].success);
}

#[tokio::test]
async fn test_cancel_before_completion_fails_every_entry() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html></html>")
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&mock_server)
        .await;

    let urls: Vec<String> = (0..5)
        .map(|i| format!("{}/page{}", mock_server.uri(), i))
        .collect();

    let ctx = FetchContext::new();
    let canceller = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    let entries = tokio::time::timeout(
        Duration::from_secs(5),
        fan_out(&test_client(), &ctx, urls),
    )
    .await
    .expect("batch must finish once its context is cancelled");

    assert_eq!(entries.len(), 5);
    assert!(entries.iter().all(|e| !e.success && e.icon.is_empty()));
}
