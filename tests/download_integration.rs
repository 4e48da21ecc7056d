//! Integration tests for the download module.
//!
//! These tests verify list downloads against mock HTTP servers.

use std::path::Path;
use std::time::{Duration, Instant};

use product_images::download::{
    ClientOptions, ImageClient, RequestDelay, RequestPacer, download_from_list,
};
use product_images::{BROWSER_USER_AGENT, DownloadError};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts a 200 image response with the given content type.
async fn mount_image(server: &MockServer, path_str: &str, content_type: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(path_str))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", content_type)
                .set_body_bytes(body.to_vec()),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read output dir")
        .map(|entry| {
            entry
                .expect("dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

fn default_client() -> ImageClient {
    ImageClient::new(&ClientOptions::default()).expect("client builds")
}

#[tokio::test]
async fn test_three_urls_write_three_prefixed_files_with_content_type_extensions() {
    let server = MockServer::start().await;
    mount_image(&server, "/a", "image/jpeg", b"jpeg-bytes").await;
    mount_image(&server, "/b", "image/png", b"png-bytes").await;
    mount_image(&server, "/c", "image/webp", b"webp-bytes").await;
    let temp = TempDir::new().expect("failed to create temp dir");

    let urls = vec![
        format!("{}/a", server.uri()),
        format!("{}/b", server.uri()),
        format!("{}/c", server.uri()),
    ];
    let report = download_from_list(
        &default_client(),
        &urls,
        "主图",
        temp.path(),
        &mut RequestPacer::default(),
    )
    .await
    .expect("batch should succeed");

    assert_eq!(report.attempted, 3);
    assert_eq!(report.completed(), 3);
    assert_eq!(report.failed, 0);
    assert_eq!(
        file_names(temp.path()),
        vec!["主图_1.jpg", "主图_2.png", "主图_3.webp"]
    );
    assert_eq!(
        std::fs::read(temp.path().join("主图_2.png")).expect("read"),
        b"png-bytes"
    );
}

#[tokio::test]
async fn test_404_skips_file_and_keeps_going() {
    let server = MockServer::start().await;
    mount_image(&server, "/a", "image/png", b"one").await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    mount_image(&server, "/c", "image/png", b"three").await;
    let temp = TempDir::new().expect("failed to create temp dir");

    let urls = vec![
        format!("{}/a", server.uri()),
        format!("{}/missing", server.uri()),
        format!("{}/c", server.uri()),
    ];
    let report = download_from_list(
        &default_client(),
        &urls,
        "主图",
        temp.path(),
        &mut RequestPacer::default(),
    )
    .await
    .expect("batch should not fail on 404");

    assert_eq!(report.attempted, 3);
    assert_eq!(report.completed(), 2);
    assert_eq!(report.failed, 1);
    // Index follows the URL position, so the gap stays visible.
    assert_eq!(file_names(temp.path()), vec!["主图_1.png", "主图_3.png"]);
}

#[tokio::test]
async fn test_unknown_content_type_defaults_to_jpg() {
    let server = MockServer::start().await;
    mount_image(&server, "/blob", "application/x-unknown", b"bytes").await;
    let temp = TempDir::new().expect("failed to create temp dir");

    let urls = vec![format!("{}/blob", server.uri())];
    download_from_list(
        &default_client(),
        &urls,
        "sku",
        temp.path(),
        &mut RequestPacer::default(),
    )
    .await
    .expect("batch should succeed");

    assert_eq!(file_names(temp.path()), vec!["sku_1.jpg"]);
}

#[tokio::test]
async fn test_non_200_success_status_is_treated_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/partial"))
        .respond_with(ResponseTemplate::new(206).set_body_bytes(b"part".to_vec()))
        .mount(&server)
        .await;
    let temp = TempDir::new().expect("failed to create temp dir");

    let url = format!("{}/partial", server.uri());
    let err = default_client()
        .fetch_to_file(&url, temp.path(), "详情_1")
        .await
        .expect_err("206 is not 200");

    match err {
        DownloadError::HttpStatus { status, body, .. } => {
            assert_eq!(status, 206);
            assert!(body.is_none(), "body is only captured on request");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(file_names(temp.path()).is_empty());
}

#[tokio::test]
async fn test_error_body_captured_when_enabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/denied"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("Content-Type", "application/json")
                .set_body_bytes(br#"{"error":"forbidden"}"#.to_vec()),
        )
        .mount(&server)
        .await;
    let temp = TempDir::new().expect("failed to create temp dir");

    let client = ImageClient::new(&ClientOptions {
        capture_error_body: true,
        ..ClientOptions::default()
    })
    .expect("client builds");
    let url = format!("{}/denied", server.uri());
    let err = client
        .fetch_to_file(&url, temp.path(), "主图_1")
        .await
        .expect_err("403 fails");

    match err {
        DownloadError::HttpStatus { status, body, .. } => {
            assert_eq!(status, 403);
            assert_eq!(body.as_deref(), Some(br#"{"error":"forbidden"}"#.as_slice()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_error_body_does_not_abort_batch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blocked"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("Content-Type", "text/html")
                .set_body_bytes(b"<html>captcha</html>".to_vec()),
        )
        .mount(&server)
        .await;
    mount_image(&server, "/ok", "image/gif", b"gif").await;
    let temp = TempDir::new().expect("failed to create temp dir");

    let client = ImageClient::new(&ClientOptions {
        capture_error_body: true,
        ..ClientOptions::default()
    })
    .expect("client builds");
    let urls = vec![
        format!("{}/blocked", server.uri()),
        format!("{}/ok", server.uri()),
    ];
    let report = download_from_list(
        &client,
        &urls,
        "sku",
        temp.path(),
        &mut RequestPacer::default(),
    )
    .await
    .expect("batch continues after non-JSON body");

    assert_eq!(report.failed, 1);
    assert_eq!(file_names(temp.path()), vec!["sku_2.gif"]);
}

#[tokio::test]
async fn test_configured_user_agent_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "image/png")
                .set_body_bytes(b"png".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;
    let temp = TempDir::new().expect("failed to create temp dir");

    let client = ImageClient::new(&ClientOptions {
        user_agent: Some(BROWSER_USER_AGENT.to_string()),
        ..ClientOptions::default()
    })
    .expect("client builds");
    let saved = client
        .fetch_to_file(&format!("{}/ua", server.uri()), temp.path(), "主图_1")
        .await
        .expect("download should succeed");

    let requests = server.received_requests().await.expect("recording enabled");
    let sent_ua = requests[0]
        .headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok());
    assert_eq!(sent_ua, Some(BROWSER_USER_AGENT));
    assert_eq!(saved.path, temp.path().join("主图_1.png"));
    assert_eq!(saved.bytes, 3);
    assert_eq!(saved.content_type.as_deref(), Some("image/png"));
}

#[tokio::test]
async fn test_connection_refused_is_skipped() {
    // Bind then drop a listener so the port is closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let uri = format!("http://127.0.0.1:{port}");
    let temp = TempDir::new().expect("failed to create temp dir");

    let urls = vec![format!("{uri}/gone")];
    let report = download_from_list(
        &default_client(),
        &urls,
        "详情",
        temp.path(),
        &mut RequestPacer::default(),
    )
    .await
    .expect("network errors are not fatal");

    assert_eq!(report.failed, 1);
    assert!(file_names(temp.path()).is_empty());
}

#[tokio::test]
async fn test_delay_applies_between_requests_only() {
    let server = MockServer::start().await;
    mount_image(&server, "/1", "image/png", b"1").await;
    mount_image(&server, "/2", "image/png", b"2").await;
    let temp = TempDir::new().expect("failed to create temp dir");

    let mut pacer = RequestPacer::new(RequestDelay::Random {
        min: Duration::from_millis(200),
        max: Duration::from_millis(200),
    });
    let urls = vec![format!("{}/1", server.uri()), format!("{}/2", server.uri())];
    let start = Instant::now();
    let report = download_from_list(&default_client(), &urls, "主图", temp.path(), &mut pacer)
        .await
        .expect("batch should succeed");
    let elapsed = start.elapsed();

    assert_eq!(report.completed(), 2);
    assert!(elapsed >= Duration::from_millis(200), "one pause expected: {elapsed:?}");
    assert!(elapsed < Duration::from_millis(2000), "only one pause expected: {elapsed:?}");
}
