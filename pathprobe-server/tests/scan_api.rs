use std::{collections::HashSet, sync::Arc};

use axum::http::StatusCode;
use pathprobe_config::Config;
use pathprobe_core::{Dictionary, MockProber, ProbeOutcome};
use pathprobe_model::{ErrorBody, ScanResponse, ScanStatus};
use serde_json::{Value, json};

mod common;
use common::{spawn_target, test_server, test_server_with_prober};

fn never_probed() -> Arc<MockProber> {
    let mut prober = MockProber::new();
    prober.expect_probe().never();
    Arc::new(prober)
}

#[tokio::test]
async fn scan_returns_found_files_and_exhausted_message() {
    let target = spawn_target(&["a", "c"]).await;
    let mut config = Config::default();
    config.scanner.concurrency = 2;
    let server =
        test_server(config, Dictionary::from_entries(["a", "b", "c"]));

    let response = server
        .post("/scan")
        .json(&json!({ "site": format!("http://{target}") }))
        .await;

    response.assert_status_ok();
    let body: ScanResponse = response.json();
    let files: HashSet<String> = body.files.into_iter().collect();
    let expected = HashSet::from([
        format!("http://{target}/a"),
        format!("http://{target}/c"),
    ]);
    assert_eq!(files, expected);
    assert_eq!(body.status, ScanStatus::Exhausted);
    assert_eq!(body.message, "scanned all 3 entries.");
    assert_eq!(body.stats.entries, 3);
    assert_eq!(body.stats.not_found, 1);
}

#[tokio::test]
async fn versioned_route_reports_cap() {
    let target = spawn_target(&["a", "b", "c", "d"]).await;
    let mut config = Config::default();
    config.scanner.concurrency = 1;
    config.scanner.max_results = 2;
    let server =
        test_server(config, Dictionary::from_entries(["a", "b", "c", "d"]));

    let response = server
        .post("/api/v1/scan")
        .json(&json!({ "site": format!("http://{target}/") }))
        .await;

    response.assert_status_ok();
    let body: ScanResponse = response.json();
    assert_eq!(body.files.len(), 2);
    assert_eq!(body.status, ScanStatus::CapReached);
    assert_eq!(
        body.message,
        "stopped early after finding 2 files (result cap reached)."
    );
    // One worker stops right after the second hit.
    assert_eq!(body.stats.probed, 2);
    assert_eq!(body.stats.skipped, 2);
}

#[tokio::test]
async fn missing_site_is_bad_request_without_probing() {
    let server = test_server_with_prober(
        Dictionary::from_entries(["a"]),
        never_probed(),
    );

    let response = server.post("/scan").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: ErrorBody = response.json();
    assert_eq!(body.error.status, 400);
    assert!(body.error.message.starts_with("Invalid site URL"));
}

#[tokio::test]
async fn non_http_scheme_is_bad_request_without_probing() {
    let server = test_server_with_prober(
        Dictionary::from_entries(["a"]),
        never_probed(),
    );

    for site in ["ftp://example.com", "example.com", "http://"] {
        let response =
            server.post("/scan").json(&json!({ "site": site })).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let server = test_server_with_prober(
        Dictionary::from_entries(["a"]),
        never_probed(),
    );

    let response = server
        .post("/scan")
        .text("{\"site\": ")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["status"], 400);
}

#[tokio::test]
async fn mocked_prober_drives_response() {
    let mut prober = MockProber::new();
    prober
        .expect_probe()
        .times(2)
        .returning(|candidate| {
            if candidate.url().ends_with("/admin") {
                ProbeOutcome::Found
            } else {
                ProbeOutcome::NotFound(404)
            }
        });
    let server = test_server_with_prober(
        Dictionary::from_entries(["admin", "login"]),
        Arc::new(prober),
    );

    let response = server
        .post("/scan")
        .json(&json!({ "site": "https://example.test/some/page" }))
        .await;

    response.assert_status_ok();
    let body: ScanResponse = response.json();
    assert_eq!(body.files, vec!["https://example.test/admin".to_string()]);
}

#[tokio::test]
async fn health_reports_dictionary_and_settings() {
    let server = test_server_with_prober(
        Dictionary::from_entries(["a", "b"]),
        never_probed(),
    );

    let ping = server.get("/ping").await;
    ping.assert_status_ok();
    assert_eq!(ping.json::<Value>()["status"], "ok");

    let health = server.get("/health").await;
    health.assert_status_ok();
    let body: Value = health.json();
    assert_eq!(body["checks"]["dictionary"]["entries"], 2);
    assert_eq!(body["checks"]["scanner"]["concurrency"], 5);
    assert_eq!(body["checks"]["scanner"]["method"], "HEAD");
}
