mod common;

use axum::{Router, http::StatusCode, routing::post};
use axum_test::TestServer;
use serde_json::json;
use tinylink::api::handlers::{shorten_handler, shorten_url_handler};
use tinylink::domain::repositories::UrlRepository;

async fn create_server() -> (
    TestServer,
    std::sync::Arc<tinylink::infrastructure::persistence::FileUrlRepository>,
    tempfile::TempDir,
) {
    let (state, repo, dir) = common::create_test_state().await;
    let app = Router::new()
        .route("/shorten", post(shorten_url_handler))
        .route("/api/shorten", post(shorten_handler))
        .with_state(state);

    (TestServer::new(app).unwrap(), repo, dir)
}

#[tokio::test]
async fn test_shorten_single_url_success() {
    let (server, _repo, _dir) = create_server().await;

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "example.com/some/page" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let code = json["short_code"].as_str().unwrap();

    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(json["original_url"], "https://example.com/some/page");
    assert_eq!(
        json["short_url"],
        format!("{}/{}", common::TEST_BASE_URL, code)
    );
}

#[tokio::test]
async fn test_shorten_same_url_is_idempotent() {
    let (server, repo, _dir) = create_server().await;

    let first = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .json::<serde_json::Value>();

    let second = server
        .post("/shorten")
        .json(&json!({ "url": "  https://example.com  " }))
        .await
        .json::<serde_json::Value>();

    assert_eq!(first["short_code"], second["short_code"]);
    assert_eq!(repo.aggregate_stats().await.unwrap().total_urls, 1);
}

#[tokio::test]
async fn test_shorten_empty_url() {
    let (server, repo, _dir) = create_server().await;

    let response = server.post("/shorten").json(&json!({ "url": "   " })).await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "empty_input");
    assert_eq!(repo.aggregate_stats().await.unwrap().total_urls, 0);
}

#[tokio::test]
async fn test_shorten_invalid_format() {
    let (server, _repo, _dir) = create_server().await;

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "http://a.b" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_format");
}

#[tokio::test]
async fn test_shorten_too_long() {
    let (server, _repo, _dir) = create_server().await;

    let url = format!("https://example.com/{}", "a".repeat(2100));
    let response = server.post("/shorten").json(&json!({ "url": url })).await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "too_long");
    assert!(json["error"]["details"]["length"].as_u64().unwrap() > 2048);
}

#[tokio::test]
async fn test_batch_shorten_success() {
    let (server, _repo, _dir) = create_server().await;

    let response = server
        .post("/api/shorten")
        .json(&json!({
            "urls": [
                { "url": "https://example.com" },
                { "url": "rust-lang.org" }
            ]
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["summary"]["total"], 2);
    assert_eq!(json["summary"]["successful"], 2);
    assert_eq!(json["summary"]["failed"], 0);

    let items = json["items"].as_array().unwrap();
    assert_eq!(items[0]["original_url"], "https://example.com");
    assert_eq!(items[1]["url"], "rust-lang.org");
    assert_eq!(items[1]["original_url"], "https://rust-lang.org");
    assert_ne!(items[0]["short_code"], items[1]["short_code"]);
}

#[tokio::test]
async fn test_batch_shorten_partial_failure() {
    let (server, _repo, _dir) = create_server().await;

    let response = server
        .post("/api/shorten")
        .json(&json!({
            "urls": [
                { "url": "https://valid.com" },
                { "url": "" },
                { "url": "nodot" }
            ]
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["summary"]["total"], 3);
    assert_eq!(json["summary"]["successful"], 1);
    assert_eq!(json["summary"]["failed"], 2);

    let items = json["items"].as_array().unwrap();
    assert!(items[0]["short_code"].is_string());
    assert_eq!(items[1]["error"]["code"], "empty_input");
    assert_eq!(items[2]["error"]["code"], "invalid_format");
}

#[tokio::test]
async fn test_batch_shorten_duplicate_in_same_batch() {
    let (server, _repo, _dir) = create_server().await;

    let response = server
        .post("/api/shorten")
        .json(&json!({
            "urls": [
                { "url": "https://example.com" },
                { "url": "https://example.com" }
            ]
        }))
        .await;

    let json = response.json::<serde_json::Value>();
    let items = json["items"].as_array().unwrap();

    assert_eq!(items[0]["short_code"], items[1]["short_code"]);
}

#[tokio::test]
async fn test_batch_shorten_empty_batch() {
    let (server, _repo, _dir) = create_server().await;

    let response = server
        .post("/api/shorten")
        .json(&json!({ "urls": [] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_batch_shorten_too_many_urls() {
    let (server, _repo, _dir) = create_server().await;

    let urls: Vec<_> = (0..101)
        .map(|i| json!({ "url": format!("https://example{i}.com") }))
        .collect();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "urls": urls }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["details"]["urls"][0]["code"], "length");
}
