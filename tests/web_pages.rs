mod common;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use axum_test::TestServer;
use tinylink::api::handlers::{health_handler, redirect_handler, shorten_url_handler};
use tinylink::web::routes::page_routes;

async fn create_server() -> (
    TestServer,
    std::sync::Arc<tinylink::infrastructure::persistence::FileUrlRepository>,
    tempfile::TempDir,
) {
    let (state, repo, dir) = common::create_test_state().await;
    let app = Router::new()
        .merge(page_routes())
        .route("/shorten", post(shorten_url_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state);

    (TestServer::new(app).unwrap(), repo, dir)
}

#[tokio::test]
async fn test_index_page() {
    let (server, repo, _dir) = create_server().await;
    common::create_test_url_with_clicks(&repo, "abc123", "https://example.com", 4).await;

    let response = server.get("/").await;

    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("<form"));
    assert!(html.contains("1 short URLs, 4 clicks"));
}

#[tokio::test]
async fn test_list_page_empty() {
    let (server, _repo, _dir) = create_server().await;

    let response = server.get("/list").await;

    response.assert_status_ok();
    assert!(response.text().contains("No URLs found."));
}

#[tokio::test]
async fn test_list_page_shows_records() {
    let (server, repo, _dir) = create_server().await;
    common::create_test_url_with_clicks(&repo, "abc123", "https://example.com/page", 7).await;

    let html = server.get("/list").await.text();

    assert!(html.contains("abc123"));
    assert!(html.contains("https://example.com/page"));
    assert!(html.contains("http://localhost:3000/abc123"));
    assert!(html.contains("<td>7</td>"));
}

#[tokio::test]
async fn test_list_page_escapes_urls() {
    let (server, repo, _dir) = create_server().await;
    common::create_test_url(&repo, "xss001", "https://example.com/<script>").await;

    let html = server.get("/list").await.text();

    assert!(!html.contains("<script>"));
}

#[tokio::test]
async fn test_fixed_routes_take_precedence_over_codes() {
    let (server, _repo, _dir) = create_server().await;

    server.get("/list").await.assert_status_ok();
    server.get("/health").await.assert_status_ok();
    server
        .get("/shorten")
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
