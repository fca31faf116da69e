mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use tinylink::api::handlers::url_list_handler;

#[tokio::test]
async fn test_url_list_empty() {
    let (state, _repo, _dir) = common::create_test_state().await;
    let app = Router::new()
        .route("/api/urls", get(url_list_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/api/urls").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["total"], 0);
    assert!(json["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_url_list_newest_first() {
    let (state, repo, _dir) = common::create_test_state().await;
    let app = Router::new()
        .route("/api/urls", get(url_list_handler))
        .with_state(state);

    common::create_test_url(&repo, "older1", "https://older.com").await;
    common::create_test_url_with_clicks(&repo, "newer1", "https://newer.com", 3).await;

    let server = TestServer::new(app).unwrap();

    let json = server.get("/api/urls").await.json::<serde_json::Value>();

    assert_eq!(json["total"], 2);

    let items = json["items"].as_array().unwrap();
    assert_eq!(items[0]["short_code"], "newer1");
    assert_eq!(items[0]["clicks"], 3);
    assert_eq!(items[0]["short_url"], "http://localhost:3000/newer1");
    assert_eq!(items[1]["short_code"], "older1");
}
