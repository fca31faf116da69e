#![allow(dead_code)]

use std::sync::Arc;

use tempfile::TempDir;
use tinylink::domain::entities::NewUrlRecord;
use tinylink::domain::repositories::UrlRepository;
use tinylink::infrastructure::persistence::FileUrlRepository;
use tinylink::state::AppState;

pub const TEST_BASE_URL: &str = "http://localhost:3000";

/// File-backed repository in a fresh temp dir. Keep the `TempDir` alive for
/// the duration of the test.
pub async fn create_test_repository() -> (Arc<FileUrlRepository>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileUrlRepository::open(dir.path().join("urls.json"))
        .await
        .unwrap();

    (Arc::new(repo), dir)
}

pub async fn create_test_state() -> (AppState, Arc<FileUrlRepository>, TempDir) {
    let (repo, dir) = create_test_repository().await;
    let state = AppState::new(repo.clone() as Arc<dyn UrlRepository>, TEST_BASE_URL);

    (state, repo, dir)
}

pub async fn create_test_url(repo: &FileUrlRepository, code: &str, url: &str) {
    repo.insert(NewUrlRecord::new(code.to_string(), url.to_string()))
        .await
        .unwrap();
}

pub async fn create_test_url_with_clicks(
    repo: &FileUrlRepository,
    code: &str,
    url: &str,
    clicks: i64,
) {
    repo.insert(NewUrlRecord::new(code.to_string(), url.to_string()).with_clicks(clicks))
        .await
        .unwrap();
}
