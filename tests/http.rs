//! Router behaviour through `tower::ServiceExt`

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use common::{FakeEngine, FakeStore};
use incident_search::config::Settings;
use incident_search::search::ListingItem;
use incident_search::web::{create_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn settings() -> Settings {
    let mut settings = Settings::default();
    settings.benchmark.corpus = vec!["layer".to_string(), "card".to_string()];
    settings.benchmark.repetitions = 3;
    settings
}

fn app(engine: FakeEngine, store: FakeStore) -> Router {
    let state = AppState::new(settings(), Arc::new(engine), Arc::new(store)).unwrap();
    create_router(state)
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_search_json_keeps_rank_order() {
    let app = app(FakeEngine::fixed(&["c", "a", "b"]), FakeStore::reversed());

    let (status, body) = get(app, "/?q=disk%20full&format=json").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["query"], "disk full");
    assert_eq!(json["number_of_results"], 3);
    let ids: Vec<&str> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["incident_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
    assert_eq!(json["results"][0]["description"], "fields:c");
}

#[tokio::test]
async fn test_search_html_renders_results() {
    let app = app(FakeEngine::fixed(&["inc-1"]), FakeStore::new());

    let (status, body) = get(app, "/?q=disk").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("inc-1"));
    assert!(body.contains("rule:inc-1"));
    assert!(body.contains("excerpt<br>inc-1"));
}

#[tokio::test]
async fn test_empty_query_shows_listing() {
    let store = FakeStore::new().with_listing(vec![ListingItem {
        incident_id: "inc-42".to_string(),
        rule_id: "rule-9".to_string(),
        target: "db-3".to_string(),
    }]);
    let engine = FakeEngine::fixed(&["unused"]);
    let app = app(engine, store);

    let (status, body) = get(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("inc-42"));
    assert!(body.contains("db-3"));
}

#[tokio::test]
async fn test_sentinel_runs_benchmark() {
    let engine = Arc::new(FakeEngine::fixed(&["a"]).took(Duration::from_millis(2)));
    let state = AppState::new(settings(), engine.clone(), Arc::new(FakeStore::new())).unwrap();
    let app = create_router(state);

    let (status, body) = get(app, "/?q=calculate&format=json").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["executions"], 6);
    assert_eq!(json["stats"]["count"], 6);
    assert_eq!(json["stats"]["unit"], "ms");
    assert_eq!(engine.calls(), 6);
}

#[tokio::test]
async fn test_benchmark_without_samples_is_server_error() {
    let app = app(
        FakeEngine::fixed(&[]).took(Duration::ZERO),
        FakeStore::new(),
    );

    let (status, _) = get(app, "/?q=calculate").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_engine_failure_is_server_error() {
    let app = app(FakeEngine::fixed(&["a"]).failing_on("boom"), FakeStore::new());

    let (status, body) = get(app, "/?q=boom").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("index offline"));
}

#[tokio::test]
async fn test_health() {
    let app = app(FakeEngine::fixed(&[]), FakeStore::new());

    let (status, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
}
