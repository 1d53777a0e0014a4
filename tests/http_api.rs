mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use common::*;
use fa_stats::config::AppConfig;
use fa_stats::database::memory_store::InMemoryRecordStore;
use fa_stats::routes::build_router;
use fa_stats::state::AppState;

fn app(store: Arc<InMemoryRecordStore>) -> Router {
    build_router(AppState::new(service(store), AppConfig::local("memory://")))
}

async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn lists_teams_filtered_by_type() {
    let store = seeded_store().await;

    let (status, body) = send(app(store), "GET", "/api/teams?type=club&division=Premier").await;

    assert_eq!(status, StatusCode::OK);
    let teams = body.as_array().unwrap();
    assert_eq!(teams.len(), 3);
    assert_eq!(teams[0]["id"], "arsenal");
    assert_eq!(teams[0]["type"], "club");
    assert_eq!(teams[0]["colorPrimary"], "#ef0107");
}

#[tokio::test]
async fn unknown_team_is_404_with_envelope() {
    let store = seeded_store().await;

    let (status, body) = send(app(store), "GET", "/api/teams/nobody/stats").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn store_outage_is_503() {
    let store = seeded_store().await;
    store.set_unavailable(true);

    let (status, body) = send(app(store), "GET", "/api/teams/arsenal").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn team_stats_are_camel_case() {
    let store = seeded_store().await;

    let (status, body) = send(app(store), "GET", "/api/teams/arsenal/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["teamId"], "arsenal");
    assert_eq!(body["goalsFor"], 3);
    assert_eq!(body["winPercentage"], 33);
    assert_eq!(body["form"], serde_json::json!(["L", "D", "W"]));
}

#[tokio::test]
async fn fixtures_carry_next_and_last() {
    let store = seeded_store().await;

    let (status, body) = send(app(store), "GET", "/api/teams/arsenal/fixtures").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["teamId"], "arsenal");
    assert_eq!(body["nextFixture"]["id"], "f4");
    assert_eq!(body["lastResult"]["id"], "f3");
    assert!(body.get("next_fixture").is_none());
    assert_eq!(body["past"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["upcoming"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn squad_endpoint_groups_players() {
    let store = seeded_store().await;

    let (status, body) = send(app(store), "GET", "/api/teams/arsenal/squad").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["goalkeepers"][0]["id"], "p2");
    assert_eq!(body["forwards"][0]["number"], 9);
}

#[tokio::test]
async fn compare_requires_both_teams() {
    let store = seeded_store().await;

    let (status, body) = send(app(Arc::clone(&store)), "GET", "/api/compare?team_a=arsenal&team_b=chelsea").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["headToHead"]["matches"], 2);
    assert_eq!(body["metrics"][0]["label"], "League Position");
    assert_eq!(body["metrics"][0]["winner"], "A");

    let (status, _) = send(app(Arc::clone(&store)), "GET", "/api/compare?team_a=arsenal&team_b=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(app(store), "GET", "/api/compare?team_a=arsenal&team_b=nobody").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rankings_validate_limit_and_statistic() {
    let store = seeded_store().await;

    let (status, body) = send(app(Arc::clone(&store)), "GET", "/api/rankings/pl?statistic=goalsScored&limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "standings");
    assert_eq!(body["entries"][0]["teamId"], "arsenal");
    assert_eq!(body["entries"][0]["value"], 40.0);

    let (status, _) = send(app(Arc::clone(&store)), "GET", "/api/rankings/pl?limit=51").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(app(store), "GET", "/api/rankings/pl?statistic=corners").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn clearing_the_cache_forces_refetch() {
    let store = seeded_store().await;
    let app = app(Arc::clone(&store));

    send(app.clone(), "GET", "/api/teams/arsenal").await;
    send(app.clone(), "GET", "/api/teams/arsenal").await;
    assert_eq!(store.calls("fetch_team_by_id"), 1);

    let (status, body) = send(app.clone(), "POST", "/api/cache/clear").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    send(app, "GET", "/api/teams/arsenal").await;
    assert_eq!(store.calls("fetch_team_by_id"), 2);
}

#[tokio::test]
async fn health_reports_store_status() {
    let store = seeded_store().await;

    let (status, body) = send(app(Arc::clone(&store)), "GET", "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "connected");

    store.set_unavailable(true);
    let (_, body) = send(app(store), "GET", "/api/health").await;
    assert_eq!(body["database"], "disconnected");
}
