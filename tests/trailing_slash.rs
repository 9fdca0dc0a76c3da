mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_add_with_trailing_slash() {
    let (server, repo) = common::app_server();

    let response = server
        .post("/api/")
        .json(&json!({ "long_url": "https://example.com" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["body"]["outcome"], "created");
    assert_eq!(repo.snapshot().await.len(), 1);
}

#[tokio::test]
async fn test_lookup_with_trailing_slash() {
    let (server, repo) = common::app_server();
    repo.seed("https://example.com/page", "slash1").await;

    let response = server
        .get("/api/")
        .add_query_param("mode", "by_short")
        .add_query_param("short_url", "slash1")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["body"]["long_url"],
        "https://example.com/page"
    );
}

#[tokio::test]
async fn test_redirect_with_trailing_slash() {
    let (server, repo) = common::app_server();
    repo.seed("https://example.com", "abcd1").await;

    let response = server.get("/abcd1/").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com");
}

#[tokio::test]
async fn test_served_router_keeps_health_route() {
    let (server, _repo) = common::app_server();

    server.get("/health").await.assert_status_ok();
}
