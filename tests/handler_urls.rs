mod common;

use serde_json::{Value, json};

fn is_generated_code(code: &str) -> bool {
    code.len() == 12
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[tokio::test]
async fn test_add_lookup_remove_roundtrip() {
    let (server, _repo) = common::test_server();

    let response = server
        .post("/api")
        .json(&json!({ "long_url": "https://example.com" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["code"], 200);
    assert_eq!(json["message"], "New URL has been added");
    assert_eq!(json["body"]["outcome"], "created");
    assert_eq!(json["body"]["long_url"], "https://example.com");

    let code = json["body"]["short_url"].as_str().unwrap().to_string();
    assert!(is_generated_code(&code), "unexpected code {code}");

    let response = server
        .get("/api")
        .add_query_param("mode", "by_short")
        .add_query_param("short_url", &code)
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["body"]["long_url"], "https://example.com");
    assert_eq!(json["body"]["short_url"], code.as_str());

    let response = server
        .delete("/api")
        .json(&json!({ "short_url": code }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["message"], "URL has been removed");
    assert_eq!(json["body"]["type"], "short");
    assert_eq!(json["body"]["content"], code.as_str());
    assert_eq!(json["body"]["deleted_count"], 1);

    let response = server
        .get("/api")
        .add_query_param("mode", "by_short")
        .add_query_param("short_url", &code)
        .await;

    response.assert_status_ok();
    assert!(response.json::<Value>()["body"].is_null());
}

#[tokio::test]
async fn test_add_with_custom_code() {
    let (server, _repo) = common::test_server();

    let response = server
        .post("/api")
        .json(&json!({ "long_url": "https://example.com", "short_url": "my-link" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["body"]["short_url"], "my-link");
}

#[tokio::test]
async fn test_add_empty_short_url_generates_code() {
    let (server, _repo) = common::test_server();

    let response = server
        .post("/api")
        .json(&json!({ "long_url": "https://example.com", "short_url": "" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert!(is_generated_code(json["body"]["short_url"].as_str().unwrap()));
}

#[tokio::test]
async fn test_add_taken_code_conflicts() {
    let (server, repo) = common::test_server();
    repo.seed("https://first.example.com", "taken").await;

    let response = server
        .post("/api")
        .json(&json!({ "long_url": "https://second.example.com", "short_url": "taken" }))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "conflict");
    assert_eq!(
        json["error"]["details"]["record"]["long_url"],
        "https://first.example.com"
    );

    let records = repo.snapshot().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].long_url, "https://first.example.com");
}

#[tokio::test]
async fn test_add_force_repoints_code() {
    let (server, repo) = common::test_server();
    let seeded = repo.seed("https://old.example.com", "moveme").await;

    let response = server
        .post("/api")
        .json(&json!({
            "long_url": "https://new.example.com",
            "short_url": "moveme",
            "force": true
        }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["message"], "The short code has been updated");
    assert_eq!(json["body"]["outcome"], "updated");
    assert_eq!(json["body"]["id"], seeded.id);
    assert_eq!(json["body"]["long_url"], "https://new.example.com");

    let records = repo.snapshot().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].long_url, "https://new.example.com");
}

#[tokio::test]
async fn test_add_recorded_long_url_is_reused() {
    let (server, repo) = common::test_server();

    let first = server
        .post("/api")
        .json(&json!({ "long_url": "https://example.com/page" }))
        .await
        .json::<Value>();

    let response = server
        .post("/api")
        .json(&json!({ "long_url": "https://example.com/page" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["message"], "The URL has already been recorded");
    assert_eq!(json["body"]["outcome"], "reused");
    assert_eq!(json["body"]["short_url"], first["body"]["short_url"]);
    assert_eq!(repo.snapshot().await.len(), 1);
}

#[tokio::test]
async fn test_add_rejects_bad_urls() {
    let (server, repo) = common::test_server();

    for long_url in ["ftp://example.com/file", "javascript:alert(1)", "example.com"] {
        let response = server
            .post("/api")
            .json(&json!({ "long_url": long_url }))
            .await;

        response.assert_status_bad_request();
        let json = response.json::<Value>();
        assert_eq!(json["error"]["code"], "invalid_input");
        assert_eq!(json["error"]["message"], "Invalid URL or protocol");
    }

    assert!(repo.snapshot().await.is_empty());
}

#[tokio::test]
async fn test_add_missing_long_url() {
    let (server, _repo) = common::test_server();

    let response = server.post("/api").json(&json!({})).await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Missing long_url"
    );
}

#[tokio::test]
async fn test_add_rejects_unknown_fields() {
    let (server, _repo) = common::test_server();

    let response = server
        .post("/api")
        .json(&json!({ "long_url": "https://example.com", "expires": "tomorrow" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_input");
}

#[tokio::test]
async fn test_add_rejects_reserved_code() {
    let (server, _repo) = common::test_server();

    let response = server
        .post("/api")
        .json(&json!({ "long_url": "https://example.com", "short_url": "health" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "This short code is reserved"
    );
}

#[tokio::test]
async fn test_lookup_by_long() {
    let (server, repo) = common::test_server();
    repo.seed("https://example.com/long", "lng1").await;

    let response = server
        .get("/api")
        .add_query_param("mode", "by_long")
        .add_query_param("long_url", "https://example.com/long")
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["body"]["short_url"], "lng1");
}

#[tokio::test]
async fn test_lookup_invalid_mode() {
    let (server, _repo) = common::test_server();

    let response = server.get("/api").add_query_param("mode", "everything").await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["message"], "Invalid mode");
}

#[tokio::test]
async fn test_lookup_missing_selector() {
    let (server, _repo) = common::test_server();

    let response = server.get("/api").add_query_param("mode", "by_short").await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Missing short_url"
    );
}

#[tokio::test]
async fn test_lookup_rejects_unknown_query_params() {
    let (server, _repo) = common::test_server();

    let response = server
        .get("/api")
        .add_query_param("mode", "by_short")
        .add_query_param("short_url", "abcd")
        .add_query_param("verbose", "1")
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_list_pages() {
    let (server, repo) = common::test_server();
    for i in 0..15 {
        repo.seed(&format!("https://example.com/{i}"), &format!("code{i:02}"))
            .await;
    }

    let response = server
        .get("/api")
        .add_query_param("mode", "list_all")
        .add_query_param("offset", "0")
        .add_query_param("limit", "10")
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>()["body"].clone();
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert_eq!(items[0]["short_url"], "code00");

    let response = server
        .get("/api")
        .add_query_param("mode", "list_all")
        .add_query_param("offset", "10")
        .add_query_param("limit", "10")
        .await;

    let body = response.json::<Value>()["body"].clone();
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["short_url"], "code10");
}

#[tokio::test]
async fn test_list_defaults() {
    let (server, repo) = common::test_server();
    for i in 0..25 {
        repo.seed(&format!("https://example.com/{i}"), &format!("code{i:02}"))
            .await;
    }

    let response = server.get("/api").add_query_param("mode", "list_all").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["body"].as_array().unwrap().len(),
        20
    );
}

#[tokio::test]
async fn test_list_rejects_bad_limits() {
    let (server, _repo) = common::test_server();

    for limit in ["0", "101", "ten", "-1"] {
        let response = server
            .get("/api")
            .add_query_param("mode", "list_all")
            .add_query_param("limit", limit)
            .await;

        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_remove_missing_record_reports_zero() {
    let (server, _repo) = common::test_server();

    let response = server
        .delete("/api")
        .json(&json!({ "short_url": "nothing" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["body"]["deleted_count"], 0);
}

#[tokio::test]
async fn test_remove_requires_short_url() {
    let (server, repo) = common::test_server();
    repo.seed("https://example.com", "keep").await;

    let response = server.delete("/api").json(&json!({})).await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Missing short_url"
    );
    assert_eq!(repo.snapshot().await.len(), 1);
}

#[tokio::test]
async fn test_patch_is_not_implemented() {
    let (server, _repo) = common::test_server();

    let response = server.patch("/api").json(&json!({})).await;

    response.assert_status_not_found();
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["message"], "In progress...");
}

#[tokio::test]
async fn test_other_methods_are_rejected() {
    let (server, _repo) = common::test_server();

    let response = server.put("/api").json(&json!({})).await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["message"], "Invalid method");
}

#[tokio::test]
async fn test_storage_failure_is_opaque() {
    let (server, repo) = common::test_server();
    repo.go_offline();

    let response = server
        .post("/api")
        .json(&json!({ "long_url": "https://example.com" }))
        .await;

    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "storage_failure");
    assert_eq!(json["error"]["details"], json!({}));
}
