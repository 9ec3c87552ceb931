//! REST round-trips: HTTP request → handler → DataProvider → JSON

use axum::http::StatusCode;
use axum_test::TestServer;
use campus::prelude::*;
use serde_json::{Value, json};

fn mock_server() -> TestServer {
    let router = ServerBuilder::new()
        .with_data_provider(MockDataProvider::new())
        .build()
        .unwrap();
    TestServer::new(router)
}

fn persisting_server() -> TestServer {
    let router = ServerBuilder::new()
        .with_data_provider(InMemoryDataProvider::with_records(seed_subjects()))
        .build()
        .unwrap();
    TestServer::new(router)
}

fn valid_class() -> Value {
    json!({
        "name": "Physics Lab B",
        "description": "Hands-on mechanics experiments.",
        "subjectId": 3,
        "teacherId": "t-42",
        "bannerUrl": "https://cdn.example.com/banners/lab.png",
        "bannerCldPubId": "banners/lab",
        "schedules": [{"day": "tuesday", "startTime": "13:00", "endTime": "15:00"}]
    })
}

fn codes(body: &Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .map(|rows| rows.iter().filter_map(|r| r["code"].as_str()).collect())
        .unwrap_or_default()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health() {
    let server = mock_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({"status": "ok", "service": "campus-admin"}));
}

// ============================================================================
// Lists
// ============================================================================

#[tokio::test]
async fn test_list_filter_by_department() {
    let server = mock_server();
    let response = server
        .get("/subjects")
        .add_query_param(
            "filters",
            r#"[{"field":"department","operator":"eq","value":"math"}]"#,
        )
        .add_query_param("current", 1)
        .add_query_param("pageSize", 1)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(codes(&body), vec!["MATH201"]);
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_list_sort_shorthand_and_pages() {
    let server = mock_server();

    let first: Value = server
        .get("/subjects")
        .add_query_param("sort", "name:asc")
        .add_query_param("current", 1)
        .add_query_param("pageSize", 2)
        .await
        .json();
    assert_eq!(codes(&first), vec!["MATH201", "PHY150"]);
    assert_eq!(first["total"], 3);

    let second: Value = server
        .get("/subjects")
        .add_query_param("sort", "name:asc")
        .add_query_param("current", 2)
        .add_query_param("pageSize", 2)
        .await
        .json();
    assert_eq!(codes(&second), vec!["CS101"]);
    assert_eq!(second["total"], 3);
}

#[tokio::test]
async fn test_list_sorters_json() {
    let server = mock_server();
    let body: Value = server
        .get("/subjects")
        .add_query_param("sorters", r#"[{"field":"code","order":"desc"}]"#)
        .await
        .json();
    assert_eq!(codes(&body), vec!["PHY150", "MATH201", "CS101"]);
}

#[tokio::test]
async fn test_list_malformed_filters_ignored() {
    let server = mock_server();
    let response = server
        .get("/subjects")
        .add_query_param("filters", "not json")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn test_list_unknown_resource_is_empty_on_mock() {
    let server = mock_server();
    let response = server.get("/teachers").await;
    response.assert_status_ok();
    response.assert_json(&json!({"data": [], "total": 0}));
}

// ============================================================================
// Mock writes
// ============================================================================

#[tokio::test]
async fn test_mock_writes_are_not_persisted() {
    let server = mock_server();

    let response = server
        .post("/subjects")
        .json(&json!({"code": "BIO110", "name": "Cell Biology"}))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["code"], "BIO110");
    assert!(created["id"].is_i64());

    let list: Value = server.get("/subjects").await.json();
    assert_eq!(list["total"], 3);

    let updated: Value = server
        .put("/subjects/2")
        .json(&json!({"name": "Calculus III"}))
        .await
        .json();
    assert_eq!(updated, json!({"id": 2, "name": "Calculus III"}));

    let deleted: Value = server.delete("/subjects/2").await.json();
    assert_eq!(deleted, json!({"id": 2}));

    let fetched: Value = server.get("/subjects/2").await.json();
    assert_eq!(fetched["name"], "Calculus II");
}

#[tokio::test]
async fn test_mock_get_one_falls_back_to_id() {
    let server = mock_server();
    let body: Value = server.get("/subjects/99").await.json();
    assert_eq!(body, json!({"id": 99}));
}

#[tokio::test]
async fn test_non_object_body_rejected() {
    let server = mock_server();
    let response = server.post("/subjects").json(&json!(["a"])).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ============================================================================
// Persisting provider
// ============================================================================

#[tokio::test]
async fn test_in_memory_crud_round_trip() {
    let server = persisting_server();

    let created: Value = server
        .post("/subjects")
        .json(&json!({
            "code": "BIO110",
            "name": "Cell Biology",
            "department": "phy",
            "description": "Cells and their machinery."
        }))
        .await
        .json();
    assert_eq!(created["id"], 4);

    let list: Value = server.get("/subjects").await.json();
    assert_eq!(list["total"], 4);

    let response = server
        .put("/subjects/4")
        .json(&json!({"name": "Molecular Biology"}))
        .await;
    response.assert_status_ok();

    let fetched: Value = server.get("/subjects/4").await.json();
    assert_eq!(fetched["name"], "Molecular Biology");

    server.delete("/subjects/4").await.assert_status_ok();

    let response = server.get("/subjects/4").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "RECORD_NOT_FOUND");
}

#[tokio::test]
async fn test_in_memory_invalid_payload() {
    let server = persisting_server();
    let response = server
        .post("/subjects")
        .json(&json!({"code": "BIO110", "department": "biology"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_PAYLOAD");
}

#[tokio::test]
async fn test_in_memory_unknown_resource() {
    let server = persisting_server();
    let response = server.get("/teachers").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "UNKNOWN_RESOURCE");
}

// ============================================================================
// Classes
// ============================================================================

#[tokio::test]
async fn test_create_class_applies_defaults() {
    let server = mock_server();
    let response = server.post("/classes").json(&valid_class()).await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["name"], "Physics Lab B");
    assert_eq!(body["capacity"], 30);
    assert_eq!(body["status"], "active");
    assert_eq!(body["bannerCldPubId"], "banners/lab");
}

#[tokio::test]
async fn test_create_class_validation_errors() {
    let server = mock_server();
    let mut payload = valid_class();
    payload["name"] = json!(" ");
    payload["capacity"] = json!(0);
    payload["bannerUrl"] = json!("not a url");

    let response = server.post("/classes").json(&payload).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let fields = body["details"]["fields"].as_array().unwrap();
    let messages: Vec<&str> = fields.iter().filter_map(Value::as_str).collect();
    assert!(messages.iter().any(|m| m.contains("'name'")));
    assert!(messages.iter().any(|m| m.contains("'capacity'")));
    assert!(messages.iter().any(|m| m.contains("'bannerUrl'")));
}

#[tokio::test]
async fn test_list_classes_on_mock_is_empty() {
    let server = mock_server();
    let response = server.get("/classes").await;
    response.assert_status_ok();
    response.assert_json(&json!({"data": [], "total": 0}));
}
