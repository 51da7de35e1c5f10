//! Integration tests for the HTTP action server
//!
//! Tests the webhook contract the dialogue engine relies on

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use clinicbot::core::{create_router, ActionDispatcher, AuditStore, DirectoryClient};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

fn create_test_router() -> (TempDir, AuditStore, axum::Router) {
    let dir = tempfile::tempdir().unwrap();
    let store = AuditStore::new(dir.path().join("user_logs.db"));
    store.ensure_schema().unwrap();
    let directory = DirectoryClient::new("http://127.0.0.1:1", Duration::from_millis(500)).unwrap();
    let router = create_router(ActionDispatcher::new(directory, store.clone()));
    (dir, store, router)
}

async fn post_webhook(app: axum::Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_endpoint() {
    let (_dir, _store, app) = create_test_router();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_actions_endpoint_lists_all() {
    let (_dir, _store, app) = create_test_router();

    let response = app
        .oneshot(Request::builder().uri("/actions").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    let actions = json["actions"].as_array().unwrap();

    assert_eq!(actions.len(), 6);
    assert!(actions.contains(&json!("action_doctor_info")));
    assert!(actions.contains(&json!("validate_booking_form")));
}

#[tokio::test]
async fn test_unknown_action() {
    let (_dir, _store, app) = create_test_router();

    let (status, json) = post_webhook(app, json!({"next_action": "action_order_pizza", "tracker": {}})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["action_name"], "action_order_pizza");
    assert!(json["error"].as_str().unwrap().contains("action_order_pizza"));
}

#[tokio::test]
async fn test_symptom_check_over_webhook() {
    let (_dir, store, app) = create_test_router();

    let (status, json) = post_webhook(
        app,
        json!({
            "next_action": "action_symptom_check",
            "sender_id": "whatsapp:+15550001",
            "tracker": {
                "sender_id": "whatsapp:+15550001",
                "slots": {"symptom": "Headache"},
                "latest_message": {
                    "text": "I have a Headache",
                    "intent": {"name": "report_symptom"},
                    "entities": [{"entity": "symptom", "value": "Headache"}]
                },
                "events": []
            },
            "domain": {}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["responses"][0]["text"],
        "For Headache, Drink plenty of water and rest. If persistent, consult a doctor."
    );
    assert_eq!(json["events"], json!([]));

    let rows = store.recent(1).unwrap();
    assert_eq!(rows[0].record.symptom.as_deref(), Some("Headache"));
    assert_eq!(rows[0].record.intent.as_deref(), Some("report_symptom"));
}

#[tokio::test]
async fn test_doctor_info_directory_down_still_replies() {
    let (_dir, store, app) = create_test_router();

    let (status, json) = post_webhook(
        app,
        json!({
            "next_action": "action_doctor_info",
            "tracker": {
                "slots": {"doctor_name": "white"},
                "latest_message": {"text": "who is dr white", "intent": {"name": "ask_doctor"}}
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["responses"][0]["text"],
        "Something went wrong while fetching the doctor info."
    );
    assert_eq!(store.count().unwrap(), 1);
}

#[tokio::test]
async fn test_validate_booking_form_over_webhook() {
    let (_dir, store, app) = create_test_router();

    let (status, json) = post_webhook(
        app,
        json!({
            "next_action": "validate_booking_form",
            "tracker": {
                "slots": {"department": "astrology", "preferred_date": null, "preferred_time": null},
                "latest_message": {"text": "astrology", "intent": {"name": "inform"}},
                "events": [
                    {"event": "user", "text": "astrology"},
                    {"event": "slot", "name": "department", "value": "astrology"}
                ]
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["events"],
        json!([{"event": "slot", "name": "department", "value": null}])
    );
    assert_eq!(
        json["responses"][0]["text"],
        "Sorry, we don't have that department. \
         Please choose from Cardiology, Neurology, Dermatology, Orthopedics, or Pediatrics."
    );
    assert_eq!(store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_store_failure_does_not_block_reply() {
    // No schema: every append fails
    let dir = tempfile::tempdir().unwrap();
    let store = AuditStore::new(dir.path().join("missing_table.db"));
    let directory = DirectoryClient::new("http://127.0.0.1:1", Duration::from_millis(500)).unwrap();
    let app = create_router(ActionDispatcher::new(directory, store));

    let (status, json) = post_webhook(
        app,
        json!({
            "next_action": "action_log_handover",
            "tracker": {"latest_message": {"text": "human please"}}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["responses"][0]["text"], "Connecting you to a human representative...");
}
