//! API endpoint tests covering routing, serialization and role gating.

use automation_tracker_api::models::Role;
use automation_tracker_api::routes::{AppState, create_api_router, create_app_state};
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::Duration;
use serde_json::{Value, json};

fn create_test_server() -> (TestServer, AppState) {
    let app_state = create_app_state();
    let router = axum::Router::new()
        .nest("/api/v1", create_api_router())
        .with_state(app_state.clone());
    (TestServer::new(router).unwrap(), app_state)
}

fn token(state: &AppState, role: Role) -> String {
    state
        .jwt
        .issue_token("test-operator", role, Duration::hours(1))
        .unwrap()
}

async fn create_automation(server: &TestServer, state: &AppState, name: &str) -> Value {
    let response = server
        .post("/api/v1/automations")
        .authorization_bearer(token(state, Role::Planner))
        .json(&json!({"name": name}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json()
}

#[tokio::test]
async fn test_openapi_endpoint() {
    let (server, _) = create_test_server();

    let response = server.get("/api/v1/openapi.json").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert!(body.get("paths").is_some());
}

#[tokio::test]
async fn test_create_automation_requires_token() {
    let (server, _) = create_test_server();

    let response = server
        .post("/api/v1/automations")
        .json(&json!({"name": "Conveyor"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_automation_rejects_engineer_role() {
    let (server, state) = create_test_server();

    let response = server
        .post("/api/v1/automations")
        .authorization_bearer(token(&state, Role::Engineer))
        .json(&json!({"name": "Conveyor"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_automation_rejects_garbage_token() {
    let (server, _) = create_test_server();

    let response = server
        .post("/api/v1/automations")
        .authorization_bearer("not-a-jwt")
        .json(&json!({"name": "Conveyor"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_get_automation() {
    let (server, state) = create_test_server();

    let created = create_automation(&server, &state, "Conveyor A").await;
    assert_eq!(created["name"], "Conveyor A");
    assert_eq!(created["status"], "active");
    let id = created["automation_id"].as_str().unwrap();

    // Reads are open, no token needed
    let response = server.get(&format!("/api/v1/automations/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["name"], "Conveyor A");
}

#[tokio::test]
async fn test_create_automation_validation_is_bad_request() {
    let (server, state) = create_test_server();

    let response = server
        .post("/api/v1/automations")
        .authorization_bearer(token(&state, Role::Admin))
        .json(&json!({"name": ""}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn test_get_unknown_automation_is_not_found() {
    let (server, _) = create_test_server();

    let response = server
        .get("/api/v1/automations/00000000-0000-0000-0000-000000000000")
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_automations_plain_and_paginated() {
    let (server, state) = create_test_server();
    create_automation(&server, &state, "One").await;
    create_automation(&server, &state, "Two").await;

    // Without query params: a plain array
    let response = server.get("/api/v1/automations").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);

    // With page/limit: wrapped with the full count
    let response = server.get("/api/v1/automations?page=1&limit=1").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["total"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let response = server.get("/api/v1/automations/all").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_automation_gating_and_merge() {
    let (server, state) = create_test_server();
    let created = create_automation(&server, &state, "Press").await;
    let id = created["automation_id"].as_str().unwrap();

    let response = server
        .patch(&format!("/api/v1/automations/{}", id))
        .authorization_bearer(token(&state, Role::Engineer))
        .json(&json!({"status": "inactive"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = server
        .patch(&format!("/api/v1/automations/{}", id))
        .authorization_bearer(token(&state, Role::Admin))
        .json(&json!({"status": "inactive"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "inactive");
    assert_eq!(body["name"], "Press");
}

#[tokio::test]
async fn test_create_maintenance_role_gating() {
    let (server, state) = create_test_server();
    let automation = create_automation(&server, &state, "Mixer").await;
    let automation_id = automation["automation_id"].as_str().unwrap();

    // Planner may manage machines but not log maintenance
    let response = server
        .post("/api/v1/maintenances")
        .authorization_bearer(token(&state, Role::Planner))
        .json(&json!({"automation_id": automation_id}))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = server
        .post("/api/v1/maintenances")
        .authorization_bearer(token(&state, Role::Engineer))
        .json(&json!({
            "automation_id": automation_id,
            "issue_report": "bearing noise",
            "date": "2026-03-01T09:00:00Z"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "pending");
    assert_eq!(body["issue_report"], "bearing noise");
    assert_eq!(body["automation"]["name"], "Mixer");
}

#[tokio::test]
async fn test_create_maintenance_for_unknown_automation_is_unprocessable() {
    let (server, state) = create_test_server();

    let response = server
        .post("/api/v1/maintenances")
        .authorization_bearer(token(&state, Role::Engineer))
        .json(&json!({
            "automation_id": "00000000-0000-0000-0000-000000000000"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_date_range_rejects_malformed_dates() {
    let (server, _) = create_test_server();

    let response = server
        .get("/api/v1/maintenances/date-range?startDate=bogus&endDate=2026-06-30")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_date_range_empty_result_is_ok() {
    let (server, _) = create_test_server();

    let response = server
        .get("/api/v1/maintenances/date-range?startDate=2020-01-01&endDate=2020-01-31")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_blueprint_routes_require_token_even_for_reads() {
    let (server, state) = create_test_server();

    let response = server.get("/api/v1/blueprint").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    // Any valid role may read and write blueprints
    let response = server
        .get("/api/v1/blueprint")
        .authorization_bearer(token(&state, Role::Engineer))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_blueprint_save_and_fetch() {
    let (server, state) = create_test_server();

    let response = server
        .post("/api/v1/blueprint/save")
        .authorization_bearer(token(&state, Role::Planner))
        .json(&json!({
            "name": "Floor plan",
            "nodes": [{"id": "n1", "position": {"x": 0, "y": 0}}],
            "edges": []
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let created: Value = response.json();
    let id = created["blueprint_id"].as_str().unwrap();

    let response = server
        .get(&format!("/api/v1/blueprint/{}", id))
        .authorization_bearer(token(&state, Role::Engineer))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["name"], "Floor plan");
    assert_eq!(body["nodes"][0]["id"], "n1");
}

#[tokio::test]
async fn test_dashboard_endpoint_shape() {
    let (server, state) = create_test_server();
    let automation = create_automation(&server, &state, "Press").await;
    let automation_id = automation["automation_id"].as_str().unwrap();

    server
        .post("/api/v1/maintenances")
        .authorization_bearer(token(&state, Role::Engineer))
        .json(&json!({"automation_id": automation_id, "date": chrono::Utc::now()}))
        .await;

    let response = server.get("/api/v1/reports/dashboard").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["histogram"].as_array().unwrap().len(), 6);
    assert_eq!(body["snapshot"]["total_maintenance"], 1);
    assert_eq!(body["distribution"]["total"], 1);
    assert!(body.get("trend").is_some());
}
