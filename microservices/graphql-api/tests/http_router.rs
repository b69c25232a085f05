//! End-to-end tests through the axum router

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use graphql_api::{build_schema, create_router, AppState, MemoryStore, SharedStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> (Router, AppState) {
    let store: SharedStore = Arc::new(MemoryStore::new());
    let state = AppState::new(build_schema(store.clone()), store);
    (create_router(state.clone()), state)
}

async fn post_graphql(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/graphql")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_query_and_variables_over_http() {
    let (app, state) = app();

    let (status, body) = post_graphql(
        app.clone(),
        json!({
            "query": "mutation ($dto: CreateUserInput!) { createUser(dto: $dto) { id name } }",
            "variables": { "dto": { "name": "http", "balance": 3.5 } }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("errors").is_none());
    let id = body["data"]["createUser"]["id"].as_str().unwrap().to_string();

    let (_, body) = post_graphql(
        app,
        json!({
            "query": "query ($id: UUID!) { user(id: $id) { name balance } }",
            "variables": { "id": id }
        }),
    )
    .await;
    assert_eq!(body["data"], json!({ "user": { "name": "http", "balance": 3.5 } }));

    assert_eq!(state.metrics.requests.get(), 2);
    assert_eq!(state.metrics.failed_requests.get(), 0);
    assert_eq!(state.metrics.in_flight.get(), 0);
}

#[tokio::test]
async fn test_errors_are_reported_in_envelope() {
    let (app, state) = app();

    let (status, body) = post_graphql(app, json!({ "query": "{ users { nope } }" })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_null());
    assert!(!body["errors"].as_array().unwrap().is_empty());
    assert_eq!(state.metrics.failed_requests.get(), 1);
}

#[tokio::test]
async fn test_graphql_endpoint_is_post_only() {
    let (app, _) = app();

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/graphql?query=%7Busers%7Bid%7D%7D")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_health_and_ready() {
    let (app, _) = app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let health: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(health["healthy"], true);
    assert_eq!(health["service_id"], "graphql-api");

    let response = app
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let ready: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(ready["ready"], true);
    assert_eq!(ready["dependencies"][0]["name"], "memory");
}
