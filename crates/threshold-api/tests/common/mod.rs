//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use threshold_core::repository::EventRepository;
use threshold_event_store::memory_event_repository::InMemoryEventRepository;
use threshold_event_store::pg_event_repository::PgEventRepository;
use threshold_test_support::FixedClock;
use tower::ServiceExt;

use threshold_api::routes;
use threshold_api::state::AppState;
use threshold_api::world::WorldDirectory;

/// Build application state over `event_repository` with a fixed clock and
/// an empty world directory.
pub fn build_state(event_repository: Arc<dyn EventRepository>) -> AppState {
    AppState::new(
        Arc::new(FixedClock::standard()),
        event_repository,
        Arc::new(WorldDirectory::new()),
    )
}

/// State backed by the in-memory event store.
pub fn memory_state() -> AppState {
    build_state(Arc::new(InMemoryEventRepository::new()))
}

/// State backed by a real `PgEventRepository`.
pub fn pg_state(pool: PgPool) -> AppState {
    build_state(Arc::new(PgEventRepository::new(pool)))
}

/// Build the full app router, as `main.rs` does.
pub fn build_test_app(state: AppState) -> Router {
    routes::app(state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// The texts delivered to `recipient` in a command response.
pub fn texts_for(response: &Value, recipient: uuid::Uuid) -> Vec<String> {
    response["messages"]
        .as_array()
        .map(|messages| {
            messages
                .iter()
                .filter(|m| m["recipient"] == recipient.to_string())
                .filter_map(|m| m["text"].as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}
