#![allow(dead_code)]

use std::str::FromStr;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use watch_store::api;
use watch_store::config::StoreConfig;
use watch_store::state::AppState;

/// Configuration backed by a private in-memory database.
///
/// A single connection keeps every query on the same in-memory database.
pub fn test_config() -> StoreConfig {
    StoreConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        "DATABASE_MAX_CONNECTIONS" => Some("1".to_string()),
        _ => None,
    })
    .unwrap()
}

/// Application state over a freshly migrated and seeded catalog.
pub async fn build_test_state() -> AppState {
    AppState::bootstrap(&test_config()).await.unwrap()
}

/// Full router over a freshly migrated and seeded catalog.
pub async fn build_test_app() -> Router {
    api::router(build_test_state().await)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

/// Reads a decimal amount serialized as a JSON string.
pub fn amount(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().unwrap_or_else(|| panic!("expected decimal string, got {value}"))).unwrap()
}

pub fn dollars(d: i64) -> Decimal {
    Decimal::from(d)
}
