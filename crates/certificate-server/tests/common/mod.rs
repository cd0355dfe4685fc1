//! Shared helpers for HTTP-level tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use certificate_core::User;
use certificate_server::{create_router, AppState, MemoryStore};
use serde_json::Value;
use tower::ServiceExt;

pub const CERT_1: &str = r#"{"id":"1","title":"first cert","createdAt":"29 MAR 2019","ownerId":"10","year":2019,"note":"This is the first certificate","transfer":{"to":"","status":""}}"#;
pub const CERT_1_UPDATED: &str = r#"{"id":"1","title":"Updated cert","createdAt":"29 MAR 2019","ownerId":"10","year":2019,"note":"This is the updated first certificate","transfer":{"to":"","status":""}}"#;
pub const CERT_2: &str = r#"{"id":"2","title":"second cert","createdAt":"29 MAR 2019","ownerId":"10","year":2019,"note":"This is the second certificate","transfer":{"to":"","status":""}}"#;

/// Router backed by a fresh store with users 10, 11 and 12
pub fn app() -> Router {
    let store = Arc::new(MemoryStore::with_users([
        User::new("10", "test10@test.com", "Test User 10"),
        User::new("11", "test11@test.com", "Test User 11"),
        User::new("12", "test12@test.com", "Test User 12"),
    ]));
    create_router(Arc::new(AppState::new(store)))
}

/// Send one request and return the status and body text
pub async fn send(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub fn json(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

/// `{"<id>": <certificate>, ...}` built from raw certificate JSON
pub fn registry_of(certs: &[(&str, &str)]) -> Value {
    let map = certs
        .iter()
        .map(|(id, cert)| (id.to_string(), json(cert)))
        .collect::<serde_json::Map<_, _>>();
    Value::Object(map)
}
