// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use ironpulse_shell::access::RouteTable;
use ironpulse_shell::config::Config;
use ironpulse_shell::routes::create_router;
use ironpulse_shell::services::UserDirectory;
use ironpulse_shell::session::SessionRegistry;
use ironpulse_shell::store::{MemoryStore, SettingsStore};
use ironpulse_shell::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app backed by an in-memory store and the demo roster.
/// Returns the router, the shared state, and the raw store backend.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, Arc<MemoryStore>) {
    let backend = Arc::new(MemoryStore::new());
    let state = Arc::new(AppState {
        config: Config::test_default(),
        routes: RouteTable::ironpulse(),
        sessions: SessionRegistry::new(12),
        settings: SettingsStore::new(backend.clone()),
        directory: UserDirectory::demo(),
    });

    (create_router(state.clone()), state, backend)
}

/// Send a request with an optional bearer token and JSON body.
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

/// Read a response body as JSON (`Null` when empty).
#[allow(dead_code)]
pub async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}

/// Send and decode in one step.
#[allow(dead_code)]
pub async fn call(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = send(app, method, uri, token, body).await;
    let status = response.status();
    (status, json_body(response).await)
}

/// Log in as a demo user and return the session token.
#[allow(dead_code)]
pub async fn login(app: &axum::Router, user_id: &str) -> String {
    let (status, body) = call(
        app,
        "POST",
        "/api/session/login",
        None,
        Some(serde_json::json!({ "userId": user_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login as {user_id} failed: {body}");
    body["token"].as_str().unwrap().to_string()
}
