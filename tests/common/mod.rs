// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use exercise_tracker::config::Config;
use exercise_tracker::db::UserStore;
use exercise_tracker::routes::create_router;
use exercise_tracker::AppState;
use std::sync::Arc;
use tower::ServiceExt;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Check if the Firestore emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test app backed by the in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let db = UserStore::new_in_memory();

    let state = Arc::new(AppState { config, db });

    (create_router(state.clone()), state)
}

/// Send a urlencoded form POST and return status plus parsed JSON body.
#[allow(dead_code)]
pub async fn post_form(app: &axum::Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY_BYTES)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

/// Send a GET and return status plus parsed JSON body.
#[allow(dead_code)]
pub async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY_BYTES)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

/// Create a user through the API and return its assigned id.
#[allow(dead_code)]
pub async fn create_user(app: &axum::Router, username: &str) -> String {
    let body = format!("username={}", username);
    let (status, json) = post_form(app, "/api/users", &body).await;
    assert_eq!(status, StatusCode::OK, "user creation failed: {}", json);

    json["_id"].as_str().expect("_id in response").to_string()
}
