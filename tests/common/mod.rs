// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use std::sync::Arc;
use widoo::config::Config;
use widoo::db::Database;
use widoo::routes::create_router;
use widoo::AppState;

/// Create a test app backed by a fresh in-memory database with the shipped
/// migrations applied. Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::default())
}

/// Same, with a caller-supplied configuration.
#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (axum::Router, Arc<AppState>) {
    let db = Database::open(&config.db_path).expect("Failed to open test database");
    db.migrate(&config.migrations_dir)
        .expect("Migrations should apply");

    let state = Arc::new(AppState { config, db });
    (create_router(state.clone()), state)
}

/// Build a body-less request carrying the application key.
#[allow(dead_code)]
pub fn request(method: &str, uri: &str, key: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("application-key", key)
        .body(Body::empty())
        .unwrap()
}

/// Build a JSON POST carrying the application key.
#[allow(dead_code)]
pub fn post_json(uri: &str, key: &str, payload: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("application-key", key)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
