// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use devconnector::config::Config;
use devconnector::db::{Database, FirestoreDb, MemoryDb};
use devconnector::middleware::auth::create_jwt;
use devconnector::models::User;
use devconnector::routes::create_router;
use devconnector::services::GithubClient;
use devconnector::AppState;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

/// Check if emulator is available via environment variable.
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

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Build an app around `config` and `db`.
#[allow(dead_code)]
pub fn create_app_with(config: Config, db: Database) -> (axum::Router, Arc<AppState>) {
    let github = GithubClient::new(&config).expect("GitHub client");
    let state = Arc::new(AppState { config, db, github });
    (create_router(state.clone()), state)
}

/// Create a test app backed by the in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_app_with(Config::test_default(), Database::Memory(MemoryDb::new()))
}

/// Create a test app whose store fails every call.
#[allow(dead_code)]
pub fn create_offline_app() -> (axum::Router, Arc<AppState>) {
    create_app_with(
        Config::test_default(),
        Database::Firestore(FirestoreDb::new_mock()),
    )
}

/// Create a session token for `user_id`.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: Uuid, signing_key: &[u8]) -> String {
    create_jwt(user_id, signing_key).expect("JWT")
}

/// Store a user account and return its ID.
#[allow(dead_code)]
pub async fn seed_user(state: &AppState, name: &str) -> Uuid {
    let user = User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        avatar: Some(format!("//www.gravatar.com/avatar/{}", name.to_lowercase())),
        date: chrono::Utc::now(),
    };
    state.db.upsert_user(&user).await.expect("seed user");
    user.id
}

/// Send a request, optionally authenticated and with a JSON body, and
/// return the status and decoded JSON body (`Null` if the body is empty).
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}
