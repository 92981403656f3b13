// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile create/read/delete tests against the in-memory store.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

mod common;

#[tokio::test]
async fn test_create_profile_for_new_user() {
    let (app, state) = common::create_test_app();
    let user_id = common::seed_user(&state, "Ada").await;
    let token = common::create_test_jwt(user_id, &state.config.jwt_signing_key);

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/profile",
        Some(&token),
        Some(json!({ "status": "Developer", "skills": "js, node" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Developer");
    assert_eq!(body["skills"], json!(["js", "node"]));
    assert_eq!(body["social"], json!({}));
    assert_eq!(body["experience"], json!([]));
    assert_eq!(body["user"]["id"], user_id.to_string());
    assert_eq!(body["user"]["name"], "Ada");
    assert!(body.get("company").is_none());
}

#[tokio::test]
async fn test_update_keeps_unspecified_fields() {
    let (app, state) = common::create_test_app();
    let user_id = common::seed_user(&state, "Grace").await;
    let token = common::create_test_jwt(user_id, &state.config.jwt_signing_key);

    common::send(
        &app,
        "POST",
        "/api/profile",
        Some(&token),
        Some(json!({
            "status": "Developer",
            "skills": "cobol",
            "company": "Navy",
            "bio": "Compilers",
            "twitter": "@grace"
        })),
    )
    .await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/profile",
        Some(&token),
        Some(json!({ "status": "Admiral", "skills": "cobol, fortran", "company": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Admiral");
    assert_eq!(body["skills"], json!(["cobol", "fortran"]));
    // Empty and missing fields are left alone
    assert_eq!(body["company"], "Navy");
    assert_eq!(body["bio"], "Compilers");
    // Social links are rewritten as a whole
    assert_eq!(body["social"], json!({}));

    let (_, me) = common::send(&app, "GET", "/api/profile/me", Some(&token), None).await;
    assert_eq!(me, body);
}

#[tokio::test]
async fn test_create_profile_requires_status_and_skills() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(Uuid::new_v4(), &state.config.jwt_signing_key);

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/profile",
        Some(&token),
        Some(json!({ "company": "Acme" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let msgs: Vec<_> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["msg"].as_str().unwrap())
        .collect();
    assert_eq!(msgs, vec!["Status is required", "Skills is required"]);

    // Nothing was written
    assert!(state.db.list_profiles().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_field_rejected() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(Uuid::new_v4(), &state.config.jwt_signing_key);

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/profile",
        Some(&token),
        Some(json!({ "status": "Developer", "skills": "rust", "user": "someone-else" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "msg": "Invalid request body" }));
}

#[tokio::test]
async fn test_null_status_reports_field_error() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(Uuid::new_v4(), &state.config.jwt_signing_key);

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/profile",
        Some(&token),
        Some(json!({ "status": null, "skills": "rust" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "errors": [
            { "msg": "Status is required", "param": "status", "location": "body" }
        ] })
    );
    assert!(state.db.list_profiles().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_profile_by_user_id() {
    let (app, state) = common::create_test_app();
    let user_id = common::seed_user(&state, "Linus").await;
    let token = common::create_test_jwt(user_id, &state.config.jwt_signing_key);

    common::send(
        &app,
        "POST",
        "/api/profile",
        Some(&token),
        Some(json!({ "status": "Maintainer", "skills": "c, git" })),
    )
    .await;

    let (status, body) = common::send(
        &app,
        "GET",
        &format!("/api/profile/user/{}", user_id),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Maintainer");
    assert_eq!(body["user"]["name"], "Linus");
    assert!(body["user"]["avatar"].is_string());
}

#[tokio::test]
async fn test_get_profile_by_malformed_id() {
    let (app, _) = common::create_test_app();

    let (status, body) =
        common::send(&app, "GET", "/api/profile/user/not-an-object-id", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "msg": "Profile not found" }));
}

#[tokio::test]
async fn test_get_profile_by_unknown_id() {
    let (app, _) = common::create_test_app();

    let (status, body) = common::send(
        &app,
        "GET",
        &format!("/api/profile/user/{}", Uuid::new_v4()),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Profile not found");
}

#[tokio::test]
async fn test_list_profiles_populates_users() {
    let (app, state) = common::create_test_app();

    for name in ["Ada", "Grace"] {
        let user_id = common::seed_user(&state, name).await;
        let token = common::create_test_jwt(user_id, &state.config.jwt_signing_key);
        common::send(
            &app,
            "POST",
            "/api/profile",
            Some(&token),
            Some(json!({ "status": "Developer", "skills": "math" })),
        )
        .await;
    }

    // A profile whose user record is gone still lists, without a name
    let orphan = common::create_test_jwt(Uuid::new_v4(), &state.config.jwt_signing_key);
    common::send(
        &app,
        "POST",
        "/api/profile",
        Some(&orphan),
        Some(json!({ "status": "Ghost", "skills": "haunting" })),
    )
    .await;

    let (status, body) = common::send(&app, "GET", "/api/profile", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let profiles = body.as_array().unwrap();
    assert_eq!(profiles.len(), 3);

    let mut names: Vec<_> = profiles
        .iter()
        .filter_map(|p| p["user"]["name"].as_str())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Ada", "Grace"]);
}

#[tokio::test]
async fn test_delete_profile_removes_user() {
    let (app, state) = common::create_test_app();
    let user_id = common::seed_user(&state, "Temp").await;
    let token = common::create_test_jwt(user_id, &state.config.jwt_signing_key);

    common::send(
        &app,
        "POST",
        "/api/profile",
        Some(&token),
        Some(json!({ "status": "Developer", "skills": "rust" })),
    )
    .await;

    let (status, body) = common::send(&app, "DELETE", "/api/profile", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "user deleted");
    assert!(state.db.get_profile(user_id).await.unwrap().is_none());
    assert!(state.db.get_user(user_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_missing_profile_succeeds() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(Uuid::new_v4(), &state.config.jwt_signing_key);

    let (status, _) = common::send(&app, "DELETE", "/api/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    // And again
    let (status, _) = common::send(&app, "DELETE", "/api/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}
