// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile routes.
//!
//! Public routes read profiles; protected routes edit the caller's own
//! profile. The auth middleware is applied in routes/mod.rs.

use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::models::{EducationInput, EntryKind, ExperienceInput, Profile, ProfileInput, ProfileView};
use crate::services::merger::{append_entry, build_update_fields, remove_entry, NewEntry};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Routes anyone can call.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/profile", get(list_profiles))
        .route("/api/profile/user/{user_id}", get(get_profile_by_user))
        .route("/api/profile/github/{username}", get(get_github_repos))
}

/// Routes that act on the authenticated user's profile.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/profile/me", get(get_my_profile))
        .route("/api/profile", post(upsert_profile).delete(delete_profile))
        .route("/api/profile/experience", put(add_experience))
        .route("/api/profile/experience/{exp_id}", delete(delete_experience))
        .route("/api/profile/education", put(add_education))
        .route("/api/profile/education/{edu_id}", delete(delete_education))
}

/// Plain message response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct MessageResponse {
    pub msg: String,
}

/// Attach the owner's name and avatar to a profile.
async fn populate(state: &AppState, profile: Profile) -> Result<ProfileView> {
    let owner = state.db.get_user(profile.user).await?;
    Ok(ProfileView::new(profile, owner.as_ref()))
}

/// Load the caller's profile, failing if they have not created one.
async fn load_own_profile(state: &AppState, user_id: Uuid) -> Result<Profile> {
    state.db.get_profile(user_id).await?.ok_or_else(|| {
        tracing::debug!(user_id = %user_id, "No profile for user");
        AppError::no_profile()
    })
}

// ─── Own Profile ─────────────────────────────────────────────

/// Get the current user's profile.
async fn get_my_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileView>> {
    let profile = load_own_profile(&state, user.user_id).await?;
    Ok(Json(populate(&state, profile).await?))
}

/// Create or update the current user's profile.
///
/// Fields left out of the form keep their stored values, except `social`,
/// which is replaced as a whole.
async fn upsert_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(input): ValidatedJson<ProfileInput>,
) -> Result<Json<ProfileView>> {
    let update = build_update_fields(input)?;
    let profile = state.db.upsert_profile(user.user_id, &update).await?;

    tracing::info!(
        user_id = %user.user_id,
        fields = ?update.field_mask(),
        "Profile upserted"
    );

    Ok(Json(populate(&state, profile).await?))
}

/// Delete the current user's profile and account.
async fn delete_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MessageResponse>> {
    state.db.delete_profile_and_user(user.user_id).await?;

    Ok(Json(MessageResponse {
        msg: "user deleted".to_string(),
    }))
}

// ─── Public Profiles ─────────────────────────────────────────

/// List all profiles.
async fn list_profiles(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ProfileView>>> {
    let profiles = state.db.list_profiles().await?;

    let owner_ids: Vec<Uuid> = profiles.iter().map(|p| p.user).collect();
    let owners = state.db.get_users(&owner_ids).await?;

    let views = profiles
        .into_iter()
        .map(|profile| {
            let owner = owners.get(&profile.user);
            ProfileView::new(profile, owner)
        })
        .collect();

    Ok(Json(views))
}

/// Get a profile by its owner's user ID.
async fn get_profile_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileView>> {
    let user_id = Uuid::parse_str(&user_id).map_err(|_| AppError::profile_not_found())?;

    let profile = state
        .db
        .get_profile(user_id)
        .await?
        .ok_or_else(AppError::profile_not_found)?;

    Ok(Json(populate(&state, profile).await?))
}

// ─── Experience & Education ──────────────────────────────────

async fn add_experience(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(input): ValidatedJson<ExperienceInput>,
) -> Result<Json<ProfileView>> {
    add_entry(&state, user.user_id, input.into()).await
}

async fn delete_experience(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(exp_id): Path<String>,
) -> Result<Json<ProfileView>> {
    delete_entry(&state, user.user_id, &exp_id, EntryKind::Experience).await
}

async fn add_education(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(input): ValidatedJson<EducationInput>,
) -> Result<Json<ProfileView>> {
    add_entry(&state, user.user_id, input.into()).await
}

async fn delete_education(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(edu_id): Path<String>,
) -> Result<Json<ProfileView>> {
    delete_entry(&state, user.user_id, &edu_id, EntryKind::Education).await
}

async fn add_entry(state: &AppState, user_id: Uuid, entry: NewEntry) -> Result<Json<ProfileView>> {
    let kind = entry.kind();
    let profile = load_own_profile(state, user_id).await?;

    let profile = append_entry(profile, entry);
    state.db.save_profile(&profile).await?;

    tracing::info!(user_id = %user_id, kind = ?kind, "Profile entry added");
    Ok(Json(populate(state, profile).await?))
}

async fn delete_entry(
    state: &AppState,
    user_id: Uuid,
    entry_id: &str,
    kind: EntryKind,
) -> Result<Json<ProfileView>> {
    let profile = load_own_profile(state, user_id).await?;

    let profile = remove_entry(profile, entry_id, kind);
    state.db.save_profile(&profile).await?;

    tracing::info!(user_id = %user_id, entry_id, kind = ?kind, "Profile entry removed");
    Ok(Json(populate(state, profile).await?))
}

// ─── GitHub ──────────────────────────────────────────────────

/// Get a GitHub user's first few repositories.
async fn get_github_repos(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let repos = state.github.list_repos(&username).await?;
    Ok(Json(repos))
}
