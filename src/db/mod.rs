// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! Handlers talk to [`Database`], which dispatches to Firestore in
//! production or to an in-memory store for local development and tests.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::config::{Config, StoreBackend};
use crate::error::AppError;
use crate::models::{Profile, User};
use crate::services::merger::ProfileUpdate;
use futures_util::{stream, StreamExt, TryStreamExt};
use std::collections::HashMap;
use uuid::Uuid;

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Profiles, keyed by owning user ID
    pub const PROFILES: &str = "profiles";
}

/// Document store shared by all request handlers.
#[derive(Clone)]
pub enum Database {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
}

impl Database {
    /// Open the backend selected in `config`.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        match config.store_backend {
            StoreBackend::Firestore => Ok(Self::Firestore(
                FirestoreDb::new(&config.gcp_project_id).await?,
            )),
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store; data will not survive a restart");
                Ok(Self::Memory(MemoryDb::new()))
            }
        }
    }

    // ─── Users ───────────────────────────────────────────────────

    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        match self {
            Self::Firestore(db) => db.get_user(user_id).await,
            Self::Memory(db) => Ok(db.get_user(user_id)),
        }
    }

    /// Fetch several users at once. Missing users are left out of the map.
    pub async fn get_users(&self, user_ids: &[Uuid]) -> Result<HashMap<Uuid, User>, AppError> {
        stream::iter(user_ids.iter().copied())
            .map(|id| async move { self.get_user(id).await })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .try_filter_map(|user| async move { Ok(user.map(|u| (u.id, u))) })
            .try_collect()
            .await
    }

    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        match self {
            Self::Firestore(db) => db.upsert_user(user).await,
            Self::Memory(db) => {
                db.upsert_user(user);
                Ok(())
            }
        }
    }

    // ─── Profiles ────────────────────────────────────────────────

    pub async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        match self {
            Self::Firestore(db) => db.get_profile(user_id).await,
            Self::Memory(db) => Ok(db.get_profile(user_id)),
        }
    }

    pub async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        match self {
            Self::Firestore(db) => db.list_profiles().await,
            Self::Memory(db) => Ok(db.list_profiles()),
        }
    }

    /// Set the update's fields on the user's profile, creating it if absent.
    pub async fn upsert_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Profile, AppError> {
        match self {
            Self::Firestore(db) => db.upsert_profile(user_id, update).await,
            Self::Memory(db) => Ok(db.upsert_profile(user_id, update)),
        }
    }

    /// Replace a whole profile document.
    pub async fn save_profile(&self, profile: &Profile) -> Result<(), AppError> {
        match self {
            Self::Firestore(db) => db.save_profile(profile).await,
            Self::Memory(db) => {
                db.save_profile(profile);
                Ok(())
            }
        }
    }

    /// Delete a user's profile and then the user account itself.
    ///
    /// Either may already be gone; that is not an error.
    pub async fn delete_profile_and_user(&self, user_id: Uuid) -> Result<(), AppError> {
        match self {
            Self::Firestore(db) => {
                db.delete_profile(user_id).await?;
                db.delete_user(user_id).await?;
            }
            Self::Memory(db) => {
                db.delete_profile(user_id);
                db.delete_user(user_id);
            }
        }

        tracing::info!(user_id = %user_id, "Deleted profile and user");
        Ok(())
    }
}
