// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-local document store for development and tests.

use crate::models::{Profile, User};
use crate::services::merger::ProfileUpdate;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// In-memory users and profiles. Clones share the same maps.
#[derive(Clone, Default)]
pub struct MemoryDb {
    users: Arc<DashMap<Uuid, User>>,
    profiles: Arc<DashMap<Uuid, Profile>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_user(&self, user_id: Uuid) -> Option<User> {
        self.users.get(&user_id).map(|u| u.value().clone())
    }

    pub fn upsert_user(&self, user: &User) {
        self.users.insert(user.id, user.clone());
    }

    pub fn delete_user(&self, user_id: Uuid) {
        self.users.remove(&user_id);
    }

    pub fn get_profile(&self, user_id: Uuid) -> Option<Profile> {
        self.profiles.get(&user_id).map(|p| p.value().clone())
    }

    /// All profiles, ordered by owner ID so listings are stable.
    pub fn list_profiles(&self) -> Vec<Profile> {
        let mut profiles: Vec<Profile> = self
            .profiles
            .iter()
            .map(|p| p.value().clone())
            .collect();
        profiles.sort_by_key(|p| p.user);
        profiles
    }

    /// Apply `update` under the map's shard lock, creating the profile if needed.
    pub fn upsert_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> Profile {
        let mut entry = self
            .profiles
            .entry(user_id)
            .or_insert_with(|| Profile::new(user_id));
        update.apply_to(&mut entry);
        entry.clone()
    }

    pub fn save_profile(&self, profile: &Profile) {
        self.profiles.insert(profile.user, profile.clone());
    }

    pub fn delete_profile(&self, user_id: Uuid) {
        self.profiles.remove(&user_id);
    }
}
