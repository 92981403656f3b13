// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod github;
pub mod merger;

pub use github::GithubClient;
pub use merger::{append_entry, build_update_fields, remove_entry, NewEntry, ProfileUpdate};
