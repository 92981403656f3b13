// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! DevConnector: developer profiles for a small social network.
//!
//! This crate provides the JSON API behind the profile pages: one profile
//! document per user, experience and education lists, and a GitHub
//! repository lookup.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Database;
use services::GithubClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub github: GithubClient,
}
