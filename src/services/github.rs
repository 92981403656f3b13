// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitHub API client for the repository list shown on profiles.

use crate::config::Config;
use crate::error::AppError;

/// Number of repositories shown on a profile.
pub const REPO_LIMIT: u32 = 5;

const USER_AGENT: &str = concat!("devconnector/", env!("CARGO_PKG_VERSION"));

/// GitHub REST API client.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl GithubClient {
    /// Create a client using the GitHub settings in `config`.
    ///
    /// Every request is bounded by `config.github_timeout`.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.github_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Internal(e.into()))?;

        Ok(Self {
            http,
            base_url: config.github_api_url.clone(),
            client_id: config.github_client_id.clone(),
            client_secret: config.github_secret.clone(),
        })
    }

    /// List a user's oldest public repositories, as GitHub returns them.
    ///
    /// Any non-success status from GitHub is reported as
    /// [`AppError::GithubNotFound`]; network and decode failures as
    /// [`AppError::GithubApi`].
    pub async fn list_repos(&self, username: &str) -> Result<serde_json::Value, AppError> {
        let url = format!(
            "{}/users/{}/repos",
            self.base_url,
            urlencoding::encode(username)
        );

        let mut request = self.http.get(&url).query(&[
            ("per_page", REPO_LIMIT.to_string()),
            ("sort", "created".to_string()),
            ("direction", "asc".to_string()),
        ]);

        if let (Some(id), Some(secret)) = (&self.client_id, &self.client_secret) {
            request = request.basic_auth(id, Some(secret));
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::GithubApi(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(username, status = status.as_u16(), "GitHub user lookup failed");
            return Err(AppError::GithubNotFound);
        }

        response
            .json()
            .await
            .map_err(|e| AppError::GithubApi(format!("Invalid response body: {}", e)))
    }
}
