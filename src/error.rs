// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A single failed field check, as reported to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct FieldError {
    pub msg: String,
    pub param: String,
    pub location: String,
}

impl FieldError {
    /// Error for a field in the JSON request body.
    pub fn body(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: param.into(),
            location: "body".to_string(),
        }
    }
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No token, authorization denied")]
    Unauthorized,

    #[error("Token is not valid")]
    InvalidToken,

    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("No github profile found")]
    GithubNotFound,

    #[error("GitHub API error: {0}")]
    GithubApi(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub const NO_PROFILE: &'static str = "There is no profile for this user";
    pub const PROFILE_NOT_FOUND: &'static str = "Profile not found";
    const SERVER_ERROR: &'static str = "Server Error";

    /// The current user has no profile document yet.
    pub fn no_profile() -> Self {
        AppError::NotFound(Self::NO_PROFILE.to_string())
    }

    /// The requested profile does not exist (or the id was malformed).
    pub fn profile_not_found() -> Self {
        AppError::NotFound(Self::PROFILE_NOT_FOUND.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
#[serde(untagged)]
enum ErrorResponse {
    Message { msg: String },
    Fields { errors: Vec<FieldError> },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Unauthorized | AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::Message {
                    msg: self.to_string(),
                },
            ),
            AppError::Validation(errors) => {
                tracing::debug!(count = errors.len(), "Request failed validation");
                (StatusCode::BAD_REQUEST, ErrorResponse::Fields { errors })
            }
            AppError::BadRequest(msg) | AppError::NotFound(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::Message { msg })
            }
            AppError::GithubNotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse::Message {
                    msg: self.to_string(),
                },
            ),
            AppError::GithubApi(msg) => {
                tracing::error!(error = %msg, "GitHub API error");
                server_error()
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                server_error()
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                server_error()
            }
        };

        (status, Json(body)).into_response()
    }
}

fn server_error() -> (StatusCode, ErrorResponse) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse::Message {
            msg: AppError::SERVER_ERROR.to_string(),
        },
    )
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
