// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request body extraction with field validation.

use crate::error::{AppError, FieldError};
use crate::models::FieldOrder;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// Client-facing message for bodies that do not parse; details go to the log.
pub const INVALID_BODY: &str = "Invalid request body";

/// JSON body that has been parsed into `T` and passed `T`'s field rules.
///
/// Malformed JSON and unknown fields are rejected as bad requests; rule
/// failures come back as a list of field errors.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + FieldOrder + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection.body_text(), "Rejected request body");
                AppError::BadRequest(INVALID_BODY.to_string())
            })?;

        value
            .validate()
            .map_err(|errors| AppError::Validation(field_errors::<T>(&errors)))?;

        Ok(Self(value))
    }
}

/// Flatten `validator` errors into client-facing field errors, in the order
/// the fields are declared on `T`.
pub fn field_errors<T: FieldOrder>(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut ranked: Vec<(usize, FieldError)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let rank = T::FIELDS
                .iter()
                .position(|f| *f == &*field)
                .unwrap_or(T::FIELDS.len());

            errs.iter().map(move |e| {
                let msg = e.message.as_deref().unwrap_or(&*e.code);
                (rank, FieldError::body(&*field, msg))
            })
        })
        .collect();

    ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.param.cmp(&b.1.param)));
    ranked.into_iter().map(|(_, err)| err).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExperienceInput;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, StatusCode};
    use axum::{routing::put, Router};
    use tower::ServiceExt; // for oneshot

    async fn submit(body: &str) -> (StatusCode, serde_json::Value) {
        let app = Router::new().route(
            "/",
            put(|ValidatedJson(input): ValidatedJson<ExperienceInput>| async move {
                input.title
            }),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let (status, _) = submit(r#"{"title":"Dev","company":"Acme","from":"2020-01-01"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_errors_follow_declaration_order() {
        let (status, body) = submit(r#"{"location":"Remote"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let params: Vec<_> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["param"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(params, vec!["title", "company", "from"]);
        assert_eq!(body["errors"][0]["msg"], "Title is required");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (status, body) = submit("{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], INVALID_BODY);
    }

    #[tokio::test]
    async fn test_wrong_type_hides_parser_detail() {
        let (status, body) = submit(r#"{"title":7,"company":"Acme","from":"2020-01-01"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "msg": "Invalid request body" }));
    }

    #[tokio::test]
    async fn test_null_required_field_is_field_error() {
        let (status, body) =
            submit(r#"{"title":null,"company":"Acme","from":"2020-01-01"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["param"], "title");
        assert_eq!(body["errors"][0]["msg"], "Title is required");
    }
}
