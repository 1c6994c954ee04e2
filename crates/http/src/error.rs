//! Error handling for the BookTrack HTTP layer.
//!
//! The add-book wire contract predates this service and is kept intact:
//! rejections carry a flat `{"error": "<code>"}` body, and persistence
//! failures carry a fixed human-readable message instead of a code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Error code for a duplicate title.
pub const CODE_TITLE_EXISTS: &str = "title_exists";
/// Error code for a duplicate ISBN.
pub const CODE_ISBN_EXISTS: &str = "isbn_exists";
/// Error code for an ISBN that is not 13 digits.
pub const CODE_ISBN_INVALID: &str = "isbn_invalid";
/// Error code for any other validation failure.
pub const CODE_UNKNOWN: &str = "unknown_error";
/// Body of the generic 500 response. Never replaced with internal detail.
pub const PERSIST_FAILURE_MESSAGE: &str = "An error occurred while adding the book.";

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("title already exists")]
    TitleExists,

    #[error("isbn already exists")]
    IsbnExists,

    #[error("isbn is not a 13-digit number")]
    IsbnInvalid,

    /// A request that fails re-validation for any other reason. The
    /// reason is logged but never sent to the client.
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    #[error("persistence failed")]
    Persistence(#[source] anyhow::Error),
}

impl ApiError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Wire-level error code for a 400 rejection. Persistence failures
    /// carry the fixed message instead of a code.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            ApiError::TitleExists => Some(CODE_TITLE_EXISTS),
            ApiError::IsbnExists => Some(CODE_ISBN_EXISTS),
            ApiError::IsbnInvalid => Some(CODE_ISBN_INVALID),
            ApiError::Validation { .. } => Some(CODE_UNKNOWN),
            ApiError::Persistence(_) => None,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Persistence(anyhow::Error::new(err))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Persistence(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::TitleExists | ApiError::IsbnExists | ApiError::IsbnInvalid => {
                let code = self.code().unwrap_or(CODE_UNKNOWN);
                tracing::info!(error_code = code, "submission rejected");
                (StatusCode::BAD_REQUEST, Json(json!({ "error": code }))).into_response()
            }
            ApiError::Validation { reason } => {
                tracing::info!(%reason, "submission failed validation");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": CODE_UNKNOWN })),
                )
                    .into_response()
            }
            ApiError::Persistence(err) => {
                let error_id = Uuid::new_v4();
                tracing::error!(
                    error_id = %error_id,
                    error.cause_chain = ?err,
                    "persistence failure while adding book"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": PERSIST_FAILURE_MESSAGE })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn duplicate_title_maps_to_400_with_code() {
        let response = ApiError::TitleExists.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "title_exists" }));
    }

    #[tokio::test]
    async fn duplicate_isbn_maps_to_400_with_code() {
        let response = ApiError::IsbnExists.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "isbn_exists" }));
    }

    #[tokio::test]
    async fn invalid_isbn_maps_to_400_with_code() {
        let response = ApiError::IsbnInvalid.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "isbn_invalid" }));
    }

    #[tokio::test]
    async fn validation_failure_maps_to_unknown_error() {
        let response = ApiError::validation("copies is not an integer").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "unknown_error" }));
    }

    #[test]
    fn only_rejections_carry_a_wire_code() {
        assert_eq!(ApiError::TitleExists.code(), Some("title_exists"));
        assert_eq!(ApiError::IsbnExists.code(), Some("isbn_exists"));
        assert_eq!(ApiError::IsbnInvalid.code(), Some("isbn_invalid"));
        assert_eq!(ApiError::validation("x").code(), Some("unknown_error"));
        assert_eq!(ApiError::Persistence(anyhow::anyhow!("boom")).code(), None);
    }

    #[tokio::test]
    async fn persistence_failure_hides_internal_detail() {
        let cause = anyhow::anyhow!("disk full at /var/lib/booktrack");
        let response = ApiError::Persistence(cause).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body, json!({ "error": PERSIST_FAILURE_MESSAGE }));
    }
}
