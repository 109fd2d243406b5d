// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! API error responses.
//!
//! All handler failures serialize to the same `{status, error, message}`
//! body the auth guard uses, so clients parse one error shape.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::storage::StorageError;

/// An API error with an HTTP status and a client-facing message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Canonical reason phrase
    pub error: String,
    /// Human-readable detail
    pub message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            error: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(what) => Self::not_found(format!("{what} not found")),
            StorageError::AlreadyExists(what) => Self::conflict(format!("{what} already exists")),
            StorageError::PermissionDenied { .. } => {
                Self::new(StatusCode::FORBIDDEN, err.to_string())
            }
            other => {
                error!(error = %other, "storage failure");
                Self::internal("Internal storage error")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.status, self.error, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn not_found_body_shape() {
        let response = ApiError::not_found("Course c-1 not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], 404);
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["message"], "Course c-1 not found");
    }

    #[test]
    fn storage_not_found_maps_to_404() {
        let err: ApiError = StorageError::NotFound("Course c-1".to_string()).into();
        assert_eq!(err.status, 404);
    }

    #[test]
    fn storage_conflict_maps_to_409() {
        let err: ApiError = StorageError::AlreadyExists("Student s-1".to_string()).into();
        assert_eq!(err.status, 409);
    }

    #[test]
    fn io_failure_hides_detail() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "chmod 000");
        let err: ApiError = StorageError::from(io).into();
        assert_eq!(err.status, 500);
        assert_eq!(err.message, "Internal storage error");
    }
}
