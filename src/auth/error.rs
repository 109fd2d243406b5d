// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Authentication and authorization errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication error type.
///
/// Token-shaped problems all collapse to 401 on the wire: the session
/// reader treats a missing, malformed, or expired token as "no session"
/// rather than distinguishing the failure mode to the client.
#[derive(Debug)]
pub enum AuthError {
    /// No authorization header present
    MissingAuthHeader,
    /// Invalid authorization header format
    InvalidAuthHeader,
    /// Token is malformed
    MalformedToken,
    /// Token signature is invalid
    InvalidSignature,
    /// Token has expired
    TokenExpired,
    /// Token is not yet valid
    TokenNotYetValid,
    /// Signing secret unavailable; all tokens are treated as invalid
    VerificationUnavailable,
    /// Session subject no longer maps to a user record
    UnknownSubject,
    /// Bad login credentials (kept generic to avoid user enumeration)
    InvalidCredentials,
    /// Valid session, insufficient role
    InsufficientPermissions,
    /// Federated provider linkage/creation failure
    UpstreamIdentity(String),
}

/// Guard rejection body: `{status, error, message}`.
#[derive(Serialize)]
struct AuthErrorBody {
    status: u16,
    error: String,
    message: String,
}

impl AuthError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::MalformedToken
            | AuthError::InvalidSignature
            | AuthError::TokenExpired
            | AuthError::TokenNotYetValid
            | AuthError::VerificationUnavailable
            | AuthError::UnknownSubject
            | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
            AuthError::UpstreamIdentity(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Canonical error label carried in the response body.
    pub fn error_label(&self) -> &'static str {
        match self.status_code() {
            StatusCode::FORBIDDEN => "Forbidden",
            StatusCode::BAD_GATEWAY => "UpstreamIdentityError",
            _ => "Unauthorized",
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::MalformedToken
            | AuthError::InvalidSignature
            | AuthError::TokenExpired
            | AuthError::TokenNotYetValid
            | AuthError::VerificationUnavailable
            | AuthError::UnknownSubject => {
                write!(f, "You must be logged in to access this resource")
            }
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::InsufficientPermissions => {
                write!(f, "You do not have permission to access this resource")
            }
            AuthError::UpstreamIdentity(msg) => write!(f, "Sign-in failed: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            status: status.as_u16(),
            error: self.error_label().to_string(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn missing_auth_returns_401_body() {
        let response = AuthError::MissingAuthHeader.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["status"], 401);
        assert_eq!(body["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn insufficient_permissions_returns_403() {
        let response = AuthError::InsufficientPermissions.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error"], "Forbidden");
    }

    #[tokio::test]
    async fn credential_failures_are_indistinguishable() {
        // Unknown email and wrong password must produce identical bodies.
        let a = AuthError::InvalidCredentials.into_response();
        let b = AuthError::InvalidCredentials.into_response();
        assert_eq!(a.status(), b.status());

        let a = to_bytes(a.into_body(), usize::MAX).await.unwrap();
        let b = to_bytes(b.into_body(), usize::MAX).await.unwrap();
        assert_eq!(a, b);
    }
}
