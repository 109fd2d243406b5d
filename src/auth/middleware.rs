// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Route-guard middleware.
//!
//! Layered in front of protected route groups with
//! `middleware::from_fn_with_state`. The guard decodes the bearer token
//! once, inserts the resulting [`SessionUser`] into request extensions,
//! and short-circuits with the guard's error response before the handler
//! runs. Handlers behind the guard pick the session up through the
//! [`Auth`](super::Auth) extractor without re-verifying the token.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::state::AppState;

use super::token::{decode_token, session_from_claims, SessionUser};
use super::AuthError;

fn session_from_request(state: &AppState, request: &Request) -> Result<SessionUser, AuthError> {
    let header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidAuthHeader)?;

    let claims = decode_token(&state.auth, token)?;
    session_from_claims(&state.storage, claims)
}

/// Guard requiring any valid session.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match session_from_request(&state, &request) {
        Ok(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}

/// Guard requiring a valid session with the admin role.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match session_from_request(&state, &request) {
        Ok(session) if session.is_admin() => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Ok(_) => AuthError::InsufficientPermissions.into_response(),
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::issue_token;
    use crate::auth::Role;
    use crate::state::AuthConfig;
    use crate::storage::{DocumentStore, StoragePaths, StoredStudent};
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_state() -> (AppState, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let mut store = DocumentStore::new(StoragePaths::new(dir.path()));
        store.initialize().expect("initialize");
        let state = AppState {
            storage: store,
            auth: AuthConfig {
                secret: Some("middleware-test-secret".to_string()),
            },
        };
        (state, dir)
    }

    fn test_student(role: Role) -> StoredStudent {
        StoredStudent {
            id: "s-1".to_string(),
            provider_account_id: None,
            full_name: "Alex Doe".to_string(),
            email: "alex@example.com".to_string(),
            password_hash: None,
            avatar: None,
            age: None,
            role,
            profile_complete: true,
            courses_enrolled: Vec::new(),
            rank: 0,
            quiz_progress: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Router whose handler counts invocations, to prove the guard
    /// short-circuits before the handler runs.
    fn counting_router(
        state: AppState,
        admin: bool,
    ) -> (Router, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let handler_hits = hits.clone();
        let handler = move || {
            let hits = handler_hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                "ok"
            }
        };

        let router = if admin {
            Router::new()
                .route("/guarded", get(handler))
                .layer(middleware::from_fn_with_state(state.clone(), require_admin))
                .with_state(state)
        } else {
            Router::new()
                .route("/guarded", get(handler))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_session,
                ))
                .with_state(state)
        };
        (router, hits)
    }

    #[tokio::test]
    async fn unauthenticated_request_never_reaches_handler() {
        let (state, _dir) = test_state();
        let (router, hits) = counting_router(state, false);

        let response = router
            .oneshot(
                HttpRequest::builder()
                    .uri("/guarded")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn valid_session_passes_through() {
        let (state, _dir) = test_state();
        let token = issue_token(&state.auth, &test_student(Role::Student)).unwrap();
        let (router, hits) = counting_router(state, false);

        let response = router
            .oneshot(
                HttpRequest::builder()
                    .uri("/guarded")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn admin_guard_rejects_student_with_403() {
        let (state, _dir) = test_state();
        let token = issue_token(&state.auth, &test_student(Role::Student)).unwrap();
        let (router, hits) = counting_router(state, true);

        let response = router
            .oneshot(
                HttpRequest::builder()
                    .uri("/guarded")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn admin_guard_accepts_admin() {
        let (state, _dir) = test_state();
        let token = issue_token(&state.auth, &test_student(Role::Admin)).unwrap();
        let (router, hits) = counting_router(state, true);

        let response = router
            .oneshot(
                HttpRequest::builder()
                    .uri("/guarded")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
