// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Session endpoints: login, federated sign-in, session readback,
//! refresh, and the redirect gate.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use tracing::info;

use crate::{
    auth::{
        authenticate, issue_token, resolve_identity, Auth, AuthError, FederatedIdentity,
        OptionalAuth, SessionUser, SESSION_TTL_SECS,
    },
    gate,
    models::{GateQuery, GateResponse, LoginRequest, LoginResponse},
    state::AppState,
    storage::{StoredStudent, StudentRepository},
};

fn session_for(student: &StoredStudent) -> SessionUser {
    SessionUser {
        id: student.id.clone(),
        name: student.full_name.clone(),
        email: student.email.clone(),
        role: student.role,
        profile_complete: student.profile_complete,
        expires_at: Utc::now().timestamp() + SESSION_TTL_SECS,
    }
}

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, body = LoginResponse),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let student = authenticate(&state.storage, &request.email, &request.password)?;
    let token = issue_token(&state.auth, &student)?;
    info!(student_id = %student.id, "login");
    Ok(Json(LoginResponse {
        token,
        user: session_for(&student),
    }))
}

#[utoipa::path(
    post,
    path = "/v1/auth/federated",
    request_body = FederatedIdentity,
    tag = "Auth",
    responses(
        (status = 200, body = LoginResponse),
        (status = 502, description = "Identity could not be resolved")
    )
)]
pub async fn federated_sign_in(
    State(state): State<AppState>,
    Json(identity): Json<FederatedIdentity>,
) -> Result<Json<LoginResponse>, AuthError> {
    let student = resolve_identity(&state.storage, &identity)?;
    let token = issue_token(&state.auth, &student)?;
    Ok(Json(LoginResponse {
        token,
        user: session_for(&student),
    }))
}

#[utoipa::path(
    get,
    path = "/v1/auth/session",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, body = SessionUser),
        (status = 401, description = "No valid session")
    )
)]
pub async fn current_session(Auth(session): Auth) -> Json<SessionUser> {
    Json(session)
}

#[utoipa::path(
    post,
    path = "/v1/auth/refresh",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, body = LoginResponse),
        (status = 401, description = "No valid session")
    )
)]
pub async fn refresh_session(
    State(state): State<AppState>,
    Auth(session): Auth,
) -> Result<Json<LoginResponse>, AuthError> {
    // Re-read the record so role and profile changes made since issuance
    // land in the new token.
    let student = StudentRepository::new(&state.storage)
        .get(&session.id)
        .map_err(|_| AuthError::UnknownSubject)?;
    let token = issue_token(&state.auth, &student)?;
    Ok(Json(LoginResponse {
        token,
        user: session_for(&student),
    }))
}

#[utoipa::path(
    get,
    path = "/v1/auth/gate",
    params(GateQuery),
    tag = "Auth",
    responses((status = 200, body = GateResponse))
)]
pub async fn evaluate_gate(
    OptionalAuth(session): OptionalAuth,
    Query(query): Query<GateQuery>,
) -> Json<GateResponse> {
    let decision = gate::decide(session.as_ref(), &query.path);
    Json(GateResponse::from(decision))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{hash_password, Role};
    use crate::state::AuthConfig;
    use crate::storage::{DocumentStore, StoragePaths};
    use tempfile::TempDir;

    fn test_state() -> (AppState, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let mut store = DocumentStore::new(StoragePaths::new(dir.path()));
        store.initialize().expect("initialize");
        let state = AppState::new(
            store,
            AuthConfig::new(Some("auth-handler-secret".to_string())),
        );
        (state, dir)
    }

    fn seed(state: &AppState, email: &str, password: &str, role: Role) -> StoredStudent {
        let now = Utc::now();
        let student = StoredStudent {
            id: uuid::Uuid::new_v4().to_string(),
            provider_account_id: None,
            full_name: "Seeded".to_string(),
            email: email.to_string(),
            password_hash: Some(hash_password(password).unwrap()),
            avatar: None,
            age: None,
            role,
            profile_complete: true,
            courses_enrolled: Vec::new(),
            rank: 0,
            quiz_progress: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        StudentRepository::new(&state.storage)
            .create(&student)
            .unwrap();
        student
    }

    #[tokio::test]
    async fn login_returns_token_and_session() {
        let (state, _dir) = test_state();
        seed(&state, "user@example.com", "hunter2hunter2", Role::Student);

        let response = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "user@example.com".to_string(),
                password: "hunter2hunter2".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.user.email, "user@example.com");
        let claims = crate::auth::decode_token(&state.auth, &response.0.token).unwrap();
        assert_eq!(claims.role, Some(Role::Student));
    }

    #[tokio::test]
    async fn login_with_bad_password_is_unauthorized() {
        let (state, _dir) = test_state();
        seed(&state, "user@example.com", "hunter2hunter2", Role::Student);

        let result = login(
            State(state),
            Json(LoginRequest {
                email: "user@example.com".to_string(),
                password: "wrong".to_string(),
            }),
        )
        .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn federated_sign_in_creates_and_signs_in() {
        let (state, _dir) = test_state();

        let response = federated_sign_in(
            State(state.clone()),
            Json(FederatedIdentity {
                provider_account_id: "acct-1".to_string(),
                email: "fed@example.com".to_string(),
                name: "Fed".to_string(),
                avatar: None,
            }),
        )
        .await
        .unwrap();

        assert!(!response.0.user.profile_complete);
        assert_eq!(response.0.user.role, Role::Student);
    }

    #[tokio::test]
    async fn refresh_picks_up_role_change() {
        let (state, _dir) = test_state();
        let mut student = seed(&state, "user@example.com", "hunter2hunter2", Role::Student);
        let session = session_for(&student);

        student.role = Role::Admin;
        StudentRepository::new(&state.storage)
            .update(&student)
            .unwrap();

        let response = refresh_session(State(state), Auth(session)).await.unwrap();
        assert_eq!(response.0.user.role, Role::Admin);
    }

    #[tokio::test]
    async fn gate_redirects_anonymous_navigation() {
        let response = evaluate_gate(
            OptionalAuth(None),
            Query(GateQuery {
                path: "/courses/abc".to_string(),
            }),
        )
        .await;
        assert_eq!(response.0.redirect_to, Some("/login"));
    }
}
