// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Axum extractors for route protection.
//!
//! Three levels of protection:
//! - [`Auth`]: any valid session required, otherwise 401
//! - [`AdminOnly`]: valid session with admin role required, otherwise 403
//! - [`OptionalAuth`]: session attached when present, never rejects
//!
//! Extraction prefers a [`SessionUser`] already placed in request
//! extensions by the guard middleware; otherwise the bearer token is
//! decoded directly, so handlers work with or without the middleware
//! layer in front of them.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

use crate::state::AppState;

use super::token::{decode_token, session_from_claims, SessionUser};
use super::AuthError;

/// Extractor requiring a valid session.
#[derive(Debug, Clone)]
pub struct Auth(pub SessionUser);

/// Extractor requiring a valid session with the admin role.
#[derive(Debug, Clone)]
pub struct AdminOnly(pub SessionUser);

/// Extractor that yields a session when one is present, `None` otherwise.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<SessionUser>);

/// Pull the bearer token out of the `Authorization` header.
fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidAuthHeader)
}

/// Resolve the session for a request, from extensions or the header.
fn resolve_session(parts: &Parts, state: &AppState) -> Result<SessionUser, AuthError> {
    if let Some(session) = parts.extensions.get::<SessionUser>() {
        return Ok(session.clone());
    }

    let token = bearer_token(parts)?;
    let claims = decode_token(&state.auth, token)?;
    session_from_claims(&state.storage, claims)
}

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_session(parts, state).map(Auth)
    }
}

impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = resolve_session(parts, state)?;
        if !session.is_admin() {
            return Err(AuthError::InsufficientPermissions);
        }
        Ok(AdminOnly(session))
    }
}

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(resolve_session(parts, state).ok()))
    }
}
