// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Session token issuing and reading.
//!
//! Sessions are HS256 JWTs signed with the process-wide `SESSION_SECRET`.
//! The payload mirrors the session object the clients consume:
//! `{sub, name, email, role, isValid}` plus the standard `iat`/`exp`
//! pair. Expiry is a fixed 24-hour window; there is no refresh-token
//! rotation, expiry simply forces a new login.
//!
//! Tokens issued by older builds may lack `role` or `isValid`; the reader
//! repairs those lazily from the backing student record instead of
//! rejecting the session.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AuthConfig;
use crate::storage::{DocumentStore, StoredStudent, StudentRepository};

use super::{AuthError, Role};

/// Fixed session lifetime: 24 hours.
///
/// Validation applies the 60-second clock-skew leeway, so a token is
/// actually rejected once expiry plus the leeway has passed, not at the
/// exact `exp` instant.
pub const SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// Clock skew tolerance (60 seconds) applied when validating `exp`/`iat`.
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// JWT claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the student id
    pub sub: String,
    /// Display name
    pub name: String,
    /// Email at issuance time
    pub email: String,
    /// Role at issuance time; absent in tokens from older builds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Profile-completeness flag; absent in tokens from older builds
    #[serde(rename = "isValid", default, skip_serializing_if = "Option::is_none")]
    pub profile_complete: Option<bool>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// The decoded, trusted session derived from a client-held token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    /// Student id
    pub id: String,
    /// Display name
    pub name: String,
    /// Email
    pub email: String,
    /// Authorization role
    pub role: Role,
    /// Whether onboarding is finished
    #[serde(rename = "isValid")]
    pub profile_complete: bool,
    /// Token expiration (Unix timestamp, not serialized)
    #[serde(skip)]
    pub expires_at: i64,
}

impl SessionUser {
    /// Check if this session has at least the privileges of the role.
    pub fn has_role(&self, required: Role) -> bool {
        self.role.has_privilege(required)
    }

    /// Check if this session belongs to an admin.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Mint a session token for a student record.
///
/// The payload snapshots the record's role and profile-completeness at
/// issuance time; staleness is tolerated until expiry or refresh.
pub fn issue_token(config: &AuthConfig, student: &StoredStudent) -> Result<String, AuthError> {
    let secret = config
        .secret
        .as_deref()
        .ok_or(AuthError::VerificationUnavailable)?;

    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        sub: student.id.clone(),
        name: student.full_name.clone(),
        email: student.email.clone(),
        role: Some(student.role),
        profile_complete: Some(student.profile_complete),
        iat: now,
        exp: now + SESSION_TTL_SECS,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::MalformedToken)
}

/// Decode and verify a session token.
///
/// Fails closed with `VerificationUnavailable` when no signing secret is
/// configured: every token is then treated as invalid.
pub fn decode_token(config: &AuthConfig, token: &str) -> Result<SessionClaims, AuthError> {
    let secret = config
        .secret
        .as_deref()
        .ok_or(AuthError::VerificationUnavailable)?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = CLOCK_SKEW_LEEWAY;

    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        jsonwebtoken::errors::ErrorKind::ImmatureSignature => AuthError::TokenNotYetValid,
        _ => AuthError::MalformedToken,
    })?;

    Ok(token_data.claims)
}

/// Build the typed session from decoded claims.
///
/// Lazy repair: when `role` or `isValid` are missing from the claims,
/// they are re-read from the backing student record. A subject that no
/// longer maps to a record yields no session.
pub fn session_from_claims(
    store: &DocumentStore,
    claims: SessionClaims,
) -> Result<SessionUser, AuthError> {
    let (role, profile_complete) = match (claims.role, claims.profile_complete) {
        (Some(role), Some(profile_complete)) => (role, profile_complete),
        _ => {
            let repo = StudentRepository::new(store);
            let student = repo.get(&claims.sub).map_err(|_| AuthError::UnknownSubject)?;
            (
                claims.role.unwrap_or(student.role),
                claims.profile_complete.unwrap_or(student.profile_complete),
            )
        }
    };

    Ok(SessionUser {
        id: claims.sub,
        name: claims.name,
        email: claims.email,
        role,
        profile_complete,
        expires_at: claims.exp,
    })
}
