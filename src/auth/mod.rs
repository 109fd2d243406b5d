// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! # Authentication and Authorization Module
//!
//! The session model for the platform:
//!
//! - [`password`]: argon2id credential verification
//! - [`token`]: HS256 session tokens with a fixed 24-hour lifetime
//! - [`federated`]: external-provider sign-in resolution
//! - [`extractor`] and [`middleware`]: the server-side route guard
//! - [`roles`]: the `STUDENT < TEACHER < ADMIN` privilege ladder
//!
//! Guards fail closed: without a configured signing secret no token is
//! accepted, and a session whose subject no longer exists is no session.

pub mod error;
pub mod extractor;
pub mod federated;
pub mod middleware;
pub mod password;
pub mod roles;
pub mod token;

pub use error::AuthError;
pub use extractor::{AdminOnly, Auth, OptionalAuth};
pub use federated::{resolve_identity, FederatedIdentity};
pub use middleware::{require_admin, require_session};
pub use password::{authenticate, hash_password, verify_password};
pub use roles::Role;
pub use token::{
    decode_token, issue_token, session_from_claims, SessionClaims, SessionUser, SESSION_TTL_SECS,
};
