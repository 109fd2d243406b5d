// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Credential verification.
//!
//! Passwords are stored as argon2id PHC strings; verification is
//! constant-time inside the argon2 crate. Every failure mode of
//! [`authenticate`] maps to the same `InvalidCredentials` error so the
//! response never reveals whether an email is registered.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::storage::{DocumentStore, StoredStudent, StudentRepository};

use super::AuthError;

/// Hash a plaintext password into a PHC-format argon2id string.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::InvalidCredentials)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Verify email/password credentials against the student store.
///
/// Read-only: no lockout counters, no side effects. Fails with
/// `InvalidCredentials` when the email is unknown, the account has no
/// password (pure federated account), or the password does not match.
pub fn authenticate(
    store: &DocumentStore,
    email: &str,
    password: &str,
) -> Result<StoredStudent, AuthError> {
    let repo = StudentRepository::new(store);
    let student = repo
        .find_by_email(email)
        .map_err(|_| AuthError::InvalidCredentials)?;

    let hash = student
        .password_hash
        .as_deref()
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(password, hash) {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(student)
}
