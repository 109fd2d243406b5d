// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Federated sign-in resolution.
//!
//! Maps an identity asserted by an external provider onto a local student
//! record. Resolution order:
//!
//! 1. provider account id match: the returning-user path
//! 2. email match: link the provider id to the existing account, at most
//!    once, then sign that account in
//! 3. otherwise: create a fresh student with the default role and an
//!    incomplete profile, and no password
//!
//! Any storage failure aborts the sign-in; there is no partially-linked
//! fallback session.

use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::storage::{DocumentStore, StorageError, StoredStudent, StudentRepository};

use super::{AuthError, Role};

/// Identity attributes asserted by the external provider.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FederatedIdentity {
    /// Stable account id at the provider
    pub provider_account_id: String,
    /// Verified email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Avatar URL, if the provider supplied one
    #[serde(default)]
    pub avatar: Option<String>,
}

fn upstream(err: StorageError) -> AuthError {
    AuthError::UpstreamIdentity(err.to_string())
}

/// Resolve a federated identity to a student record, creating or linking
/// as needed.
pub fn resolve_identity(
    store: &DocumentStore,
    identity: &FederatedIdentity,
) -> Result<StoredStudent, AuthError> {
    let repo = StudentRepository::new(store);

    match repo.find_by_provider(&identity.provider_account_id) {
        Ok(student) => return Ok(student),
        Err(StorageError::NotFound(_)) => {}
        Err(err) => return Err(upstream(err)),
    }

    match repo.find_by_email(&identity.email) {
        Ok(student) => {
            info!(student_id = %student.id, "linking federated identity to existing account");
            return repo
                .link_provider(&student.id, &identity.provider_account_id)
                .map_err(upstream);
        }
        Err(StorageError::NotFound(_)) => {}
        Err(err) => return Err(upstream(err)),
    }

    let now = Utc::now();
    let student = StoredStudent {
        id: Uuid::new_v4().to_string(),
        provider_account_id: Some(identity.provider_account_id.clone()),
        full_name: identity.name.clone(),
        email: identity.email.clone(),
        password_hash: None,
        avatar: identity.avatar.clone(),
        age: None,
        role: Role::Student,
        profile_complete: false,
        courses_enrolled: Vec::new(),
        rank: 0,
        quiz_progress: Vec::new(),
        created_at: now,
        updated_at: now,
    };
    info!(student_id = %student.id, "created student from federated identity");
    repo.create(&student).map_err(upstream)?;
    Ok(student)
}
