// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

use crate::storage::DocumentStore;

/// Signing configuration for session tokens.
///
/// `secret` stays `None` when `SESSION_SECRET` is not set; verification
/// then fails closed and every token is rejected.
#[derive(Clone)]
pub struct AuthConfig {
    pub secret: Option<String>,
}

impl AuthConfig {
    pub fn new(secret: Option<String>) -> Self {
        Self { secret }
    }
}

/// Shared application state, cloned per request by axum.
#[derive(Clone)]
pub struct AppState {
    pub storage: DocumentStore,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(storage: DocumentStore, auth: AuthConfig) -> Self {
        Self { storage, auth }
    }
}
