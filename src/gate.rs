// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Client redirect gate.
//!
//! Pure routing policy evaluated for every page navigation: given the
//! current session (or none) and the requested path, decide whether to
//! render the page or redirect. The decision is also served over
//! `GET /v1/auth/gate` so thin clients can delegate the policy instead
//! of duplicating it.
//!
//! Rules, in order:
//! 1. excluded paths always render (the onboarding and auth pages, and
//!    everything under `/api`)
//! 2. no session on any other path redirects to `/login`
//! 3. a session with an incomplete profile redirects to
//!    `/complete-profile`
//! 4. an admin path without the admin role redirects home
//! 5. otherwise render

use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::SessionUser;

/// Paths exempt from the gate. Prefix matches so nested onboarding pages
/// and every API route stay reachable.
pub const EXCLUDED_PATHS: [&str; 5] = [
    "/complete-profile",
    "/create-teacher-profile",
    "/login",
    "/register",
    "/api",
];

/// Prefix for admin-only pages.
pub const ADMIN_PREFIX: &str = "/admin";

/// Outcome of the gate for one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateDecision {
    /// Render the requested page
    Render,
    /// Redirect to `/login`
    RedirectLogin,
    /// Redirect to `/complete-profile`
    RedirectCompleteProfile,
    /// Redirect to `/`
    RedirectHome,
}

impl GateDecision {
    /// Redirect target, `None` when the page renders.
    pub fn redirect_to(self) -> Option<&'static str> {
        match self {
            GateDecision::Render => None,
            GateDecision::RedirectLogin => Some("/login"),
            GateDecision::RedirectCompleteProfile => Some("/complete-profile"),
            GateDecision::RedirectHome => Some("/"),
        }
    }
}

fn is_excluded(path: &str) -> bool {
    EXCLUDED_PATHS
        .iter()
        .any(|excluded| path == *excluded || path.starts_with(&format!("{excluded}/")))
}

/// Decide the gate outcome for a navigation.
pub fn decide(session: Option<&SessionUser>, path: &str) -> GateDecision {
    if is_excluded(path) {
        return GateDecision::Render;
    }

    let Some(session) = session else {
        return GateDecision::RedirectLogin;
    };

    if !session.profile_complete {
        return GateDecision::RedirectCompleteProfile;
    }

    let is_admin_path = path == ADMIN_PREFIX || path.starts_with(&format!("{ADMIN_PREFIX}/"));
    if is_admin_path && !session.is_admin() {
        return GateDecision::RedirectHome;
    }

    GateDecision::Render
}
