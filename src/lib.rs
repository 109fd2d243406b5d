// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! OpenCourse - Course Platform Backend Service
//!
//! This crate provides the API behind a course platform: students sign in
//! with a password or a federated identity, browse the catalog, enroll in
//! courses, and take quizzes; admins manage teachers, categories, courses,
//! lessons, and quizzes.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Sessions, credentials, and the role-based route guard
//! - `gate` - The client redirect gate policy
//! - `storage` - JSON document storage with per-entity repositories

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod gate;
pub mod models;
pub mod state;
pub mod storage;
