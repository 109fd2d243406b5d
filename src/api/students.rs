// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Student registration, listing, and profile management.
//!
//! Registration is public. The list endpoint is admin-only; profile
//! reads and writes are restricted to the owning student (admins may
//! access any profile).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::{hash_password, AdminOnly, Auth, Role},
    error::ApiError,
    models::{
        PageQuery, RegisterStudentRequest, StudentListResponse, StudentProfile,
        UpdateProfileRequest,
    },
    state::AppState,
    storage::{StoredStudent, StudentRepository},
};

#[utoipa::path(
    post,
    path = "/v1/students",
    request_body = RegisterStudentRequest,
    tag = "Students",
    responses(
        (status = 201, body = StudentProfile),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterStudentRequest>,
) -> Result<(StatusCode, Json<StudentProfile>), ApiError> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("email and password are required"));
    }

    let password_hash = hash_password(&request.password)
        .map_err(|_| ApiError::internal("Could not hash password"))?;

    let now = Utc::now();
    let student = StoredStudent {
        id: Uuid::new_v4().to_string(),
        provider_account_id: None,
        full_name: request.full_name,
        email: request.email,
        password_hash: Some(password_hash),
        avatar: request.avatar,
        age: request.age,
        role: Role::Student,
        // Onboarding finishes on the first profile save; until then the
        // gate sends the student to the completion page.
        profile_complete: false,
        courses_enrolled: Vec::new(),
        rank: 0,
        quiz_progress: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    StudentRepository::new(&state.storage).create(&student)?;
    info!(student_id = %student.id, "student registered");
    Ok((StatusCode::CREATED, Json(StudentProfile::from(student))))
}

#[utoipa::path(
    get,
    path = "/v1/students",
    params(PageQuery),
    tag = "Students",
    security(("bearer" = [])),
    responses(
        (status = 200, body = StudentListResponse),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_students(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Query(query): Query<PageQuery>,
) -> Result<Json<StudentListResponse>, ApiError> {
    let mut students = StudentRepository::new(&state.storage).list_all()?;

    if let Some(search) = query.search.as_deref() {
        let needle = search.to_lowercase();
        students.retain(|s| {
            s.full_name.to_lowercase().contains(&needle)
                || s.email.to_lowercase().contains(&needle)
        });
    }

    let (page, meta) = query.paginate(students);
    Ok(Json(StudentListResponse {
        data: page.into_iter().map(StudentProfile::from).collect(),
        meta,
    }))
}

fn authorize_profile_access(session: &crate::auth::SessionUser, student_id: &str) -> Result<(), ApiError> {
    if session.id != student_id && !session.is_admin() {
        return Err(ApiError::forbidden(
            "You can only access your own profile",
        ));
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/v1/students/{student_id}/profile",
    params(("student_id" = String, Path, description = "Student identifier")),
    tag = "Students",
    security(("bearer" = [])),
    responses(
        (status = 200, body = StudentProfile),
        (status = 403, description = "Not the profile owner"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Auth(session): Auth,
    Path(student_id): Path<String>,
) -> Result<Json<StudentProfile>, ApiError> {
    authorize_profile_access(&session, &student_id)?;
    let student = StudentRepository::new(&state.storage).get(&student_id)?;
    Ok(Json(StudentProfile::from(student)))
}

#[utoipa::path(
    put,
    path = "/v1/students/{student_id}/profile",
    params(("student_id" = String, Path, description = "Student identifier")),
    request_body = UpdateProfileRequest,
    tag = "Students",
    security(("bearer" = [])),
    responses(
        (status = 200, body = StudentProfile),
        (status = 403, description = "Not the profile owner"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Auth(session): Auth,
    Path(student_id): Path<String>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<StudentProfile>, ApiError> {
    authorize_profile_access(&session, &student_id)?;

    let repo = StudentRepository::new(&state.storage);
    let mut student = repo.get(&student_id)?;

    if let Some(full_name) = request.full_name {
        student.full_name = full_name;
    }
    if let Some(avatar) = request.avatar {
        student.avatar = Some(avatar);
    }
    if let Some(age) = request.age {
        student.age = Some(age);
    }
    // A saved profile counts as complete; the gate stops redirecting to
    // the completion page from here on.
    student.profile_complete = true;

    repo.update(&student)?;
    Ok(Json(StudentProfile::from(student)))
}
