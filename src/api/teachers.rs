// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Teacher catalog: public listing, admin-managed profiles.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    auth::AdminOnly,
    error::ApiError,
    models::{CreateTeacherRequest, PageQuery, TeacherListResponse},
    state::AppState,
    storage::{StoredTeacher, TeacherRepository},
};

#[utoipa::path(
    get,
    path = "/v1/teachers",
    params(PageQuery),
    tag = "Teachers",
    responses((status = 200, body = TeacherListResponse))
)]
pub async fn list_teachers(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<TeacherListResponse>, ApiError> {
    let teachers = TeacherRepository::new(&state.storage).list(query.search.as_deref())?;
    let (page, meta) = query.paginate(teachers);
    Ok(Json(TeacherListResponse { data: page, meta }))
}

#[utoipa::path(
    get,
    path = "/v1/teachers/{teacher_id}",
    params(("teacher_id" = String, Path, description = "Teacher identifier")),
    tag = "Teachers",
    responses(
        (status = 200, body = StoredTeacher),
        (status = 404, description = "Teacher not found")
    )
)]
pub async fn get_teacher(
    State(state): State<AppState>,
    Path(teacher_id): Path<String>,
) -> Result<Json<StoredTeacher>, ApiError> {
    let teacher = TeacherRepository::new(&state.storage).get(&teacher_id)?;
    Ok(Json(teacher))
}

#[utoipa::path(
    post,
    path = "/v1/teachers",
    request_body = CreateTeacherRequest,
    tag = "Teachers",
    security(("bearer" = [])),
    responses(
        (status = 201, body = StoredTeacher),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create_teacher(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Json(request): Json<CreateTeacherRequest>,
) -> Result<(StatusCode, Json<StoredTeacher>), ApiError> {
    if request.full_name.trim().is_empty() || request.email.trim().is_empty() {
        return Err(ApiError::bad_request("full_name and email are required"));
    }

    let now = Utc::now();
    let teacher = StoredTeacher {
        id: Uuid::new_v4().to_string(),
        full_name: request.full_name,
        email: request.email,
        avatar: request.avatar,
        age: request.age,
        bio: request.bio,
        created_at: now,
        updated_at: now,
    };

    TeacherRepository::new(&state.storage).create(&teacher)?;
    Ok((StatusCode::CREATED, Json(teacher)))
}
