// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Catalog categories: public listing, admin-managed.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    auth::AdminOnly,
    error::ApiError,
    models::CreateCategoryRequest,
    state::AppState,
    storage::{CategoryRepository, StoredCategory},
};

#[utoipa::path(
    get,
    path = "/v1/categories",
    tag = "Categories",
    responses((status = 200, body = [StoredCategory]))
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredCategory>>, ApiError> {
    let categories = CategoryRepository::new(&state.storage).list_all()?;
    Ok(Json(categories))
}

#[utoipa::path(
    post,
    path = "/v1/categories",
    request_body = CreateCategoryRequest,
    tag = "Categories",
    security(("bearer" = [])),
    responses(
        (status = 201, body = StoredCategory),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Title already in use")
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<StoredCategory>), ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::bad_request("title is required"));
    }

    let repo = CategoryRepository::new(&state.storage);
    if repo
        .list_all()?
        .iter()
        .any(|c| c.title.eq_ignore_ascii_case(&request.title))
    {
        return Err(ApiError::conflict(format!(
            "Category \"{}\" already exists",
            request.title
        )));
    }

    let now = Utc::now();
    let category = StoredCategory {
        id: Uuid::new_v4().to_string(),
        title: request.title,
        created_at: now,
        updated_at: now,
    };

    repo.create(&category)?;
    Ok((StatusCode::CREATED, Json(category)))
}
