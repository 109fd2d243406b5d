// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Lessons: per-course content units. Mutations are admin-only.
//!
//! Creating a lesson appends it to the owning course's ordered lesson
//! list; deleting removes it from that list as well.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::AdminOnly,
    error::ApiError,
    models::{CreateLessonRequest, UpdateLessonRequest},
    state::AppState,
    storage::{CourseRepository, LessonRepository, StoredLesson},
};

#[utoipa::path(
    get,
    path = "/v1/lessons/{lesson_id}",
    params(("lesson_id" = String, Path, description = "Lesson identifier")),
    tag = "Lessons",
    responses(
        (status = 200, body = StoredLesson),
        (status = 404, description = "Lesson not found")
    )
)]
pub async fn get_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
) -> Result<Json<StoredLesson>, ApiError> {
    let lesson = LessonRepository::new(&state.storage).get(&lesson_id)?;
    Ok(Json(lesson))
}

#[utoipa::path(
    post,
    path = "/v1/lessons",
    request_body = CreateLessonRequest,
    tag = "Lessons",
    security(("bearer" = [])),
    responses(
        (status = 201, body = StoredLesson),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn create_lesson(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Json(request): Json<CreateLessonRequest>,
) -> Result<(StatusCode, Json<StoredLesson>), ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::bad_request("title is required"));
    }

    let courses = CourseRepository::new(&state.storage);
    // 404s before anything is written when the course is missing.
    courses.get(&request.course_id)?;

    let now = Utc::now();
    let lesson = StoredLesson {
        id: Uuid::new_v4().to_string(),
        course_id: request.course_id.clone(),
        title: request.title,
        video_url: request.video_url,
        file_url: request.file_url,
        duration: request.duration,
        quiz_id: None,
        created_at: now,
        updated_at: now,
    };

    LessonRepository::new(&state.storage).create(&lesson)?;
    courses.add_lesson(&request.course_id, &lesson.id)?;
    info!(lesson_id = %lesson.id, course_id = %request.course_id, "lesson created");
    Ok((StatusCode::CREATED, Json(lesson)))
}

#[utoipa::path(
    put,
    path = "/v1/lessons/{lesson_id}",
    params(("lesson_id" = String, Path, description = "Lesson identifier")),
    request_body = UpdateLessonRequest,
    tag = "Lessons",
    security(("bearer" = [])),
    responses(
        (status = 200, body = StoredLesson),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Lesson not found")
    )
)]
pub async fn update_lesson(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Path(lesson_id): Path<String>,
    Json(request): Json<UpdateLessonRequest>,
) -> Result<Json<StoredLesson>, ApiError> {
    let repo = LessonRepository::new(&state.storage);
    let mut lesson = repo.get(&lesson_id)?;

    if let Some(title) = request.title {
        lesson.title = title;
    }
    if let Some(video_url) = request.video_url {
        lesson.video_url = video_url;
    }
    if let Some(file_url) = request.file_url {
        lesson.file_url = file_url;
    }
    if let Some(duration) = request.duration {
        lesson.duration = Some(duration);
    }
    lesson.updated_at = Utc::now();

    repo.update(&lesson)?;
    Ok(Json(lesson))
}

#[utoipa::path(
    delete,
    path = "/v1/lessons/{lesson_id}",
    params(("lesson_id" = String, Path, description = "Lesson identifier")),
    tag = "Lessons",
    security(("bearer" = [])),
    responses(
        (status = 204),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Lesson not found")
    )
)]
pub async fn delete_lesson(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Path(lesson_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let repo = LessonRepository::new(&state.storage);
    let lesson = repo.get(&lesson_id)?;

    let courses = CourseRepository::new(&state.storage);
    if let Ok(mut course) = courses.get(&lesson.course_id) {
        course.lessons.retain(|id| id != &lesson_id);
        courses.update(&course)?;
    }

    repo.delete(&lesson_id)?;
    info!(lesson_id = %lesson_id, "lesson deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Role, SessionUser};
    use crate::state::AuthConfig;
    use crate::storage::{DocumentStore, StoragePaths, StoredCourse};
    use tempfile::TempDir;

    fn test_state() -> (AppState, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let mut store = DocumentStore::new(StoragePaths::new(dir.path()));
        store.initialize().expect("initialize");
        let state = AppState::new(store, AuthConfig::new(Some("s".to_string())));
        (state, dir)
    }

    fn admin() -> AdminOnly {
        AdminOnly(SessionUser {
            id: "admin".to_string(),
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            role: Role::Admin,
            profile_complete: true,
            expires_at: i64::MAX,
        })
    }

    fn seed_course(state: &AppState, id: &str) {
        let now = Utc::now();
        CourseRepository::new(&state.storage)
            .create(&StoredCourse {
                id: id.to_string(),
                title: "Course".to_string(),
                description: String::new(),
                teacher_id: "t-1".to_string(),
                category_id: "cat-1".to_string(),
                slug: None,
                price: 0.0,
                level: Default::default(),
                thumbnail: None,
                duration: None,
                language: None,
                requirements: Vec::new(),
                features: Vec::new(),
                students: Vec::new(),
                lessons: Vec::new(),
                created_at: now,
                updated_at: now,
            })
            .unwrap();
    }

    fn request(course_id: &str) -> CreateLessonRequest {
        CreateLessonRequest {
            course_id: course_id.to_string(),
            title: "Intro".to_string(),
            video_url: "https://example.com/v.mp4".to_string(),
            file_url: String::new(),
            duration: None,
        }
    }

    #[tokio::test]
    async fn create_appends_to_course_lesson_list() {
        let (state, _dir) = test_state();
        seed_course(&state, "c-1");

        let (code, lesson) = create_lesson(State(state.clone()), admin(), Json(request("c-1")))
            .await
            .unwrap();
        assert_eq!(code, StatusCode::CREATED);

        let course = CourseRepository::new(&state.storage).get("c-1").unwrap();
        assert_eq!(course.lessons, vec![lesson.0.id]);
    }

    #[tokio::test]
    async fn create_with_missing_course_is_404() {
        let (state, _dir) = test_state();

        let result = create_lesson(State(state), admin(), Json(request("ghost"))).await;
        assert_eq!(result.err().unwrap().status, 404);
    }

    #[tokio::test]
    async fn delete_removes_from_course_lesson_list() {
        let (state, _dir) = test_state();
        seed_course(&state, "c-1");
        let (_, lesson) = create_lesson(State(state.clone()), admin(), Json(request("c-1")))
            .await
            .unwrap();

        delete_lesson(State(state.clone()), admin(), Path(lesson.0.id.clone()))
            .await
            .unwrap();

        let course = CourseRepository::new(&state.storage).get("c-1").unwrap();
        assert!(course.lessons.is_empty());
        let result = get_lesson(State(state), Path(lesson.0.id)).await;
        assert_eq!(result.err().unwrap().status, 404);
    }

    #[tokio::test]
    async fn update_changes_only_provided_fields() {
        let (state, _dir) = test_state();
        seed_course(&state, "c-1");
        let (_, lesson) = create_lesson(State(state.clone()), admin(), Json(request("c-1")))
            .await
            .unwrap();

        let updated = update_lesson(
            State(state),
            admin(),
            Path(lesson.0.id),
            Json(UpdateLessonRequest {
                title: Some("Intro, revised".to_string()),
                video_url: None,
                file_url: None,
                duration: Some("12:30".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(updated.0.title, "Intro, revised");
        assert_eq!(updated.0.video_url, "https://example.com/v.mp4");
        assert_eq!(updated.0.duration.as_deref(), Some("12:30"));
    }
}
