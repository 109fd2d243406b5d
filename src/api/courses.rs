// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Course catalog and enrollment.
//!
//! Listing and detail are public. Mutations are admin-only. Enrollment
//! is done by the signed-in student and is recorded on both sides: the
//! course's student list and the student's enrolled-course list.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    auth::{AdminOnly, Auth},
    error::ApiError,
    models::{CourseDetail, CourseListResponse, CreateCourseRequest, PageQuery, UpdateCourseRequest},
    state::AppState,
    storage::{
        CategoryRepository, CourseFilter, CourseRepository, LessonRepository, StorageError,
        StoredCourse, StudentRepository, TeacherRepository,
    },
};

/// Catalog filters on top of the shared pagination query.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CourseFilterQuery {
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<String>,
}

#[utoipa::path(
    get,
    path = "/v1/courses",
    params(PageQuery, CourseFilterQuery),
    tag = "Courses",
    responses((status = 200, body = CourseListResponse))
)]
pub async fn list_courses(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<CourseFilterQuery>,
) -> Result<Json<CourseListResponse>, ApiError> {
    let filter = CourseFilter {
        search: page.search.clone(),
        category_id: filter.category_id,
        teacher_id: filter.teacher_id,
    };
    let courses = CourseRepository::new(&state.storage).list(&filter)?;

    let (data, meta) = page.paginate(courses);
    Ok(Json(CourseListResponse { data, meta }))
}

#[utoipa::path(
    get,
    path = "/v1/courses/{course_id}",
    params(("course_id" = String, Path, description = "Course identifier")),
    tag = "Courses",
    responses(
        (status = 200, body = CourseDetail),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<CourseDetail>, ApiError> {
    let course = CourseRepository::new(&state.storage).get(&course_id)?;

    // Dangling references degrade to absent fields rather than a 500; the
    // course itself is still served.
    let teacher = TeacherRepository::new(&state.storage)
        .get(&course.teacher_id)
        .ok();
    let category = CategoryRepository::new(&state.storage)
        .get(&course.category_id)
        .ok();
    let lesson_details = LessonRepository::new(&state.storage).list_for_course(&course.lessons)?;

    Ok(Json(CourseDetail {
        course,
        teacher,
        category,
        lesson_details,
    }))
}

#[utoipa::path(
    post,
    path = "/v1/courses",
    request_body = CreateCourseRequest,
    tag = "Courses",
    security(("bearer" = [])),
    responses(
        (status = 201, body = StoredCourse),
        (status = 400, description = "Unknown teacher or category"),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Slug already in use")
    )
)]
pub async fn create_course(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Json(request): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<StoredCourse>), ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::bad_request("title is required"));
    }
    if !TeacherRepository::new(&state.storage).exists(&request.teacher_id) {
        return Err(ApiError::bad_request("Unknown teacher_id"));
    }
    if !CategoryRepository::new(&state.storage).exists(&request.category_id) {
        return Err(ApiError::bad_request("Unknown category_id"));
    }

    let now = Utc::now();
    let course = StoredCourse {
        id: Uuid::new_v4().to_string(),
        title: request.title,
        description: request.description,
        teacher_id: request.teacher_id,
        category_id: request.category_id,
        slug: request.slug,
        price: request.price,
        level: request.level,
        thumbnail: request.thumbnail,
        duration: request.duration,
        language: request.language,
        requirements: request.requirements,
        features: request.features,
        students: Vec::new(),
        lessons: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    CourseRepository::new(&state.storage).create(&course)?;
    info!(course_id = %course.id, "course created");
    Ok((StatusCode::CREATED, Json(course)))
}

#[utoipa::path(
    put,
    path = "/v1/courses/{course_id}",
    params(("course_id" = String, Path, description = "Course identifier")),
    request_body = UpdateCourseRequest,
    tag = "Courses",
    security(("bearer" = [])),
    responses(
        (status = 200, body = StoredCourse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Slug already in use")
    )
)]
pub async fn update_course(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Path(course_id): Path<String>,
    Json(request): Json<UpdateCourseRequest>,
) -> Result<Json<StoredCourse>, ApiError> {
    let repo = CourseRepository::new(&state.storage);
    let mut course = repo.get(&course_id)?;

    if let Some(teacher_id) = request.teacher_id {
        if !TeacherRepository::new(&state.storage).exists(&teacher_id) {
            return Err(ApiError::bad_request("Unknown teacher_id"));
        }
        course.teacher_id = teacher_id;
    }
    if let Some(category_id) = request.category_id {
        if !CategoryRepository::new(&state.storage).exists(&category_id) {
            return Err(ApiError::bad_request("Unknown category_id"));
        }
        course.category_id = category_id;
    }
    if let Some(title) = request.title {
        course.title = title;
    }
    if let Some(description) = request.description {
        course.description = description;
    }
    if let Some(slug) = request.slug {
        course.slug = Some(slug);
    }
    if let Some(price) = request.price {
        course.price = price;
    }
    if let Some(level) = request.level {
        course.level = level;
    }
    if let Some(thumbnail) = request.thumbnail {
        course.thumbnail = Some(thumbnail);
    }
    if let Some(duration) = request.duration {
        course.duration = Some(duration);
    }
    if let Some(language) = request.language {
        course.language = Some(language);
    }
    if let Some(requirements) = request.requirements {
        course.requirements = requirements;
    }
    if let Some(features) = request.features {
        course.features = features;
    }
    course.updated_at = Utc::now();

    repo.update(&course)?;
    Ok(Json(course))
}

#[utoipa::path(
    delete,
    path = "/v1/courses/{course_id}",
    params(("course_id" = String, Path, description = "Course identifier")),
    tag = "Courses",
    security(("bearer" = [])),
    responses(
        (status = 204),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn delete_course(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Path(course_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    CourseRepository::new(&state.storage).delete(&course_id)?;
    info!(course_id = %course_id, "course deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/v1/courses/{course_id}/enroll",
    params(("course_id" = String, Path, description = "Course identifier")),
    tag = "Courses",
    security(("bearer" = [])),
    responses(
        (status = 200, body = StoredCourse),
        (status = 404, description = "Course not found"),
        (status = 422, description = "Already enrolled")
    )
)]
pub async fn enroll(
    State(state): State<AppState>,
    Auth(session): Auth,
    Path(course_id): Path<String>,
) -> Result<Json<StoredCourse>, ApiError> {
    let students = StudentRepository::new(&state.storage);
    let mut student = students.get(&session.id)?;

    let course = CourseRepository::new(&state.storage)
        .enroll_student(&course_id, &session.id)
        .map_err(|err| match err {
            StorageError::AlreadyExists(_) => {
                ApiError::unprocessable("Already enrolled in this course")
            }
            other => ApiError::from(other),
        })?;

    if !student.courses_enrolled.contains(&course_id) {
        student.courses_enrolled.push(course_id.clone());
        students.update(&student)?;
    }

    info!(course_id = %course_id, student_id = %session.id, "student enrolled");
    Ok(Json(course))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Role, SessionUser};
    use crate::state::AuthConfig;
    use crate::storage::{
        DocumentStore, StoragePaths, StoredCategory, StoredStudent, StoredTeacher,
    };
    use tempfile::TempDir;

    fn test_state() -> (AppState, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let mut store = DocumentStore::new(StoragePaths::new(dir.path()));
        store.initialize().expect("initialize");
        let state = AppState::new(store, AuthConfig::new(Some("s".to_string())));
        (state, dir)
    }

    fn admin() -> AdminOnly {
        AdminOnly(session("admin", Role::Admin).0)
    }

    fn session(id: &str, role: Role) -> Auth {
        Auth(SessionUser {
            id: id.to_string(),
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            role,
            profile_complete: true,
            expires_at: i64::MAX,
        })
    }

    fn seed_refs(state: &AppState) -> (String, String) {
        let now = Utc::now();
        let teacher = StoredTeacher {
            id: "t-1".to_string(),
            full_name: "Teacher".to_string(),
            email: "t@example.com".to_string(),
            avatar: None,
            age: None,
            bio: None,
            created_at: now,
            updated_at: now,
        };
        TeacherRepository::new(&state.storage)
            .create(&teacher)
            .unwrap();
        let category = StoredCategory {
            id: "cat-1".to_string(),
            title: "Math".to_string(),
            created_at: now,
            updated_at: now,
        };
        CategoryRepository::new(&state.storage)
            .create(&category)
            .unwrap();
        ("t-1".to_string(), "cat-1".to_string())
    }

    fn seed_student(state: &AppState, id: &str) {
        let now = Utc::now();
        StudentRepository::new(&state.storage)
            .create(&StoredStudent {
                id: id.to_string(),
                provider_account_id: None,
                full_name: "Student".to_string(),
                email: format!("{id}@example.com"),
                password_hash: None,
                avatar: None,
                age: None,
                role: Role::Student,
                profile_complete: true,
                courses_enrolled: Vec::new(),
                rank: 0,
                quiz_progress: Vec::new(),
                created_at: now,
                updated_at: now,
            })
            .unwrap();
    }

    fn create_request(teacher_id: &str, category_id: &str) -> CreateCourseRequest {
        CreateCourseRequest {
            title: "Calculus I".to_string(),
            description: "Limits and derivatives".to_string(),
            teacher_id: teacher_id.to_string(),
            category_id: category_id.to_string(),
            slug: Some("calculus-i".to_string()),
            price: 49.0,
            level: Default::default(),
            thumbnail: None,
            duration: None,
            language: None,
            requirements: Vec::new(),
            features: Vec::new(),
        }
    }

    #[tokio::test]
    async fn create_rejects_unknown_references() {
        let (state, _dir) = test_state();

        let result = create_course(
            State(state),
            admin(),
            Json(create_request("ghost-teacher", "ghost-category")),
        )
        .await;
        assert_eq!(result.err().unwrap().status, 400);
    }

    #[tokio::test]
    async fn create_update_delete_round_trip() {
        let (state, _dir) = test_state();
        let (teacher_id, category_id) = seed_refs(&state);

        let (_, created) = create_course(
            State(state.clone()),
            admin(),
            Json(create_request(&teacher_id, &category_id)),
        )
        .await
        .unwrap();
        let id = created.0.id.clone();

        let updated = update_course(
            State(state.clone()),
            admin(),
            Path(id.clone()),
            Json(UpdateCourseRequest {
                title: Some("Calculus II".to_string()),
                description: None,
                teacher_id: None,
                category_id: None,
                slug: None,
                price: Some(59.0),
                level: None,
                thumbnail: None,
                duration: None,
                language: None,
                requirements: None,
                features: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated.0.title, "Calculus II");
        assert_eq!(updated.0.price, 59.0);

        let code = delete_course(State(state.clone()), admin(), Path(id.clone()))
            .await
            .unwrap();
        assert_eq!(code, StatusCode::NO_CONTENT);

        let result = get_course(State(state), Path(id)).await;
        assert_eq!(result.err().unwrap().status, 404);
    }

    #[tokio::test]
    async fn enroll_records_both_sides_and_rejects_repeat() {
        let (state, _dir) = test_state();
        let (teacher_id, category_id) = seed_refs(&state);
        seed_student(&state, "s-1");

        let (_, created) = create_course(
            State(state.clone()),
            admin(),
            Json(create_request(&teacher_id, &category_id)),
        )
        .await
        .unwrap();
        let course_id = created.0.id.clone();

        let enrolled = enroll(
            State(state.clone()),
            session("s-1", Role::Student),
            Path(course_id.clone()),
        )
        .await
        .unwrap();
        assert_eq!(enrolled.0.students, vec!["s-1".to_string()]);

        let student = StudentRepository::new(&state.storage).get("s-1").unwrap();
        assert_eq!(student.courses_enrolled, vec![course_id.clone()]);

        let repeat = enroll(
            State(state),
            session("s-1", Role::Student),
            Path(course_id),
        )
        .await;
        assert_eq!(repeat.err().unwrap().status, 422);
    }

    #[tokio::test]
    async fn list_filters_by_category() {
        let (state, _dir) = test_state();
        let (teacher_id, category_id) = seed_refs(&state);
        create_course(
            State(state.clone()),
            admin(),
            Json(create_request(&teacher_id, &category_id)),
        )
        .await
        .unwrap();

        let hit = list_courses(
            State(state.clone()),
            Query(PageQuery::default()),
            Query(CourseFilterQuery {
                category_id: Some(category_id),
                teacher_id: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(hit.0.meta.total, 1);

        let miss = list_courses(
            State(state),
            Query(PageQuery::default()),
            Query(CourseFilterQuery {
                category_id: Some("other".to_string()),
                teacher_id: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(miss.0.meta.total, 0);
    }

    #[tokio::test]
    async fn update_to_taken_slug_conflicts() {
        let (state, _dir) = test_state();
        let (teacher_id, category_id) = seed_refs(&state);

        create_course(
            State(state.clone()),
            admin(),
            Json(create_request(&teacher_id, &category_id)),
        )
        .await
        .unwrap();

        let mut second = create_request(&teacher_id, &category_id);
        second.slug = Some("algebra-i".to_string());
        let (_, created) = create_course(State(state.clone()), admin(), Json(second))
            .await
            .unwrap();

        let result = update_course(
            State(state),
            admin(),
            Path(created.0.id.clone()),
            Json(UpdateCourseRequest {
                title: None,
                description: None,
                teacher_id: None,
                category_id: None,
                slug: Some("calculus-i".to_string()),
                price: None,
                level: None,
                thumbnail: None,
                duration: None,
                language: None,
                requirements: None,
                features: None,
            }),
        )
        .await;
        assert_eq!(result.err().unwrap().status, 409);
    }
}
