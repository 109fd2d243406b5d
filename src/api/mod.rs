// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! # HTTP API Module
//!
//! Route table, OpenAPI document, and the split between public and
//! session-guarded route groups.
//!
//! The session-only group sits behind the [`require_session`] middleware,
//! which verifies the bearer token once and hands the session to handlers
//! through request extensions. Handlers on mixed public/admin paths use
//! the extractors directly instead.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{
        federated::FederatedIdentity, middleware::require_session, roles::Role, token::SessionUser,
    },
    error::ApiError,
    gate::GateDecision,
    models::{
        CourseDetail, CourseListResponse, CreateCategoryRequest, CreateCourseRequest,
        CreateLessonRequest, CreateQuizRequest, CreateTeacherRequest, GateResponse, LoginRequest,
        LoginResponse, PageMeta, QuizAttemptRequest, QuizAttemptResponse, QuizView,
        RegisterStudentRequest, StudentListResponse, StudentProfile, TeacherListResponse,
        UpdateCourseRequest, UpdateLessonRequest, UpdateProfileRequest, UpdateQuizRequest,
    },
    state::AppState,
    storage::{
        CourseLevel, QuestionAnswer, QuizAttemptRecord, QuizQuestion, StoredCategory, StoredCourse,
        StoredLesson, StoredTeacher, SubQuestion,
    },
};

pub mod auth;
pub mod categories;
pub mod courses;
pub mod health;
pub mod lessons;
pub mod quizzes;
pub mod students;
pub mod teachers;

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/federated", post(auth::federated_sign_in))
        .route("/auth/gate", get(auth::evaluate_gate))
        .route(
            "/students",
            post(students::register).get(students::list_students),
        )
        .route(
            "/teachers",
            get(teachers::list_teachers).post(teachers::create_teacher),
        )
        .route("/teachers/{teacher_id}", get(teachers::get_teacher))
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/courses",
            get(courses::list_courses).post(courses::create_course),
        )
        .route(
            "/courses/{course_id}",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        .route("/lessons", post(lessons::create_lesson))
        .route(
            "/lessons/{lesson_id}",
            get(lessons::get_lesson)
                .put(lessons::update_lesson)
                .delete(lessons::delete_lesson),
        );

    let session_routes = Router::new()
        .route("/auth/session", get(auth::current_session))
        .route("/auth/refresh", post(auth::refresh_session))
        .route(
            "/students/{student_id}/profile",
            get(students::get_profile).put(students::update_profile),
        )
        .route("/courses/{course_id}/enroll", post(courses::enroll))
        .route("/quizzes", post(quizzes::create_quiz))
        .route(
            "/quizzes/{quiz_id}",
            get(quizzes::get_quiz)
                .put(quizzes::update_quiz)
                .delete(quizzes::delete_quiz),
        )
        .route("/quizzes/{quiz_id}/attempt", post(quizzes::attempt_quiz))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let v1_routes = public_routes.merge(session_routes).with_state(state.clone());

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(state)
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        auth::federated_sign_in,
        auth::current_session,
        auth::refresh_session,
        auth::evaluate_gate,
        students::register,
        students::list_students,
        students::get_profile,
        students::update_profile,
        teachers::list_teachers,
        teachers::get_teacher,
        teachers::create_teacher,
        categories::list_categories,
        categories::create_category,
        courses::list_courses,
        courses::get_course,
        courses::create_course,
        courses::update_course,
        courses::delete_course,
        courses::enroll,
        lessons::get_lesson,
        lessons::create_lesson,
        lessons::update_lesson,
        lessons::delete_lesson,
        quizzes::get_quiz,
        quizzes::create_quiz,
        quizzes::update_quiz,
        quizzes::delete_quiz,
        quizzes::attempt_quiz,
        health::health,
        health::ready
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            SessionUser,
            Role,
            FederatedIdentity,
            GateResponse,
            GateDecision,
            RegisterStudentRequest,
            UpdateProfileRequest,
            StudentProfile,
            StudentListResponse,
            QuizAttemptRecord,
            CreateTeacherRequest,
            StoredTeacher,
            TeacherListResponse,
            CreateCategoryRequest,
            StoredCategory,
            CreateCourseRequest,
            UpdateCourseRequest,
            StoredCourse,
            CourseLevel,
            CourseDetail,
            CourseListResponse,
            CreateLessonRequest,
            UpdateLessonRequest,
            StoredLesson,
            CreateQuizRequest,
            UpdateQuizRequest,
            QuizQuestion,
            SubQuestion,
            QuestionAnswer,
            QuizAttemptRequest,
            QuizAttemptResponse,
            QuizView,
            PageMeta,
            ApiError,
            health::HealthResponse,
            health::ReadyResponse,
            health::HealthChecks
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Sessions, sign-in, and the redirect gate"),
        (name = "Students", description = "Registration and profiles"),
        (name = "Teachers", description = "Teacher catalog"),
        (name = "Categories", description = "Catalog categories"),
        (name = "Courses", description = "Course catalog and enrollment"),
        (name = "Lessons", description = "Course content"),
        (name = "Quizzes", description = "Quizzes and graded attempts"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
