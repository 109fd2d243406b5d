// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Quizzes and graded attempts.
//!
//! Quiz definitions are admin-managed and attach to a lesson. Attempts
//! are made by the signed-in student: the attempt ceiling is enforced
//! here before grading, and the score lands in the student's progress
//! record.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::{AdminOnly, Auth},
    error::ApiError,
    models::{
        CreateQuizRequest, QuizAttemptRequest, QuizAttemptResponse, QuizView, UpdateQuizRequest,
    },
    state::AppState,
    storage::{LessonRepository, QuizRepository, StoredQuiz, StudentRepository},
};

#[utoipa::path(
    get,
    path = "/v1/quizzes/{quiz_id}",
    params(("quiz_id" = String, Path, description = "Quiz identifier")),
    tag = "Quizzes",
    security(("bearer" = [])),
    responses(
        (status = 200, body = QuizView),
        (status = 404, description = "Quiz not found")
    )
)]
pub async fn get_quiz(
    State(state): State<AppState>,
    Auth(_session): Auth,
    Path(quiz_id): Path<String>,
) -> Result<Json<QuizView>, ApiError> {
    let quiz = QuizRepository::new(&state.storage).get(&quiz_id)?;
    Ok(Json(QuizView::from(quiz)))
}

#[utoipa::path(
    post,
    path = "/v1/quizzes",
    request_body = CreateQuizRequest,
    tag = "Quizzes",
    security(("bearer" = [])),
    responses(
        (status = 201, body = QuizView),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Lesson not found"),
        (status = 422, description = "Lesson already has a quiz")
    )
)]
pub async fn create_quiz(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Json(request): Json<CreateQuizRequest>,
) -> Result<(StatusCode, Json<QuizView>), ApiError> {
    if request.questions.is_empty() {
        return Err(ApiError::bad_request("questions must not be empty"));
    }
    if request.quiz_limit == 0 {
        return Err(ApiError::bad_request("quiz_limit must be at least 1"));
    }

    let lessons = LessonRepository::new(&state.storage);
    let mut lesson = lessons.get(&request.lesson_id)?;
    if lesson.quiz_id.is_some() {
        return Err(ApiError::unprocessable("Lesson already has a quiz"));
    }

    let now = Utc::now();
    let quiz = StoredQuiz {
        id: Uuid::new_v4().to_string(),
        lesson_id: request.lesson_id,
        questions: request.questions,
        quiz_limit: request.quiz_limit,
        created_at: now,
        updated_at: now,
    };

    QuizRepository::new(&state.storage).create(&quiz)?;
    lesson.quiz_id = Some(quiz.id.clone());
    lesson.updated_at = now;
    lessons.update(&lesson)?;

    info!(quiz_id = %quiz.id, lesson_id = %lesson.id, "quiz created");
    Ok((StatusCode::CREATED, Json(QuizView::from(quiz))))
}

#[utoipa::path(
    put,
    path = "/v1/quizzes/{quiz_id}",
    params(("quiz_id" = String, Path, description = "Quiz identifier")),
    request_body = UpdateQuizRequest,
    tag = "Quizzes",
    security(("bearer" = [])),
    responses(
        (status = 200, body = QuizView),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Quiz not found")
    )
)]
pub async fn update_quiz(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Path(quiz_id): Path<String>,
    Json(request): Json<UpdateQuizRequest>,
) -> Result<Json<QuizView>, ApiError> {
    let repo = QuizRepository::new(&state.storage);
    let mut quiz = repo.get(&quiz_id)?;

    if let Some(questions) = request.questions {
        if questions.is_empty() {
            return Err(ApiError::bad_request("questions must not be empty"));
        }
        quiz.questions = questions;
    }
    if let Some(quiz_limit) = request.quiz_limit {
        if quiz_limit == 0 {
            return Err(ApiError::bad_request("quiz_limit must be at least 1"));
        }
        quiz.quiz_limit = quiz_limit;
    }
    quiz.updated_at = Utc::now();

    repo.update(&quiz)?;
    Ok(Json(QuizView::from(quiz)))
}

#[utoipa::path(
    delete,
    path = "/v1/quizzes/{quiz_id}",
    params(("quiz_id" = String, Path, description = "Quiz identifier")),
    tag = "Quizzes",
    security(("bearer" = [])),
    responses(
        (status = 204),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Quiz not found")
    )
)]
pub async fn delete_quiz(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Path(quiz_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let repo = QuizRepository::new(&state.storage);
    let quiz = repo.get(&quiz_id)?;

    let lessons = LessonRepository::new(&state.storage);
    if let Ok(mut lesson) = lessons.get(&quiz.lesson_id) {
        if lesson.quiz_id.as_deref() == Some(quiz_id.as_str()) {
            lesson.quiz_id = None;
            lessons.update(&lesson)?;
        }
    }

    repo.delete(&quiz_id)?;
    info!(quiz_id = %quiz_id, "quiz deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/v1/quizzes/{quiz_id}/attempt",
    params(("quiz_id" = String, Path, description = "Quiz identifier")),
    request_body = QuizAttemptRequest,
    tag = "Quizzes",
    security(("bearer" = [])),
    responses(
        (status = 200, body = QuizAttemptResponse),
        (status = 404, description = "Quiz not found"),
        (status = 422, description = "Attempt limit reached")
    )
)]
pub async fn attempt_quiz(
    State(state): State<AppState>,
    Auth(session): Auth,
    Path(quiz_id): Path<String>,
    Json(request): Json<QuizAttemptRequest>,
) -> Result<Json<QuizAttemptResponse>, ApiError> {
    let quiz = QuizRepository::new(&state.storage).get(&quiz_id)?;

    let students = StudentRepository::new(&state.storage);
    let student = students.get(&session.id)?;
    let used = student
        .quiz_record(&quiz_id)
        .map(|record| record.attempts)
        .unwrap_or(0);
    if used >= quiz.quiz_limit {
        return Err(ApiError::unprocessable(format!(
            "Attempt limit of {} reached for this quiz",
            quiz.quiz_limit
        )));
    }

    let score = quiz.grade(&request.answers);
    let record = students.record_quiz_attempt(&session.id, &quiz_id, score, quiz.quiz_limit)?;

    info!(quiz_id = %quiz_id, student_id = %session.id, score, "quiz attempt graded");
    Ok(Json(QuizAttemptResponse {
        score,
        best_score: record.best_score,
        attempts: record.attempts,
        max_attempts: record.max_attempts,
    }))
}
