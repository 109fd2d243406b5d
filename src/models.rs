// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! # API Data Models
//!
//! This module defines the request and response data structures used by
//! the REST API. All types derive `Serialize`, `Deserialize`, and `ToSchema`
//! for automatic JSON handling and OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Auth**: login, federated sign-in, session and gate responses
//! - **Students**: registration and profile views (never the password hash)
//! - **Catalog**: teacher, category, course and lesson payloads
//! - **Quizzes**: quiz definitions and attempt submissions
//! - **Pagination**: the `current`/`page_size`/`search` query triple

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::{Role, SessionUser};
use crate::gate::GateDecision;
use crate::storage::{
    CourseLevel, QuestionAnswer, QuizAttemptRecord, QuizQuestion, StoredCategory, StoredCourse,
    StoredLesson, StoredQuiz, StoredStudent, StoredTeacher,
};

// =============================================================================
// Auth Models
// =============================================================================

/// Email/password login request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login or federated sign-in: a bearer token plus the session
/// it encodes.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,
    pub user: SessionUser,
}

/// Gate evaluation query.
#[derive(Debug, Deserialize, IntoParams)]
pub struct GateQuery {
    /// Path the client is navigating to
    pub path: String,
}

/// Gate evaluation result.
#[derive(Debug, Serialize, ToSchema)]
pub struct GateResponse {
    pub decision: GateDecision,
    /// Redirect target, absent when the page should render
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<&'static str>,
}

impl From<GateDecision> for GateResponse {
    fn from(decision: GateDecision) -> Self {
        Self {
            decision,
            redirect_to: decision.redirect_to(),
        }
    }
}

// =============================================================================
// Student Models
// =============================================================================

/// Self-service student registration.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterStudentRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
}

/// Profile update. Omitted fields keep their stored values; a successful
/// update marks the profile complete.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
}

/// Client-facing view of a student record. The password hash never
/// appears here.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentProfile {
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub role: Role,
    #[serde(rename = "isValid")]
    pub profile_complete: bool,
    pub courses_enrolled: Vec<String>,
    pub rank: u32,
    pub quiz_progress: Vec<QuizAttemptRecord>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<StoredStudent> for StudentProfile {
    fn from(student: StoredStudent) -> Self {
        Self {
            id: student.id,
            full_name: student.full_name,
            email: student.email,
            avatar: student.avatar,
            age: student.age,
            role: student.role,
            profile_complete: student.profile_complete,
            courses_enrolled: student.courses_enrolled,
            rank: student.rank,
            quiz_progress: student.quiz_progress,
            created_at: student.created_at,
        }
    }
}

// =============================================================================
// Catalog Models
// =============================================================================

/// Admin-created teacher profile.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTeacherRequest {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Admin-created catalog category.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub title: String,
}

/// Admin-created course.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: String,
    pub teacher_id: String,
    pub category_id: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub level: CourseLevel,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Partial course update. Omitted fields keep their stored values.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCourseRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub level: Option<CourseLevel>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub requirements: Option<Vec<String>>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
}

/// Admin-created lesson, appended to its course's lesson list.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLessonRequest {
    pub course_id: String,
    pub title: String,
    pub video_url: String,
    #[serde(default)]
    pub file_url: String,
    #[serde(default)]
    pub duration: Option<String>,
}

/// Partial lesson update.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLessonRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

/// Course detail with referenced entities resolved in place.
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: StoredCourse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<StoredTeacher>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<StoredCategory>,
    pub lesson_details: Vec<StoredLesson>,
}

// =============================================================================
// Quiz Models
// =============================================================================

/// Admin-created quiz attached to a lesson.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateQuizRequest {
    pub lesson_id: String,
    pub questions: Vec<QuizQuestion>,
    /// Maximum attempts per student
    pub quiz_limit: u32,
}

/// Full quiz replacement.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuizRequest {
    #[serde(default)]
    pub questions: Option<Vec<QuizQuestion>>,
    #[serde(default)]
    pub quiz_limit: Option<u32>,
}

/// One quiz submission, answers aligned with the quiz's question order.
#[derive(Debug, Deserialize, ToSchema)]
pub struct QuizAttemptRequest {
    pub answers: Vec<QuestionAnswer>,
}

/// Graded attempt outcome plus the updated progress aggregate.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuizAttemptResponse {
    /// Score for this attempt, 0..=100
    pub score: u32,
    /// Best score across all attempts
    pub best_score: u32,
    /// Attempts used so far, including this one
    pub attempts: u32,
    /// Attempt ceiling for this quiz
    pub max_attempts: u32,
}

/// Quiz view without the storage timestamps.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuizView {
    pub id: String,
    pub lesson_id: String,
    pub questions: Vec<QuizQuestion>,
    pub quiz_limit: u32,
}

impl From<StoredQuiz> for QuizView {
    fn from(quiz: StoredQuiz) -> Self {
        Self {
            id: quiz.id,
            lesson_id: quiz.lesson_id,
            questions: quiz.questions,
            quiz_limit: quiz.quiz_limit,
        }
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Standard list query: 1-based page, page size, optional search term.
#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    /// 1-based page number
    #[serde(default = "default_current")]
    pub current: usize,
    /// Items per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Case-insensitive search term
    #[serde(default)]
    pub search: Option<String>,
}

fn default_current() -> usize {
    1
}

fn default_page_size() -> usize {
    10
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            current: default_current(),
            page_size: default_page_size(),
            search: None,
        }
    }
}

impl PageQuery {
    /// Slice a full result set down to the requested page.
    ///
    /// An out-of-range page yields an empty list, not an error; `total`
    /// always reflects the unsliced count.
    pub fn paginate<T>(&self, items: Vec<T>) -> (Vec<T>, PageMeta) {
        let total = items.len();
        let page_size = self.page_size.max(1);
        let current = self.current.max(1);
        let start = (current - 1).saturating_mul(page_size);

        let page = items
            .into_iter()
            .skip(start)
            .take(page_size)
            .collect::<Vec<_>>();

        (
            page,
            PageMeta {
                current,
                page_size,
                total,
            },
        )
    }
}

/// Pagination metadata echoed back with every list response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PageMeta {
    pub current: usize,
    pub page_size: usize,
    pub total: usize,
}

/// A page of courses.
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseListResponse {
    pub data: Vec<StoredCourse>,
    pub meta: PageMeta,
}

/// A page of students.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentListResponse {
    pub data: Vec<StudentProfile>,
    pub meta: PageMeta,
}

/// A page of teachers.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherListResponse {
    pub data: Vec<StoredTeacher>,
    pub meta: PageMeta,
}
