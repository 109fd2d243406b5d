// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! # Document Storage Module
//!
//! Persistent storage for all platform entities as JSON documents on the
//! local filesystem, one file per record.
//!
//! ## Storage Layout
//!
//! ```text
//! /data/
//!   students/{student_id}.json
//!   teachers/{teacher_id}.json
//!   categories/{category_id}.json
//!   courses/{course_id}.json
//!   lessons/{lesson_id}.json
//!   quizzes/{quiz_id}.json
//! ```
//!
//! The [`DocumentStore`] handle is initialized once at startup and cloned
//! into the application state; there is no global connection flag.

pub mod document_store;
pub mod paths;
pub mod repository;

pub use document_store::{DocumentStore, StorageError, StorageResult};
pub use paths::StoragePaths;
pub use repository::{
    CategoryRepository, CourseFilter, CourseLevel, CourseRepository, LessonRepository,
    QuestionAnswer, QuizAttemptRecord, QuizQuestion, QuizRepository, StoredCategory, StoredCourse,
    StoredLesson, StoredQuiz, StoredStudent, StoredTeacher, StudentRepository, SubQuestion,
    TeacherRepository,
};
