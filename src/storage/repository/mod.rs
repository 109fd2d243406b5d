// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Repository layer providing typed access to the document store.
//!
//! Each repository provides CRUD operations for a specific entity type,
//! using the DocumentStore for all file operations.

pub mod categories;
pub mod courses;
pub mod lessons;
pub mod quizzes;
pub mod students;
pub mod teachers;

pub use categories::{CategoryRepository, StoredCategory};
pub use courses::{CourseFilter, CourseLevel, CourseRepository, StoredCourse};
pub use lessons::{LessonRepository, StoredLesson};
pub use quizzes::{QuestionAnswer, QuizQuestion, QuizRepository, StoredQuiz, SubQuestion};
pub use students::{QuizAttemptRecord, StoredStudent, StudentRepository};
pub use teachers::{StoredTeacher, TeacherRepository};
