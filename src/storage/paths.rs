// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Path constants and utilities for the document store layout.

use std::path::{Path, PathBuf};

/// Base directory for all persistent documents.
pub const DATA_ROOT: &str = "/data";

/// Storage path utilities for the document store.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== Student Paths ==========

    /// Directory containing all student records.
    pub fn students_dir(&self) -> PathBuf {
        self.root.join("students")
    }

    /// Path to a specific student record.
    pub fn student(&self, student_id: &str) -> PathBuf {
        self.students_dir().join(format!("{student_id}.json"))
    }

    // ========== Teacher Paths ==========

    /// Directory containing all teacher records.
    pub fn teachers_dir(&self) -> PathBuf {
        self.root.join("teachers")
    }

    /// Path to a specific teacher record.
    pub fn teacher(&self, teacher_id: &str) -> PathBuf {
        self.teachers_dir().join(format!("{teacher_id}.json"))
    }

    // ========== Category Paths ==========

    /// Directory containing all categories.
    pub fn categories_dir(&self) -> PathBuf {
        self.root.join("categories")
    }

    /// Path to a specific category record.
    pub fn category(&self, category_id: &str) -> PathBuf {
        self.categories_dir().join(format!("{category_id}.json"))
    }

    // ========== Course Paths ==========

    /// Directory containing all courses.
    pub fn courses_dir(&self) -> PathBuf {
        self.root.join("courses")
    }

    /// Path to a specific course record.
    pub fn course(&self, course_id: &str) -> PathBuf {
        self.courses_dir().join(format!("{course_id}.json"))
    }

    // ========== Lesson Paths ==========

    /// Directory containing all lessons.
    pub fn lessons_dir(&self) -> PathBuf {
        self.root.join("lessons")
    }

    /// Path to a specific lesson record.
    pub fn lesson(&self, lesson_id: &str) -> PathBuf {
        self.lessons_dir().join(format!("{lesson_id}.json"))
    }

    // ========== Quiz Paths ==========

    /// Directory containing all quizzes.
    pub fn quizzes_dir(&self) -> PathBuf {
        self.root.join("quizzes")
    }

    /// Path to a specific quiz record.
    pub fn quiz(&self, quiz_id: &str) -> PathBuf {
        self.quizzes_dir().join(format!("{quiz_id}.json"))
    }
}
