// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Lesson repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{DocumentStore, StorageError, StorageResult};

/// Lesson record stored in the document store.
///
/// A lesson always belongs to a course; it may optionally reference a quiz.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StoredLesson {
    /// Unique lesson identifier (UUID)
    pub id: String,
    /// Owning course
    pub course_id: String,
    pub title: String,
    /// Lecture video link
    pub video_url: String,
    /// Attached material (PDF, slides)
    pub file_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Quiz attached to this lesson, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Repository for lesson operations on the document store.
pub struct LessonRepository<'a> {
    store: &'a DocumentStore,
}

impl<'a> LessonRepository<'a> {
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub fn exists(&self, lesson_id: &str) -> bool {
        self.store.exists(self.store.paths().lesson(lesson_id))
    }

    pub fn get(&self, lesson_id: &str) -> StorageResult<StoredLesson> {
        let path = self.store.paths().lesson(lesson_id);
        if !self.store.exists(&path) {
            return Err(StorageError::NotFound(format!("Lesson {lesson_id}")));
        }
        self.store.read_json(path)
    }

    pub fn create(&self, lesson: &StoredLesson) -> StorageResult<()> {
        if self.exists(&lesson.id) {
            return Err(StorageError::AlreadyExists(format!("Lesson {}", lesson.id)));
        }

        self.store
            .write_json(self.store.paths().lesson(&lesson.id), lesson)
    }

    pub fn update(&self, lesson: &StoredLesson) -> StorageResult<()> {
        if !self.exists(&lesson.id) {
            return Err(StorageError::NotFound(format!("Lesson {}", lesson.id)));
        }

        let mut lesson = lesson.clone();
        lesson.updated_at = Utc::now();
        self.store
            .write_json(self.store.paths().lesson(&lesson.id), &lesson)
    }

    pub fn delete(&self, lesson_id: &str) -> StorageResult<()> {
        if !self.exists(lesson_id) {
            return Err(StorageError::NotFound(format!("Lesson {lesson_id}")));
        }
        self.store.delete(self.store.paths().lesson(lesson_id))
    }

    /// List all lessons ordered by creation time.
    pub fn list_all(&self) -> StorageResult<Vec<StoredLesson>> {
        let ids = self
            .store
            .list_files(self.store.paths().lessons_dir(), "json")?;

        let mut lessons = Vec::new();
        for id in ids {
            if let Ok(lesson) = self.get(&id) {
                lessons.push(lesson);
            }
        }
        lessons.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(lessons)
    }

    /// List lessons belonging to a course, in the course's stored order.
    pub fn list_for_course(&self, lesson_ids: &[String]) -> StorageResult<Vec<StoredLesson>> {
        let mut lessons = Vec::new();
        for id in lesson_ids {
            if let Ok(lesson) = self.get(id) {
                lessons.push(lesson);
            }
        }
        Ok(lessons)
    }
}
