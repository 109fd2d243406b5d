// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Course repository.
//!
//! Courses reference a teacher and a category and carry the ids of their
//! lessons and enrolled students. Referential updates (lesson creation,
//! enrollment) append to those lists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{DocumentStore, StorageError, StorageResult};

/// Course difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// Course record stored in the document store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StoredCourse {
    /// Unique course identifier (UUID)
    pub id: String,
    pub title: String,
    pub description: String,
    /// Owning teacher
    pub teacher_id: String,
    /// Catalog category
    pub category_id: String,
    /// URL slug, unique when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub level: CourseLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    /// Ids of enrolled students
    #[serde(default)]
    pub students: Vec<String>,
    /// Ids of lessons, in order of creation
    #[serde(default)]
    pub lessons: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog list filter.
#[derive(Debug, Default, Clone)]
pub struct CourseFilter {
    /// Case-insensitive substring match on the title.
    pub search: Option<String>,
    pub category_id: Option<String>,
    pub teacher_id: Option<String>,
}

impl CourseFilter {
    fn matches(&self, course: &StoredCourse) -> bool {
        if let Some(ref search) = self.search {
            if !course
                .title
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        if let Some(ref category_id) = self.category_id {
            if &course.category_id != category_id {
                return false;
            }
        }
        if let Some(ref teacher_id) = self.teacher_id {
            if &course.teacher_id != teacher_id {
                return false;
            }
        }
        true
    }
}

/// Repository for course operations on the document store.
pub struct CourseRepository<'a> {
    store: &'a DocumentStore,
}

impl<'a> CourseRepository<'a> {
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub fn exists(&self, course_id: &str) -> bool {
        self.store.exists(self.store.paths().course(course_id))
    }

    pub fn get(&self, course_id: &str) -> StorageResult<StoredCourse> {
        let path = self.store.paths().course(course_id);
        if !self.store.exists(&path) {
            return Err(StorageError::NotFound(format!("Course {course_id}")));
        }
        self.store.read_json(path)
    }

    /// Create a new course. The slug, when present, must be unique.
    pub fn create(&self, course: &StoredCourse) -> StorageResult<()> {
        if self.exists(&course.id) {
            return Err(StorageError::AlreadyExists(format!("Course {}", course.id)));
        }

        if let Some(ref slug) = course.slug {
            let existing = self.list(&CourseFilter::default())?;
            if existing.iter().any(|c| c.slug.as_deref() == Some(slug)) {
                return Err(StorageError::AlreadyExists(format!(
                    "Course with slug {slug}"
                )));
            }
        }

        self.store
            .write_json(self.store.paths().course(&course.id), course)
    }

    /// Update an existing course. The slug, when present, must stay unique.
    pub fn update(&self, course: &StoredCourse) -> StorageResult<()> {
        if !self.exists(&course.id) {
            return Err(StorageError::NotFound(format!("Course {}", course.id)));
        }

        if let Some(ref slug) = course.slug {
            let existing = self.list(&CourseFilter::default())?;
            if existing
                .iter()
                .any(|c| c.id != course.id && c.slug.as_deref() == Some(slug))
            {
                return Err(StorageError::AlreadyExists(format!(
                    "Course with slug {slug}"
                )));
            }
        }

        let mut course = course.clone();
        course.updated_at = Utc::now();
        self.store
            .write_json(self.store.paths().course(&course.id), &course)
    }

    pub fn delete(&self, course_id: &str) -> StorageResult<()> {
        if !self.exists(course_id) {
            return Err(StorageError::NotFound(format!("Course {course_id}")));
        }
        self.store.delete(self.store.paths().course(course_id))
    }

    /// Append a lesson id to the course.
    pub fn add_lesson(&self, course_id: &str, lesson_id: &str) -> StorageResult<StoredCourse> {
        let mut course = self.get(course_id)?;
        if !course.lessons.iter().any(|l| l == lesson_id) {
            course.lessons.push(lesson_id.to_string());
            self.update(&course)?;
        }
        self.get(course_id)
    }

    /// Record a student enrollment on the course side.
    ///
    /// Fails when the student is already enrolled.
    pub fn enroll_student(&self, course_id: &str, student_id: &str) -> StorageResult<StoredCourse> {
        let mut course = self.get(course_id)?;
        if course.students.iter().any(|s| s == student_id) {
            return Err(StorageError::AlreadyExists(format!(
                "Student {student_id} already enrolled in course {course_id}"
            )));
        }
        course.students.push(student_id.to_string());
        self.update(&course)?;
        self.get(course_id)
    }

    /// List courses matching a filter, ordered by creation time.
    pub fn list(&self, filter: &CourseFilter) -> StorageResult<Vec<StoredCourse>> {
        let ids = self
            .store
            .list_files(self.store.paths().courses_dir(), "json")?;

        let mut courses = Vec::new();
        for id in ids {
            if let Ok(course) = self.get(&id) {
                if filter.matches(&course) {
                    courses.push(course);
                }
            }
        }
        courses.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(courses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use tempfile::TempDir;

    fn test_store() -> (DocumentStore, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let mut store = DocumentStore::new(StoragePaths::new(dir.path()));
        store.initialize().expect("initialize");
        (store, dir)
    }

    fn test_course(id: &str, title: &str, teacher: &str, category: &str) -> StoredCourse {
        StoredCourse {
            id: id.to_string(),
            title: title.to_string(),
            description: "A course".to_string(),
            teacher_id: teacher.to_string(),
            category_id: category.to_string(),
            slug: None,
            price: 0.0,
            level: CourseLevel::Beginner,
            thumbnail: None,
            duration: None,
            language: None,
            requirements: Vec::new(),
            features: Vec::new(),
            students: Vec::new(),
            lessons: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn filter_by_search_category_and_teacher() {
        let (store, _dir) = test_store();
        let repo = CourseRepository::new(&store);

        repo.create(&test_course("c-1", "Intro to Rust", "t-1", "cat-1"))
            .unwrap();
        repo.create(&test_course("c-2", "Advanced Rust", "t-1", "cat-2"))
            .unwrap();
        repo.create(&test_course("c-3", "Watercolor Painting", "t-2", "cat-3"))
            .unwrap();

        let rust = repo
            .list(&CourseFilter {
                search: Some("rust".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(rust.len(), 2);

        let by_teacher = repo
            .list(&CourseFilter {
                teacher_id: Some("t-2".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_teacher.len(), 1);
        assert_eq!(by_teacher[0].id, "c-3");

        let by_category = repo
            .list(&CourseFilter {
                category_id: Some("cat-2".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_category.len(), 1);
    }

    #[test]
    fn duplicate_slug_rejected() {
        let (store, _dir) = test_store();
        let repo = CourseRepository::new(&store);

        let mut course = test_course("c-1", "First", "t-1", "cat-1");
        course.slug = Some("intro".to_string());
        repo.create(&course).unwrap();

        let mut other = test_course("c-2", "Second", "t-1", "cat-1");
        other.slug = Some("intro".to_string());
        let result = repo.create(&other);
        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));
    }

    #[test]
    fn update_to_taken_slug_rejected() {
        let (store, _dir) = test_store();
        let repo = CourseRepository::new(&store);

        let mut first = test_course("c-1", "First", "t-1", "cat-1");
        first.slug = Some("intro".to_string());
        repo.create(&first).unwrap();

        let second = test_course("c-2", "Second", "t-1", "cat-1");
        repo.create(&second).unwrap();

        let mut renamed = second.clone();
        renamed.slug = Some("intro".to_string());
        let result = repo.update(&renamed);
        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));

        // Keeping its own slug is not a conflict.
        first.title = "First, revised".to_string();
        repo.update(&first).unwrap();
    }

    #[test]
    fn enroll_student_rejects_duplicates() {
        let (store, _dir) = test_store();
        let repo = CourseRepository::new(&store);

        repo.create(&test_course("c-1", "Course", "t-1", "cat-1"))
            .unwrap();

        let enrolled = repo.enroll_student("c-1", "s-1").unwrap();
        assert_eq!(enrolled.students, vec!["s-1"]);

        let result = repo.enroll_student("c-1", "s-1");
        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));
    }

    #[test]
    fn add_lesson_is_idempotent() {
        let (store, _dir) = test_store();
        let repo = CourseRepository::new(&store);

        repo.create(&test_course("c-1", "Course", "t-1", "cat-1"))
            .unwrap();

        repo.add_lesson("c-1", "l-1").unwrap();
        let course = repo.add_lesson("c-1", "l-1").unwrap();
        assert_eq!(course.lessons, vec!["l-1"]);
    }
}
