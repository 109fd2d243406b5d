// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Teacher repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{DocumentStore, StorageError, StorageResult};

/// Teacher record stored in the document store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StoredTeacher {
    /// Unique teacher identifier (UUID)
    pub id: String,
    /// Display name
    pub full_name: String,
    /// Unique email
    pub email: String,
    /// Avatar URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Short biography shown on course pages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Repository for teacher operations on the document store.
pub struct TeacherRepository<'a> {
    store: &'a DocumentStore,
}

impl<'a> TeacherRepository<'a> {
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub fn exists(&self, teacher_id: &str) -> bool {
        self.store.exists(self.store.paths().teacher(teacher_id))
    }

    pub fn get(&self, teacher_id: &str) -> StorageResult<StoredTeacher> {
        let path = self.store.paths().teacher(teacher_id);
        if !self.store.exists(&path) {
            return Err(StorageError::NotFound(format!("Teacher {teacher_id}")));
        }
        self.store.read_json(path)
    }

    /// Create a new teacher. Email must be unique.
    pub fn create(&self, teacher: &StoredTeacher) -> StorageResult<()> {
        if self.exists(&teacher.id) {
            return Err(StorageError::AlreadyExists(format!(
                "Teacher {}",
                teacher.id
            )));
        }

        let existing = self.list_all()?;
        if existing.iter().any(|t| t.email == teacher.email) {
            return Err(StorageError::AlreadyExists(format!(
                "Teacher with email {}",
                teacher.email
            )));
        }

        self.store
            .write_json(self.store.paths().teacher(&teacher.id), teacher)
    }

    /// List teachers, optionally filtered by a case-insensitive name search.
    pub fn list(&self, search: Option<&str>) -> StorageResult<Vec<StoredTeacher>> {
        let needle = search.map(str::to_lowercase);
        let mut teachers: Vec<StoredTeacher> = self
            .list_all()?
            .into_iter()
            .filter(|t| match &needle {
                Some(needle) => t.full_name.to_lowercase().contains(needle),
                None => true,
            })
            .collect();
        teachers.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(teachers)
    }

    fn list_all(&self) -> StorageResult<Vec<StoredTeacher>> {
        let ids = self
            .store
            .list_files(self.store.paths().teachers_dir(), "json")?;

        let mut teachers = Vec::new();
        for id in ids {
            if let Ok(teacher) = self.get(&id) {
                teachers.push(teacher);
            }
        }
        Ok(teachers)
    }
}
