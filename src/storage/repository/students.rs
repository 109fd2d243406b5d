// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Student repository.
//!
//! Students are the user records behind authentication: credential accounts
//! carry an argon2 password hash, federated accounts carry a provider
//! account id instead (or both, once linked). Email is the unique,
//! case-sensitive lookup key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Role;

use super::super::{DocumentStore, StorageError, StorageResult};

/// Per-quiz attempt progress for a student.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct QuizAttemptRecord {
    /// Quiz this record tracks.
    pub quiz_id: String,
    /// Number of attempts taken so far.
    pub attempts: u32,
    /// Maximum attempts allowed for this student.
    pub max_attempts: u32,
    /// Score of each attempt, in order.
    pub scores: Vec<u32>,
    /// Best score across all attempts.
    pub best_score: u32,
}

/// Student record stored in the document store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StoredStudent {
    /// Unique student identifier (UUID)
    pub id: String,
    /// Federated identity provider account id, if linked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_account_id: Option<String>,
    /// Display name
    pub full_name: String,
    /// Unique email (case-sensitive key)
    pub email: String,
    /// Argon2 password hash; absent for pure federated accounts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// Avatar URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Age, collected during profile completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Authorization role
    #[serde(default)]
    pub role: Role,
    /// Whether the student finished onboarding (the `isValid` session flag)
    #[serde(default)]
    pub profile_complete: bool,
    /// Ids of courses the student is enrolled in
    #[serde(default)]
    pub courses_enrolled: Vec<String>,
    /// Leaderboard rank
    #[serde(default)]
    pub rank: u32,
    /// Quiz attempt progress
    #[serde(default)]
    pub quiz_progress: Vec<QuizAttemptRecord>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
    /// When the record was last updated
    pub updated_at: DateTime<Utc>,
}

impl StoredStudent {
    /// Progress record for a quiz, if any attempt has been made.
    pub fn quiz_record(&self, quiz_id: &str) -> Option<&QuizAttemptRecord> {
        self.quiz_progress.iter().find(|r| r.quiz_id == quiz_id)
    }
}

/// Repository for student operations on the document store.
pub struct StudentRepository<'a> {
    store: &'a DocumentStore,
}

impl<'a> StudentRepository<'a> {
    /// Create a new StudentRepository.
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    /// Check if a student exists.
    pub fn exists(&self, student_id: &str) -> bool {
        self.store.exists(self.store.paths().student(student_id))
    }

    /// Get a student by id.
    pub fn get(&self, student_id: &str) -> StorageResult<StoredStudent> {
        let path = self.store.paths().student(student_id);
        if !self.store.exists(&path) {
            return Err(StorageError::NotFound(format!("Student {student_id}")));
        }
        self.store.read_json(path)
    }

    /// Find a student by email (exact, case-sensitive match).
    pub fn find_by_email(&self, email: &str) -> StorageResult<StoredStudent> {
        for id in self.ids()? {
            if let Ok(student) = self.get(&id) {
                if student.email == email {
                    return Ok(student);
                }
            }
        }
        Err(StorageError::NotFound(format!(
            "Student with email {email}"
        )))
    }

    /// Find a student by federated provider account id.
    pub fn find_by_provider(&self, provider_account_id: &str) -> StorageResult<StoredStudent> {
        for id in self.ids()? {
            if let Ok(student) = self.get(&id) {
                if student.provider_account_id.as_deref() == Some(provider_account_id) {
                    return Ok(student);
                }
            }
        }
        Err(StorageError::NotFound(format!(
            "Student with provider account {provider_account_id}"
        )))
    }

    /// Create a new student.
    ///
    /// Enforces unique id, email, and provider account id.
    pub fn create(&self, student: &StoredStudent) -> StorageResult<()> {
        if self.exists(&student.id) {
            return Err(StorageError::AlreadyExists(format!(
                "Student {}",
                student.id
            )));
        }

        if self.find_by_email(&student.email).is_ok() {
            return Err(StorageError::AlreadyExists(format!(
                "Student with email {}",
                student.email
            )));
        }

        if let Some(ref provider) = student.provider_account_id {
            if self.find_by_provider(provider).is_ok() {
                return Err(StorageError::AlreadyExists(format!(
                    "Student with provider account {provider}"
                )));
            }
        }

        self.store
            .write_json(self.store.paths().student(&student.id), student)
    }

    /// Update an existing student.
    pub fn update(&self, student: &StoredStudent) -> StorageResult<()> {
        if !self.exists(&student.id) {
            return Err(StorageError::NotFound(format!("Student {}", student.id)));
        }

        let mut student = student.clone();
        student.updated_at = Utc::now();
        self.store
            .write_json(self.store.paths().student(&student.id), &student)
    }

    /// Link a federated provider account id to an existing student.
    ///
    /// Linking happens at most once; an already-linked record is returned
    /// unchanged, even when the link request carries a different key.
    pub fn link_provider(
        &self,
        student_id: &str,
        provider_account_id: &str,
    ) -> StorageResult<StoredStudent> {
        let mut student = self.get(student_id)?;

        if student.provider_account_id.is_none() {
            student.provider_account_id = Some(provider_account_id.to_string());
            self.update(&student)?;
        }

        self.get(student_id)
    }

    /// Record a quiz attempt score against a student's progress.
    ///
    /// The attempt-limit check belongs to the caller; this method only
    /// appends the score and maintains the best-score aggregate.
    pub fn record_quiz_attempt(
        &self,
        student_id: &str,
        quiz_id: &str,
        score: u32,
        max_attempts: u32,
    ) -> StorageResult<QuizAttemptRecord> {
        let mut student = self.get(student_id)?;

        let record = match student
            .quiz_progress
            .iter_mut()
            .find(|r| r.quiz_id == quiz_id)
        {
            Some(record) => {
                record.attempts += 1;
                record.scores.push(score);
                record.best_score = record.best_score.max(score);
                record.clone()
            }
            None => {
                let record = QuizAttemptRecord {
                    quiz_id: quiz_id.to_string(),
                    attempts: 1,
                    max_attempts,
                    scores: vec![score],
                    best_score: score,
                };
                student.quiz_progress.push(record.clone());
                record
            }
        };

        self.update(&student)?;
        Ok(record)
    }

    /// List all students.
    pub fn list_all(&self) -> StorageResult<Vec<StoredStudent>> {
        let mut students = Vec::new();
        for id in self.ids()? {
            if let Ok(student) = self.get(&id) {
                students.push(student);
            }
        }
        students.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(students)
    }

    /// Total number of student records.
    pub fn count(&self) -> StorageResult<usize> {
        Ok(self.ids()?.len())
    }

    fn ids(&self) -> StorageResult<Vec<String>> {
        self.store
            .list_files(self.store.paths().students_dir(), "json")
    }
}
