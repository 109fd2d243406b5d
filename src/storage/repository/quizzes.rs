// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Quiz repository and grading.
//!
//! A quiz belongs to a lesson and carries a list of questions. Questions
//! come in two shapes: a single multiple-choice question, or a reading
//! passage with several sub-questions. Grading counts correct answers over
//! all answerable items and scales to 0..=100.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{DocumentStore, StorageError, StorageResult};

/// A sub-question inside a passage question.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SubQuestion {
    pub question: String,
    /// Answer options (conventionally four)
    pub options: Vec<String>,
    /// Index of the correct option
    pub correct_answer: u32,
}

/// A quiz question.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum QuizQuestion {
    /// A single multiple-choice question.
    #[serde(rename = "SINGLE")]
    Single {
        question: String,
        options: Vec<String>,
        /// Index of the correct option
        correct_answer: u32,
    },
    /// A reading passage with several sub-questions.
    #[serde(rename = "PASSAGE")]
    Passage {
        passage: String,
        sub_questions: Vec<SubQuestion>,
    },
}

impl QuizQuestion {
    /// Number of answerable items this question contributes.
    pub fn item_count(&self) -> usize {
        match self {
            QuizQuestion::Single { .. } => 1,
            QuizQuestion::Passage { sub_questions, .. } => sub_questions.len(),
        }
    }
}

/// Submitted answer to a single question, positionally matched.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct QuestionAnswer {
    /// Selected option for a SINGLE question
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<u32>,
    /// Selected options for each sub-question of a PASSAGE question
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_answers: Option<Vec<u32>>,
}

/// Quiz record stored in the document store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StoredQuiz {
    /// Unique quiz identifier (UUID)
    pub id: String,
    /// Lesson this quiz belongs to
    pub lesson_id: String,
    pub questions: Vec<QuizQuestion>,
    /// Maximum attempts per student
    pub quiz_limit: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredQuiz {
    /// Grade a set of submitted answers, returning a 0..=100 score.
    ///
    /// Missing or out-of-range answers count as wrong; an empty quiz
    /// grades to zero.
    pub fn grade(&self, answers: &[QuestionAnswer]) -> u32 {
        let total: usize = self.questions.iter().map(QuizQuestion::item_count).sum();
        if total == 0 {
            return 0;
        }

        let mut correct = 0usize;
        for (index, question) in self.questions.iter().enumerate() {
            let answer = answers.get(index);
            match question {
                QuizQuestion::Single { correct_answer, .. } => {
                    if answer.and_then(|a| a.selected) == Some(*correct_answer) {
                        correct += 1;
                    }
                }
                QuizQuestion::Passage { sub_questions, .. } => {
                    let sub_answers = answer.and_then(|a| a.sub_answers.as_deref());
                    for (sub_index, sub) in sub_questions.iter().enumerate() {
                        if sub_answers.and_then(|s| s.get(sub_index)).copied()
                            == Some(sub.correct_answer)
                        {
                            correct += 1;
                        }
                    }
                }
            }
        }

        ((correct * 100) / total) as u32
    }
}

/// Repository for quiz operations on the document store.
pub struct QuizRepository<'a> {
    store: &'a DocumentStore,
}

impl<'a> QuizRepository<'a> {
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub fn exists(&self, quiz_id: &str) -> bool {
        self.store.exists(self.store.paths().quiz(quiz_id))
    }

    pub fn get(&self, quiz_id: &str) -> StorageResult<StoredQuiz> {
        let path = self.store.paths().quiz(quiz_id);
        if !self.store.exists(&path) {
            return Err(StorageError::NotFound(format!("Quiz {quiz_id}")));
        }
        self.store.read_json(path)
    }

    pub fn create(&self, quiz: &StoredQuiz) -> StorageResult<()> {
        if self.exists(&quiz.id) {
            return Err(StorageError::AlreadyExists(format!("Quiz {}", quiz.id)));
        }

        self.store.write_json(self.store.paths().quiz(&quiz.id), quiz)
    }

    pub fn update(&self, quiz: &StoredQuiz) -> StorageResult<()> {
        if !self.exists(&quiz.id) {
            return Err(StorageError::NotFound(format!("Quiz {}", quiz.id)));
        }

        let mut quiz = quiz.clone();
        quiz.updated_at = Utc::now();
        self.store
            .write_json(self.store.paths().quiz(&quiz.id), &quiz)
    }

    pub fn delete(&self, quiz_id: &str) -> StorageResult<()> {
        if !self.exists(quiz_id) {
            return Err(StorageError::NotFound(format!("Quiz {quiz_id}")));
        }
        self.store.delete(self.store.paths().quiz(quiz_id))
    }

    pub fn list_all(&self) -> StorageResult<Vec<StoredQuiz>> {
        let ids = self
            .store
            .list_files(self.store.paths().quizzes_dir(), "json")?;

        let mut quizzes = Vec::new();
        for id in ids {
            if let Ok(quiz) = self.get(&id) {
                quizzes.push(quiz);
            }
        }
        quizzes.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(quizzes)
    }
}
