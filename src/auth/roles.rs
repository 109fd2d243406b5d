// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles for authorization.
///
/// ## Role Hierarchy
///
/// - `Admin` - full access to catalog management and student administration
/// - `Teacher` - course authoring plus everything a student can do
/// - `Student` - enrollment, lessons, quiz attempts
///
/// The canonical set is exactly these three values; role strings from
/// tokens or records that parse to anything else are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full administrative access
    Admin,
    /// Course author (includes student privileges)
    Teacher,
    /// Normal learner account
    Student,
}

impl Role {
    /// Check if this role has at least the privileges of the required role.
    pub fn has_privilege(&self, required: Role) -> bool {
        match (self, required) {
            // Admin can do anything
            (Role::Admin, _) => true,
            // Teacher covers teacher and student operations
            (Role::Teacher, Role::Teacher | Role::Student) => true,
            (Role::Student, Role::Student) => true,
            _ => false,
        }
    }

    /// Parse role from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Role> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "TEACHER" => Some(Role::Teacher),
            "STUDENT" => Some(Role::Student),
            _ => None,
        }
    }
}

impl Default for Role {
    /// Default role is Student (least privilege for authenticated users).
    fn default() -> Self {
        Role::Student
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Teacher => write!(f, "TEACHER"),
            Role::Student => write!(f, "STUDENT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_has_all_privileges() {
        assert!(Role::Admin.has_privilege(Role::Admin));
        assert!(Role::Admin.has_privilege(Role::Teacher));
        assert!(Role::Admin.has_privilege(Role::Student));
    }

    #[test]
    fn teacher_covers_student_but_not_admin() {
        assert!(!Role::Teacher.has_privilege(Role::Admin));
        assert!(Role::Teacher.has_privilege(Role::Teacher));
        assert!(Role::Teacher.has_privilege(Role::Student));
    }

    #[test]
    fn student_only_has_student_privilege() {
        assert!(!Role::Student.has_privilege(Role::Admin));
        assert!(!Role::Student.has_privilege(Role::Teacher));
        assert!(Role::Student.has_privilege(Role::Student));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("Student"), Some(Role::Student));
        assert_eq!(Role::parse("teacher"), Some(Role::Teacher));
        assert_eq!(Role::parse("auditor"), None);
    }

    #[test]
    fn serializes_to_screaming_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"STUDENT\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
    }

    #[test]
    fn default_role_is_student() {
        assert_eq!(Role::default(), Role::Student);
    }
}
