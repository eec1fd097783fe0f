// src/eligibility.rs
// Prerequisite eligibility - pure decision over (student, course)

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::registry::EnrollmentRegistry;

/// Outcome of a prerequisite check.
///
/// `StudentNotFound` is deliberately distinct from a known student with
/// zero completions: absence of a record and a record with nothing
/// completed produce different explanations downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Eligibility {
    Eligible,
    Ineligible { missing_prerequisites: Vec<String> },
    StudentNotFound,
    CourseNotFound,
}

impl Eligibility {
    /// Collapse to the single boolean exposed at the tool boundary.
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }
}

/// Decides whether a student's completed courses satisfy a course's
/// declared prerequisites. Only direct prerequisites are consulted; a
/// prerequisite's own prerequisites are never expanded.
pub struct EligibilityEngine {
    catalog: Arc<Catalog>,
    registry: Arc<EnrollmentRegistry>,
}

impl EligibilityEngine {
    pub fn new(catalog: Arc<Catalog>, registry: Arc<EnrollmentRegistry>) -> Self {
        Self { catalog, registry }
    }

    /// No side effects; safe for any number of concurrent callers.
    pub async fn check(&self, student_id: &str, course_id: &str) -> Eligibility {
        let Some(course) = self.catalog.get(course_id) else {
            return Eligibility::CourseNotFound;
        };
        let Some(profile) = self.registry.get(student_id).await else {
            return Eligibility::StudentNotFound;
        };

        // Declared order and spelling are preserved in the missing list.
        let missing: Vec<String> = course
            .prerequisites
            .iter()
            .filter(|prereq| !profile.has_completed(prereq))
            .cloned()
            .collect();

        if missing.is_empty() {
            Eligibility::Eligible
        } else {
            Eligibility::Ineligible { missing_prerequisites: missing }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StudentProfile;

    fn engine_with(profiles: Vec<StudentProfile>) -> EligibilityEngine {
        EligibilityEngine::new(
            Arc::new(Catalog::seed()),
            Arc::new(EnrollmentRegistry::with_students(profiles)),
        )
    }

    fn student(id: &str, completed: &[&str]) -> StudentProfile {
        let mut profile = StudentProfile::new(id);
        profile.completed_courses = completed.iter().map(|c| c.to_string()).collect();
        profile
    }

    #[tokio::test]
    async fn eligible_when_direct_prerequisites_completed() {
        let engine = engine_with(vec![student("alice", &["CS101"])]);
        assert_eq!(engine.check("alice", "CS201").await, Eligibility::Eligible);
    }

    #[tokio::test]
    async fn missing_prerequisites_keep_declared_order() {
        let engine = engine_with(vec![student("bob", &[])]);
        assert_eq!(
            engine.check("bob", "CS301").await,
            Eligibility::Ineligible {
                missing_prerequisites: vec!["CS201".to_string(), "MATH201".to_string()],
            }
        );
    }

    #[tokio::test]
    async fn unknown_student_is_not_an_empty_record() {
        let engine = engine_with(vec![student("bob", &[])]);

        assert_eq!(engine.check("ghost", "CS201").await, Eligibility::StudentNotFound);
        assert_eq!(
            engine.check("bob", "CS201").await,
            Eligibility::Ineligible { missing_prerequisites: vec!["CS101".to_string()] }
        );
    }

    #[tokio::test]
    async fn unknown_course_is_signalled() {
        let engine = engine_with(vec![student("alice", &["CS101"])]);
        assert_eq!(engine.check("alice", "CS999").await, Eligibility::CourseNotFound);
    }

    #[tokio::test]
    async fn completion_comparison_is_case_insensitive() {
        let engine = engine_with(vec![student("alice", &["cs101"])]);
        assert_eq!(engine.check("alice", "cs201").await, Eligibility::Eligible);
    }

    #[tokio::test]
    async fn prerequisites_are_not_expanded_transitively() {
        // CS301 declares CS201 and MATH201; CS101 is only a prerequisite
        // of CS201, so not completing it does not block CS301.
        let engine = engine_with(vec![student("carol", &["CS201", "MATH201"])]);
        assert_eq!(engine.check("carol", "CS301").await, Eligibility::Eligible);
    }

    #[tokio::test]
    async fn unknown_prerequisite_id_is_unsatisfiable() {
        let catalog = Catalog::new(vec![crate::catalog::Course {
            id: "CS900".into(),
            title: "Capstone".into(),
            description: String::new(),
            prerequisites: vec!["CS899".into()],
        }])
        .unwrap();
        let engine = EligibilityEngine::new(
            Arc::new(catalog),
            Arc::new(EnrollmentRegistry::with_students(vec![student("dora", &["CS101"])])),
        );

        assert_eq!(
            engine.check("dora", "CS900").await,
            Eligibility::Ineligible { missing_prerequisites: vec!["CS899".to_string()] }
        );
    }
}
