// src/query.rs
// Read-only projections over catalog and registry state

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{Catalog, Course};
use crate::eligibility::Eligibility;
use crate::registry::{AcademicStanding, EnrollmentRegistry, StudentProfile};

/// Presentation view of one student's record. Course ids are shown with
/// the catalog's declared spelling where the course is known, sorted
/// for stable output.
#[derive(Debug, Serialize)]
pub struct StudentSnapshot {
    pub student_id: String,
    pub academic_standing: AcademicStanding,
    pub completed_courses: Vec<String>,
    pub current_enrollments: Vec<String>,
}

/// Thin accessors composing catalog and profile lookups. No invariants
/// live here; current state is only shaped for presentation.
pub struct QueryLayer {
    catalog: Arc<Catalog>,
    registry: Arc<EnrollmentRegistry>,
}

impl QueryLayer {
    pub fn new(catalog: Arc<Catalog>, registry: Arc<EnrollmentRegistry>) -> Self {
        Self { catalog, registry }
    }

    /// Every offered course, in catalog order.
    pub fn catalog_listing(&self) -> Vec<Course> {
        self.catalog.courses().to_vec()
    }

    pub async fn student_snapshot(&self, student_id: &str) -> Option<StudentSnapshot> {
        let profile = self.registry.get(student_id).await?;
        Some(self.project(profile))
    }

    fn project(&self, profile: StudentProfile) -> StudentSnapshot {
        let mut completed: Vec<String> =
            profile.completed_courses.iter().map(|id| self.display_id(id)).collect();
        let mut enrolled: Vec<String> =
            profile.current_enrollments.iter().map(|id| self.display_id(id)).collect();
        completed.sort();
        enrolled.sort();

        StudentSnapshot {
            student_id: profile.student_id,
            academic_standing: profile.academic_standing,
            completed_courses: completed,
            current_enrollments: enrolled,
        }
    }

    fn display_id(&self, course_id: &str) -> String {
        self.catalog
            .canonical_id(course_id)
            .map(str::to_string)
            .unwrap_or_else(|| course_id.to_string())
    }

    /// Render a rich eligibility result as explanation text. Each of
    /// the four outcomes gets distinct wording; in particular a missing
    /// student record reads differently from a record with nothing
    /// completed.
    pub fn explain_eligibility(
        &self,
        student_id: &str,
        course_id: &str,
        result: &Eligibility,
    ) -> String {
        let course_label = self
            .catalog
            .get(course_id)
            .map(|c| format!("{}: {}", c.id, c.title))
            .unwrap_or_else(|| course_id.to_string());

        match result {
            Eligibility::Eligible => {
                format!("Student '{student_id}' meets all prerequisites for {course_label}.")
            }
            Eligibility::Ineligible { missing_prerequisites } => format!(
                "Student '{student_id}' cannot take {course_label} yet. Missing prerequisites: {}.",
                missing_prerequisites.join(", ")
            ),
            Eligibility::StudentNotFound => format!(
                "No academic record exists for student '{student_id}'. \
                 A record is created on their first registration."
            ),
            Eligibility::CourseNotFound => {
                format!("Course '{course_id}' is not in the catalog.")
            }
        }
    }
}
