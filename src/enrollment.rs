// src/enrollment.rs
// Enrollment manager - the only component that mutates current enrollments

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::course_key;
use crate::registry::EnrollmentRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegisterOutcome {
    Registered,
    /// Benign idempotency signal, not a fault.
    AlreadyEnrolled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropOutcome {
    Dropped,
    NotEnrolled,
}

/// Mutates registry state under the registry's write lock. Every input
/// pair maps to exactly one outcome; no path can leave a course id in
/// a student's enrollment set twice.
pub struct EnrollmentManager {
    registry: Arc<EnrollmentRegistry>,
}

impl EnrollmentManager {
    pub fn new(registry: Arc<EnrollmentRegistry>) -> Self {
        Self { registry }
    }

    /// Register a student for a course. An unknown student gets a fresh
    /// profile (first contact creates identity). Neither course
    /// existence nor eligibility is checked here: eligibility is a
    /// separately queryable fact, not a registration precondition.
    pub async fn register(&self, student_id: &str, course_id: &str) -> RegisterOutcome {
        let key = course_key(course_id);
        self.registry
            .update_or_create(student_id, |profile| {
                if profile.current_enrollments.insert(key) {
                    RegisterOutcome::Registered
                } else {
                    RegisterOutcome::AlreadyEnrolled
                }
            })
            .await
    }

    /// Drop a course. Unknown students and non-enrolled courses are the
    /// same benign `NotEnrolled`; no profile is ever created on drop.
    pub async fn drop(&self, student_id: &str, course_id: &str) -> DropOutcome {
        let key = course_key(course_id);
        self.registry
            .update_existing(student_id, |profile| {
                if profile.current_enrollments.remove(&key) {
                    DropOutcome::Dropped
                } else {
                    DropOutcome::NotEnrolled
                }
            })
            .await
            .unwrap_or(DropOutcome::NotEnrolled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> (EnrollmentManager, Arc<EnrollmentRegistry>) {
        let registry = Arc::new(EnrollmentRegistry::new());
        (EnrollmentManager::new(registry.clone()), registry)
    }

    #[tokio::test]
    async fn register_auto_provisions_and_is_idempotent() {
        let (manager, registry) = manager();

        assert_eq!(manager.register("s1", "CS201").await, RegisterOutcome::Registered);
        assert_eq!(manager.register("s1", "CS201").await, RegisterOutcome::AlreadyEnrolled);

        let profile = registry.get("s1").await.unwrap();
        assert_eq!(profile.current_enrollments.len(), 1);
        assert!(profile.is_enrolled("CS201"));
    }

    #[tokio::test]
    async fn reregistration_is_caught_across_id_casing() {
        let (manager, _registry) = manager();

        assert_eq!(manager.register("s1", "CS201").await, RegisterOutcome::Registered);
        assert_eq!(manager.register("s1", "cs201").await, RegisterOutcome::AlreadyEnrolled);
    }

    #[tokio::test]
    async fn unknown_course_ids_register_structurally() {
        // Course existence is not validated at this boundary.
        let (manager, registry) = manager();

        assert_eq!(manager.register("s1", "NOPE999").await, RegisterOutcome::Registered);
        assert!(registry.get("s1").await.unwrap().is_enrolled("NOPE999"));
    }

    #[tokio::test]
    async fn drop_after_register_then_drop_again() {
        let (manager, _registry) = manager();
        manager.register("s1", "CS201").await;

        assert_eq!(manager.drop("s1", "CS201").await, DropOutcome::Dropped);
        assert_eq!(manager.drop("s1", "CS201").await, DropOutcome::NotEnrolled);
    }

    #[tokio::test]
    async fn drop_never_creates_a_profile() {
        let (manager, registry) = manager();

        assert_eq!(manager.drop("ghost", "CS201").await, DropOutcome::NotEnrolled);
        assert_eq!(registry.student_count().await, 0);
    }

    #[tokio::test]
    async fn concurrent_registers_for_different_courses_both_land() {
        let (manager, registry) = manager();
        let manager = Arc::new(manager);

        let a = tokio::spawn({
            let m = manager.clone();
            async move { m.register("s1", "CS201").await }
        });
        let b = tokio::spawn({
            let m = manager.clone();
            async move { m.register("s1", "MATH201").await }
        });

        assert_eq!(a.await.unwrap(), RegisterOutcome::Registered);
        assert_eq!(b.await.unwrap(), RegisterOutcome::Registered);

        let profile = registry.get("s1").await.unwrap();
        assert_eq!(registry.student_count().await, 1);
        assert!(profile.is_enrolled("CS201"));
        assert!(profile.is_enrolled("MATH201"));
    }

    #[tokio::test]
    async fn concurrent_register_and_drop_stay_consistent() {
        let (manager, registry) = manager();
        let manager = Arc::new(manager);

        for _ in 0..50 {
            let reg = tokio::spawn({
                let m = manager.clone();
                async move { m.register("s1", "CS201").await }
            });
            let dr = tokio::spawn({
                let m = manager.clone();
                async move { EnrollmentManager::drop(&m, "s1", "CS201").await }
            });
            reg.await.unwrap();
            dr.await.unwrap();

            // Whatever the interleaving, the record never holds the
            // course more than once.
            let profile = registry.get("s1").await.unwrap();
            assert!(profile.current_enrollments.len() <= 1);
        }
    }
}
