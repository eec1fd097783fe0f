// src/registry/mod.rs
// Enrollment registry - per-student records, the only mutable shared state

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::catalog::course_key;

/// Informational status only; nothing in the core branches on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcademicStanding {
    #[default]
    Good,
    Probation,
    Suspended,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub student_id: String,
    #[serde(default)]
    pub completed_courses: HashSet<String>,
    #[serde(default)]
    pub current_enrollments: HashSet<String>,
    #[serde(default)]
    pub academic_standing: AcademicStanding,
}

impl StudentProfile {
    pub fn new(student_id: &str) -> Self {
        Self {
            student_id: student_id.to_string(),
            completed_courses: HashSet::new(),
            current_enrollments: HashSet::new(),
            academic_standing: AcademicStanding::default(),
        }
    }

    pub fn has_completed(&self, course_id: &str) -> bool {
        self.completed_courses.contains(&course_key(course_id))
    }

    pub fn is_enrolled(&self, course_id: &str) -> bool {
        self.current_enrollments.contains(&course_key(course_id))
    }

    /// Rewrite both course sets to canonical keys so membership checks
    /// stay case-insensitive regardless of how a seed file spelled them.
    fn canonicalize(&mut self) {
        self.completed_courses = std::mem::take(&mut self.completed_courses)
            .into_iter()
            .map(|id| course_key(&id))
            .collect();
        self.current_enrollments = std::mem::take(&mut self.current_enrollments)
            .into_iter()
            .map(|id| course_key(&id))
            .collect();
    }
}

/// Per-student enrollment records.
///
/// A single write lock over the map makes read-check-create atomic per
/// student id (concurrent auto-provisioning leaves exactly one profile)
/// and serializes register/drop on the same record, so an insertion is
/// never silently lost.
#[derive(Default)]
pub struct EnrollmentRegistry {
    students: RwLock<HashMap<String, StudentProfile>>,
}

impl EnrollmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_students(profiles: Vec<StudentProfile>) -> Self {
        let mut students = HashMap::with_capacity(profiles.len());
        for mut profile in profiles {
            profile.canonicalize();
            students.insert(profile.student_id.clone(), profile);
        }
        Self { students: RwLock::new(students) }
    }

    /// Load seed records from a JSON file: either a bare array of
    /// profiles or an object with a `students` field.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read students file {}", path.display()))?;
        let profiles = parse_students(&raw)
            .with_context(|| format!("invalid students file {}", path.display()))?;
        Ok(Self::with_students(profiles))
    }

    /// Built-in sample records matching the seed catalog.
    pub fn seed() -> Self {
        let mut alice = StudentProfile::new("alice");
        alice.completed_courses = ["CS101", "MATH101"].map(String::from).into();
        alice.current_enrollments = ["CS201"].map(String::from).into();

        let mut bob = StudentProfile::new("bob");
        bob.academic_standing = AcademicStanding::Probation;

        Self::with_students(vec![alice, bob])
    }

    /// Snapshot of one student's record.
    pub async fn get(&self, student_id: &str) -> Option<StudentProfile> {
        self.students.read().await.get(student_id).cloned()
    }

    pub async fn student_count(&self) -> usize {
        self.students.read().await.len()
    }

    /// Run `f` against the student's profile, creating an empty profile
    /// first if none exists. The write lock spans the whole call.
    pub(crate) async fn update_or_create<T>(
        &self,
        student_id: &str,
        f: impl FnOnce(&mut StudentProfile) -> T,
    ) -> T {
        let mut students = self.students.write().await;
        let profile = students
            .entry(student_id.to_string())
            .or_insert_with(|| StudentProfile::new(student_id));
        f(profile)
    }

    /// Run `f` against an existing profile; `None` when the student has
    /// no record. No profile is created.
    pub(crate) async fn update_existing<T>(
        &self,
        student_id: &str,
        f: impl FnOnce(&mut StudentProfile) -> T,
    ) -> Option<T> {
        let mut students = self.students.write().await;
        students.get_mut(student_id).map(f)
    }
}

#[derive(Deserialize)]
struct StudentsFile {
    students: Vec<StudentProfile>,
}

fn parse_students(raw: &str) -> Result<Vec<StudentProfile>> {
    if let Ok(profiles) = serde_json::from_str::<Vec<StudentProfile>>(raw) {
        return Ok(profiles);
    }
    let file: StudentsFile = serde_json::from_str(raw)?;
    Ok(file.students)
}
