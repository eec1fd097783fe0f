// src/catalog/mod.rs
// Course catalog - fixed set of offered courses, read-only after load

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Canonical lookup key for a course id. Ids are case-insensitive;
/// the declared spelling is kept for presentation.
pub(crate) fn course_key(id: &str) -> String {
    id.trim().to_ascii_lowercase()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Direct prerequisites, in declared order. May reference ids that
    /// are not in the catalog; those are unsatisfiable, not an error.
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

/// The offered courses for a session. Built once at startup and shared
/// via `Arc`; lookups are case-insensitive, iteration follows insertion
/// order. No interior mutability, so concurrent readers need no locks.
pub struct Catalog {
    courses: Vec<Course>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(courses: Vec<Course>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(courses.len());
        for (idx, course) in courses.iter().enumerate() {
            if by_id.insert(course_key(&course.id), idx).is_some() {
                bail!("duplicate course id in catalog: {}", course.id);
            }
        }
        Ok(Self { courses, by_id })
    }

    /// Load a catalog from a JSON file: either a bare array of course
    /// records or an object with a `courses` field.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file {}", path.display()))?;
        let courses =
            parse_courses(&raw).with_context(|| format!("invalid catalog file {}", path.display()))?;
        Self::new(courses)
    }

    /// Built-in sample catalog, used when no catalog file is configured.
    pub fn seed() -> Self {
        let courses = vec![
            seed_course("CS101", "Introduction to Computer Science", &[]),
            seed_course("CS201", "Data Structures and Algorithms", &["CS101"]),
            seed_course("CS301", "Operating Systems", &["CS201", "MATH201"]),
            seed_course("MATH101", "Calculus I", &[]),
            seed_course("MATH201", "Discrete Mathematics", &["MATH101"]),
            seed_course("ENG101", "Academic Writing", &[]),
        ];
        Self::new(courses).expect("seed catalog ids are unique")
    }

    /// Every course whose title contains `keyword`, case-insensitively.
    /// An empty keyword matches the whole catalog; an unmatched keyword
    /// is an empty result, never a failure.
    pub fn search(&self, keyword: &str) -> Vec<&Course> {
        let needle = keyword.trim().to_ascii_lowercase();
        self.courses
            .iter()
            .filter(|c| needle.is_empty() || c.title.to_ascii_lowercase().contains(&needle))
            .collect()
    }

    /// Case-insensitive exact match on course id.
    pub fn get(&self, course_id: &str) -> Option<&Course> {
        self.by_id.get(&course_key(course_id)).map(|&idx| &self.courses[idx])
    }

    /// All courses in insertion order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Declared spelling for a course id, if the course exists.
    pub fn canonical_id(&self, course_id: &str) -> Option<&str> {
        self.get(course_id).map(|c| c.id.as_str())
    }

    /// (course id, prerequisite id) pairs where the prerequisite does
    /// not resolve to any catalog course.
    pub fn unknown_prerequisites(&self) -> Vec<(String, String)> {
        let mut dangling = Vec::new();
        for course in &self.courses {
            for prereq in &course.prerequisites {
                if self.get(prereq).is_none() {
                    dangling.push((course.id.clone(), prereq.clone()));
                }
            }
        }
        dangling
    }
}

fn seed_course(id: &str, title: &str, prerequisites: &[&str]) -> Course {
    Course {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("{title} ({id})"),
        prerequisites: prerequisites.iter().map(|p| p.to_string()).collect(),
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    courses: Vec<Course>,
}

fn parse_courses(raw: &str) -> Result<Vec<Course>> {
    if let Ok(courses) = serde_json::from_str::<Vec<Course>>(raw) {
        return Ok(courses);
    }
    let file: CatalogFile = serde_json::from_str(raw)?;
    Ok(file.courses)
}
