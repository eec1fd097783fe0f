// src/config/mod.rs
// Environment-backed settings; CLI flags take precedence over these

use std::path::PathBuf;

pub const CATALOG_ENV: &str = "REGISTRAR_CATALOG";
pub const STUDENTS_ENV: &str = "REGISTRAR_STUDENTS";

#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Course catalog file (JSON). Built-in seed catalog when unset.
    pub catalog_path: Option<PathBuf>,
    /// Student seed records file (JSON). Built-in sample when unset.
    pub students_path: Option<PathBuf>,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            catalog_path: std::env::var_os(CATALOG_ENV).map(PathBuf::from),
            students_path: std::env::var_os(STUDENTS_ENV).map(PathBuf::from),
        }
    }

    /// Non-fatal configuration problems. The caller decides how loudly
    /// to report them.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for (label, path) in
            [("catalog", &self.catalog_path), ("students", &self.students_path)]
        {
            if let Some(p) = path
                && !p.exists()
            {
                warnings.push(format!(
                    "{label} file {} does not exist; using built-in seed data",
                    p.display()
                ));
            }
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_paths_warn_but_do_not_fail() {
        let settings = Settings {
            catalog_path: Some(PathBuf::from("/nonexistent/catalog.json")),
            students_path: None,
        };
        let warnings = settings.validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("catalog"));
    }

    #[test]
    fn existing_paths_produce_no_warnings() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let settings = Settings {
            catalog_path: Some(file.path().to_path_buf()),
            students_path: None,
        };
        assert!(settings.validate().is_empty());
    }
}
