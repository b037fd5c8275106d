use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Changelog tree fixture for consistent test setup.
///
/// Builds changelog XML documents and SQL scripts inside a temporary
/// directory so tests exercise the real filesystem source.
pub struct ChangelogFixture {
    pub temp_dir: TempDir,
}

#[allow(dead_code)] // Not every integration suite uses every helper
impl ChangelogFixture {
    /// Create a new empty fixture directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Get the fixture directory path.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a changelog document declaring the given includes, in order.
    pub fn write_changelog(&self, rel: &str, includes: &[&str]) -> PathBuf {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <databaseChangeLog xmlns=\"http://www.liquibase.org/xml/ns/dbchangelog\"\n\
             \x20                  xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\n",
        );
        for file in includes {
            xml.push_str(&format!("    <include file=\"{file}\"/>\n"));
        }
        xml.push_str("</databaseChangeLog>\n");
        self.write_file(rel, &xml)
    }

    /// Write an arbitrary file, creating parent directories as needed.
    pub fn write_file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    /// Path of a config file inside the fixture that does not exist, so
    /// commands run with default configuration.
    pub fn default_config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config/changetree")
    }
}

impl Default for ChangelogFixture {
    fn default() -> Self {
        Self::new()
    }
}
