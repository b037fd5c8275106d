//! Loading collaborators for the resolver.
//!
//! The resolver itself never touches XML or file I/O: it goes through the
//! [`ChangelogSource`] trait, so the document schema lives entirely here
//! and tests can substitute an in-memory source. [`FsSource`] is the
//! production implementation.

use crate::changelog::{Changelog, Include};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Categorized loading failures, each carrying the failing path.
///
/// A `LoadError` aborts the whole resolution: it propagates through every
/// enclosing recursive call and no partial tree is returned.
#[derive(Debug)]
pub enum LoadError {
    /// The file at `path` could not be opened or read.
    Read {
        /// Path of the file that failed to read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The changelog document at `path` could not be deserialized.
    Parse {
        /// Path of the changelog that failed to parse.
        path: PathBuf,
        /// Underlying deserialization failure.
        source: quick_xml::DeError,
    },

    /// Include nesting exceeded the resolver's depth guard, which on
    /// well-formed (acyclic) input never happens.
    TooDeep {
        /// Changelog at which the guard tripped.
        path: PathBuf,
        /// Nesting depth reached.
        depth: usize,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse changelog {}: {}", path.display(), source)
            }
            Self::TooDeep { path, depth } => {
                write!(
                    f,
                    "include nesting exceeds {} levels at {}; does the changelog include itself?",
                    depth,
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::TooDeep { .. } => None,
        }
    }
}

/// Capability the resolver needs from the outside world.
pub trait ChangelogSource {
    /// Loads and deserializes the changelog document at `path`. The
    /// returned changelog carries `path` and its raw, unresolved includes.
    fn load_changelog(&self, path: &Path) -> Result<Changelog, LoadError>;

    /// Reads the script file at `path` as a sequence of lines.
    fn read_script_lines(&self, path: &Path) -> Result<Vec<String>, LoadError>;
}

/// On-disk changelog document. Only the include list matters; namespace
/// declarations and other attributes are ignored.
#[derive(Debug, Deserialize)]
struct ChangelogDoc {
    #[serde(rename = "include", default)]
    includes: Vec<IncludeDoc>,
}

/// One `<include file="..."/>` element.
#[derive(Debug, Deserialize)]
struct IncludeDoc {
    #[serde(rename = "@file")]
    file: String,
}

/// Production source reading changelogs and scripts from the filesystem.
///
/// Each read opens, consumes, and closes its file before returning; no
/// handle stays open across recursive resolution calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl ChangelogSource for FsSource {
    fn load_changelog(&self, path: &Path) -> Result<Changelog, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let doc: ChangelogDoc =
            quick_xml::de::from_str(&content).map_err(|source| LoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Changelog {
            path: path.to_path_buf(),
            includes: doc
                .includes
                .into_iter()
                .map(|include| Include::new(include.file))
                .collect(),
        })
    }

    fn read_script_lines(&self, path: &Path) -> Result<Vec<String>, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        BufReader::new(file)
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| LoadError::Read {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_changelog_keeps_document_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("update.xml");
        fs::write(
            &path,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<databaseChangeLog xmlns="http://www.liquibase.org/xml/ns/dbchangelog"
                   xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <include file="v1.sql"/>
    <include file="master.xml"/>
    <include file="README.txt"/>
</databaseChangeLog>
"#,
        )
        .unwrap();

        let log = FsSource.load_changelog(&path).unwrap();
        assert_eq!(log.path, path);
        let files: Vec<_> = log.includes.iter().map(|i| i.file.as_str()).collect();
        assert_eq!(files, ["v1.sql", "master.xml", "README.txt"]);
    }

    #[test]
    fn test_load_changelog_without_includes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.xml");
        fs::write(&path, "<databaseChangeLog/>").unwrap();

        let log = FsSource.load_changelog(&path).unwrap();
        assert!(log.includes.is_empty());
    }

    #[test]
    fn test_load_changelog_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.xml");

        let err = FsSource.load_changelog(&path).unwrap_err();
        match err {
            LoadError::Read { path: failing, .. } => assert_eq!(failing, path),
            other => panic!("expected Read error, got {other}"),
        }
    }

    #[test]
    fn test_load_changelog_rejects_malformed_xml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.xml");
        fs::write(&path, "<databaseChangeLog><include file=").unwrap();

        let err = FsSource.load_changelog(&path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_read_script_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("v1.sql");
        fs::write(&path, "foo\nbar\n").unwrap();

        let lines = FsSource.read_script_lines(&path).unwrap();
        assert_eq!(lines, ["foo", "bar"]);
    }
}
