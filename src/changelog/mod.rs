//! Changelog data model and resolution.
//!
//! A [`Changelog`] is one loaded changelog document: its path on disk plus
//! its ordered [`Include`] references. Resolution (see [`resolver`]) fills
//! in each include's derived fields: the resolved path, its
//! [`IncludeKind`], and either a nested changelog or the [`Changeset`]
//! records extracted from a SQL script. The result is a strict ownership
//! tree; nothing outside the tree holds references into it.

/// Changeset marker parsing and script scanning.
pub mod changeset;

/// Recursive changelog tree resolution.
pub mod resolver;

/// Filesystem collaborators: XML deserialization and script line reading.
pub mod source;

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Filename suffix identifying a nested changelog reference.
pub const CHANGELOG_SUFFIX: &str = "master.xml";

/// Filename suffix identifying a SQL script reference.
pub const SCRIPT_SUFFIX: &str = ".sql";

/// One changelog document with its ordered include references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Changelog {
    /// Path the document was loaded from.
    pub path: PathBuf,

    /// References in document order.
    pub includes: Vec<Include>,
}

impl Changelog {
    /// Returns every script include in the tree, depth-first in document
    /// order.
    #[must_use]
    pub fn script_includes(&self) -> Vec<&Include> {
        let mut out = Vec::new();
        self.collect_scripts(&mut out);
        out
    }

    fn collect_scripts<'a>(&'a self, out: &mut Vec<&'a Include>) {
        for include in &self.includes {
            match include.kind {
                IncludeKind::Script => out.push(include),
                IncludeKind::Changelog => {
                    if let Some(nested) = &include.nested {
                        nested.collect_scripts(out);
                    }
                }
                IncludeKind::Unresolved => {}
            }
        }
    }
}

/// One reference inside a changelog.
///
/// Created with only the raw reference string; the remaining fields are
/// filled in during resolution and never mutated afterward. The resolved
/// kind decides which payload is populated: a nested changelog, a changeset
/// list, or neither.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Include {
    /// Raw reference string as declared in the document.
    pub file: String,

    /// Resolved path, relative to the containing changelog's directory.
    /// Empty until resolution.
    pub path: PathBuf,

    /// How the reference was classified during resolution.
    pub kind: IncludeKind,

    /// Nested changelog, present iff `kind` is [`IncludeKind::Changelog`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<Box<Changelog>>,

    /// Changesets extracted from the referenced script, populated only
    /// when `kind` is [`IncludeKind::Script`].
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changesets: Vec<Changeset>,
}

impl Include {
    /// Creates an unresolved include for a raw reference string.
    #[must_use]
    pub fn new(file: String) -> Self {
        Self {
            file,
            path: PathBuf::new(),
            kind: IncludeKind::Unresolved,
            nested: None,
            changesets: Vec::new(),
        }
    }
}

/// Classification of an include reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IncludeKind {
    /// The reference names a nested changelog document.
    Changelog,

    /// The reference names a SQL script.
    Script,

    /// The reference matches no known suffix. Tolerated leaf state, not an
    /// error.
    #[default]
    Unresolved,
}

impl IncludeKind {
    /// Classifies a raw reference string by suffix, first match wins.
    /// Suffix comparison is case-sensitive.
    #[must_use]
    pub fn classify(file: &str) -> Self {
        if file.ends_with(CHANGELOG_SUFFIX) {
            Self::Changelog
        } else if file.ends_with(SCRIPT_SUFFIX) {
            Self::Script
        } else {
            Self::Unresolved
        }
    }
}

/// One changeset record extracted from a script marker line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Changeset {
    /// Changeset identifier.
    pub id: String,

    /// Declaring author.
    pub author: String,

    /// Free-form options trailing the marker.
    pub options: String,

    /// Optional content body. The scanner never populates this; it is
    /// carried so downstream consumers can attach script fragments later.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl fmt::Display for Changeset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id: [{}], author: [{}], options: [{}]",
            self.id, self.author, self.options
        )?;
        if let Some(content) = &self.content {
            write!(f, ", content: [{content}]")?;
        }
        Ok(())
    }
}
