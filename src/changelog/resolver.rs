//! Recursive changelog tree resolution.
//!
//! Resolution walks the include graph depth-first in strict document
//! order: nested changelogs recurse, scripts are scanned for changeset
//! markers, anything else stays an unresolved leaf. Each include resolves
//! relative to the directory of the changelog that declares it, so nested
//! changelogs in other directories keep their own reference frame.

use crate::changelog::changeset;
use crate::changelog::source::{ChangelogSource, FsSource, LoadError};
use crate::changelog::{Changelog, IncludeKind};
use std::path::Path;
use tracing::debug;

/// Maximum include nesting the resolver follows. Real changelog trees are
/// a handful of levels deep; hitting this limit means the input almost
/// certainly includes itself.
pub const MAX_DEPTH: usize = 64;

/// Resolves changelog trees through a [`ChangelogSource`].
#[derive(Debug)]
pub struct Resolver<S = FsSource> {
    /// Loading collaborator for changelog documents and script files.
    source: S,
}

impl Resolver<FsSource> {
    /// Creates a resolver backed by the filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self { source: FsSource }
    }
}

impl Default for Resolver<FsSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ChangelogSource> Resolver<S> {
    /// Creates a resolver over a custom source.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Resolves the changelog tree rooted at `path`.
    ///
    /// The first loading failure anywhere in the tree aborts the whole
    /// resolution; no partial tree is returned. Resolution is idempotent
    /// on an unchanging filesystem.
    ///
    /// # Errors
    /// Returns a [`LoadError`] when a changelog or script file cannot be
    /// read or deserialized, or when nesting exceeds [`MAX_DEPTH`].
    pub fn resolve(&self, path: &Path) -> Result<Changelog, LoadError> {
        self.resolve_at(path, 0)
    }

    fn resolve_at(&self, path: &Path, depth: usize) -> Result<Changelog, LoadError> {
        if depth >= MAX_DEPTH {
            return Err(LoadError::TooDeep {
                path: path.to_path_buf(),
                depth,
            });
        }

        let mut log = self.source.load_changelog(path)?;

        // Includes resolve against the changelog that declares them, not
        // against the root's directory.
        let dir = path.parent().unwrap_or_else(|| Path::new(""));

        for include in &mut log.includes {
            include.path = dir.join(&include.file);
            include.kind = IncludeKind::classify(&include.file);

            match include.kind {
                IncludeKind::Changelog => {
                    let nested = self.resolve_at(&include.path, depth + 1)?;
                    include.nested = Some(Box::new(nested));
                }
                IncludeKind::Script => {
                    let lines = self.source.read_script_lines(&include.path)?;
                    include.changesets = changeset::scan(&lines);
                }
                IncludeKind::Unresolved => {
                    debug!(file = %include.file, "include matches no known suffix, leaving unresolved");
                }
            }
        }

        Ok(log)
    }
}
