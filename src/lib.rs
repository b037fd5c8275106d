#![warn(missing_docs)]
// Allow pedantic strict lints that create false positives in this codebase
#![allow(clippy::indexing_slicing)] // Regex capture groups are bounds-checked by the pattern

//! # Changetree - Liquibase Changelog Tree Inspector
//!
//! Changetree resolves a tree of Liquibase-style changelog manifests: it
//! loads a root changelog XML, follows nested `<include>` references into
//! child changelogs and raw SQL scripts, extracts `--changeset` markers
//! from the scripts, and renders the resolved tree.
//!
//! ## Architecture
//!
//! The codebase is organized into several key modules:
//!
//! - [`changelog`]: Core data model, changeset extraction, and the
//!   recursive resolver
//! - [`commands`]: Command implementations (tree, changesets, config)
//! - [`config`]: Configuration parsing and validation
//! - [`output`]: Output formatting, verbosity control, and tree rendering
//! - [`utils`]: Path helpers
//!
//! ## Example Usage
//!
//! ```no_run
//! use changetree::changelog::resolver::Resolver;
//! use changetree::output::tree;
//!
//! # fn main() -> anyhow::Result<()> {
//! let log = Resolver::new().resolve("db/update.xml".as_ref())?;
//! for line in tree::render(&log, tree::INDENT_STEP) {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```

/// Core changelog model, changeset extraction, and recursive resolution.
pub mod changelog;

/// Commands module containing all CLI command implementations.
pub mod commands;

/// Configuration parsing, validation, and management.
pub mod config;

/// Output formatting, verbosity control, and tree rendering.
pub mod output;

/// Utility functions and helpers.
pub mod utils;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Current version of the changetree binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file path relative to the home directory.
pub const DEFAULT_CONFIG_PATH: &str = ".config/changetree/config";

/// Central context for all changetree operations.
///
/// Holds the configuration file location and the loaded configuration.
/// Commands receive a reference to this context instead of reading
/// configuration themselves.
#[derive(Debug, Clone)]
pub struct ChangetreeContext {
    /// Path to the configuration file.
    pub config_path: PathBuf,

    /// Loaded configuration settings.
    pub config: config::Config,
}

impl ChangetreeContext {
    /// Creates a new `ChangetreeContext` by loading the configuration from
    /// the default path.
    ///
    /// The configuration file location can be overridden with the
    /// `CHANGETREE_CONFIG_PATH` environment variable.
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined or if
    /// the configuration file cannot be read or parsed.
    pub fn new() -> Result<Self> {
        let config_path = if let Ok(path) = std::env::var("CHANGETREE_CONFIG_PATH") {
            PathBuf::from(path)
        } else {
            let home = dirs::home_dir().context("Could not find home directory")?;
            home.join(DEFAULT_CONFIG_PATH)
        };

        let config = config::Config::load(&config_path)?;

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Creates a new `ChangetreeContext` with an explicit configuration
    /// path. This avoids the need for environment variable manipulation
    /// in tests.
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be loaded.
    pub fn new_with_explicit_path(config_path: PathBuf) -> Result<Self> {
        let config = config::Config::load(&config_path)?;
        Ok(Self {
            config_path,
            config,
        })
    }

    /// Determines the root changelog to resolve.
    ///
    /// An explicit path (from the command line) wins; otherwise the
    /// configured `base_dir` joined with `root_changelog` is used. The
    /// result is tilde-expanded and made absolute.
    ///
    /// # Errors
    /// Returns an error if the home or current directory cannot be
    /// determined while normalizing the path.
    pub fn root_changelog_path(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        let raw = match explicit {
            Some(path) => path.to_path_buf(),
            None => self
                .config
                .core
                .base_dir
                .join(&self.config.core.root_changelog),
        };

        let expanded = utils::paths::expand_tilde(&raw)?;
        utils::paths::make_absolute(&expanded)
    }
}
