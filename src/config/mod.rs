//! Configuration parsing, validation, and management.
//!
//! Configuration lives in a TOML file (default
//! `~/.config/changetree/config`) with two sections: `[core]` names the
//! default resolution root, `[output]` tunes the tree rendering. A missing
//! file means defaults; a malformed file is an error.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Resolution root settings.
    #[serde(default)]
    pub core: CoreConfig,

    /// Rendering settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Settings naming the default resolution root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Directory holding the root changelog.
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Filename of the root changelog inside `base_dir`.
    #[serde(default = "default_root_changelog")]
    pub root_changelog: String,
}

/// Settings for tree rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Spaces added per nesting level in tree renderings.
    #[serde(default = "default_indent_step")]
    pub indent_step: usize,
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_root_changelog() -> String {
    "update.xml".to_string()
}

fn default_indent_step() -> usize {
    5
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            root_changelog: default_root_changelog(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            indent_step: default_indent_step(),
        }
    }
}

impl Config {
    /// Loads the configuration from `path`, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read, parsed, or
    /// validated.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).with_context(|| "Failed to parse TOML config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.core.root_changelog.is_empty() {
            bail!("root_changelog cannot be empty");
        }
        if self.output.indent_step < 1 || self.output.indent_step > 16 {
            bail!("indent_step must be between 1 and 16");
        }
        Ok(())
    }

    /// Saves the configuration to `path`, creating parent directories.
    ///
    /// # Errors
    /// Returns an error if the directories cannot be created or the file
    /// cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory for {}", path.display())
            })?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Returns the value of a configuration key in dotted notation.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "core.base_dir" => Some(self.core.base_dir.display().to_string()),
            "core.root_changelog" => Some(self.core.root_changelog.clone()),
            "output.indent_step" => Some(self.output.indent_step.to_string()),
            _ => None,
        }
    }

    /// Sets a configuration key in dotted notation.
    ///
    /// # Errors
    /// Returns an error for unknown keys or values the section rejects.
    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "core.base_dir" => self.core.base_dir = PathBuf::from(value),
            "core.root_changelog" => self.core.root_changelog = value,
            "output.indent_step" => {
                self.output.indent_step = value
                    .parse()
                    .with_context(|| format!("Invalid indent step: {value}"))?;
            }
            _ => bail!("Unknown configuration key: {key}"),
        }
        self.validate()
    }

    /// Resets a configuration key to its default value.
    ///
    /// # Errors
    /// Returns an error for unknown keys.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "core.base_dir" => self.core.base_dir = default_base_dir(),
            "core.root_changelog" => self.core.root_changelog = default_root_changelog(),
            "output.indent_step" => self.output.indent_step = default_indent_step(),
            _ => bail!("Unknown configuration key: {key}"),
        }
        Ok(())
    }
}
