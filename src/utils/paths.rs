//! Path manipulation helpers for user-supplied locations.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Expands a leading tilde in a path to the home directory.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    if let Some(path_str) = path.to_str() {
        if path_str.starts_with("~/") || path_str == "~" {
            let home = dirs::home_dir().context("Could not find home directory")?;
            if path_str == "~" {
                Ok(home)
            } else {
                Ok(home.join(&path_str[2..]))
            }
        } else {
            Ok(path.to_path_buf())
        }
    } else {
        Ok(path.to_path_buf())
    }
}

/// Makes a path absolute, resolving relative paths from the current directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined
pub fn make_absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let current_dir = std::env::current_dir()?;
        Ok(current_dir.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_passthrough() {
        let path = Path::new("/var/db/update.xml");
        assert_eq!(expand_tilde(path).unwrap(), path);
    }

    #[test]
    fn test_expand_tilde_home() {
        let expanded = expand_tilde(Path::new("~/db")).unwrap();
        assert!(expanded.is_absolute());
        assert!(expanded.ends_with("db"));
    }

    #[test]
    fn test_make_absolute_keeps_absolute_paths() {
        let path = Path::new("/srv/db");
        assert_eq!(make_absolute(path).unwrap(), path);
    }

    #[test]
    fn test_make_absolute_resolves_relative_paths() {
        let abs = make_absolute(Path::new("db/update.xml")).unwrap();
        assert!(abs.is_absolute());
        assert!(abs.ends_with("db/update.xml"));
    }
}
