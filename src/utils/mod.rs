//! Utility functions and helpers.
//!
//! # Submodules
//!
//! - [`paths`]: Path manipulation (tilde expansion, absolutization)

/// Path manipulation helpers.
pub mod paths;
