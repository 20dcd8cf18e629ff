//! CLI command handlers for `StudyFlow`.
//!
//! This module provides handlers for various CLI subcommands.
//! Each command is implemented in its own submodule.

pub mod breakdown;
pub mod config;
pub mod dashboard;
pub mod gpa;
pub mod report;

use std::path::{Path, PathBuf};
use studyflow::config::Config;
use studyflow::core::store::JsonStore;
use studyflow::debug;

/// Open the data store, preferring an explicit `--data` path over the
/// configured one.
///
/// # Errors
/// Returns a printable error when the data file cannot be read or parsed.
pub fn open_store(data: Option<&Path>, config: &Config) -> Result<JsonStore, String> {
    let path: PathBuf = data.map_or_else(
        || PathBuf::from(&config.paths.data_file),
        Path::to_path_buf,
    );

    debug!("Opening data store at: {}", path.display());
    JsonStore::open(&path).map_err(|e| format!("✗ Failed to open {}: {e}", path.display()))
}
