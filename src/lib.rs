//! Shared library for `StudyFlow`
//! Contains the grade-aggregation core, data store, and reporting used by the CLI.

pub mod core;
pub mod logger;

pub use crate::core::config;

/// Returns the current version of the `StudyFlow` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
