//! Data models for `StudyFlow`

pub mod assignment;
pub mod course;

pub use assignment::{Assignment, Priority};
pub use course::{Course, GradeCategory};
