//! Report generation module for grade standing
//!
//! This module provides functionality to generate grade reports in various
//! formats (Markdown, HTML) covering overall GPA, per-course standing, and
//! category breakdowns.

pub mod formats;

use crate::core::grades::{self, CategoryScore, GpaSummary, SemesterFilter};
use crate::core::models::{Assignment, Course};
use chrono::{DateTime, Utc};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Data context for report generation
///
/// Aggregates all data needed to render a grade report, providing a single
/// source of truth for templates.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Full course list
    pub courses: &'a [Course],
    /// Full assignment list
    pub assignments: &'a [Assignment],
    /// Semester filter the summary was computed under
    pub filter: &'a SemesterFilter,
    /// Credit-weighted GPA summary
    pub summary: &'a GpaSummary,
    /// Timestamp stamped into the report header
    pub generated_at: DateTime<Utc>,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(
        courses: &'a [Course],
        assignments: &'a [Assignment],
        filter: &'a SemesterFilter,
        summary: &'a GpaSummary,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            courses,
            assignments,
            filter,
            summary,
            generated_at,
        }
    }

    /// Human-readable label for the semester scope
    #[must_use]
    pub fn semester_label(&self) -> &str {
        match self.filter {
            SemesterFilter::All => "All semesters",
            SemesterFilter::Term(label) => label,
        }
    }

    /// Number of courses in scope for the summary
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.summary.courses.len()
    }

    /// Number of graded assignments across all courses
    #[must_use]
    pub fn graded_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.is_graded()).count()
    }

    /// Look up the full course record behind a standing entry
    #[must_use]
    pub fn course(&self, course_id: u32) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == course_id)
    }

    /// Category breakdown for one course in the summary
    #[must_use]
    pub fn breakdown(&self, course_id: u32) -> Vec<CategoryScore> {
        self.course(course_id)
            .map(|course| grades::category_breakdown(course, self.assignments))
            .unwrap_or_default()
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}
