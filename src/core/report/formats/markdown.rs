//! Markdown report generator
//!
//! Generates grade reports in Markdown format. These reports render well in
//! GitHub, GitLab, and VS Code.

use crate::core::grades;
use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();

        // Substitute header metadata
        output = output.replace("{{semester}}", ctx.semester_label());
        output = output.replace(
            "{{generated_at}}",
            &ctx.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        );

        // Substitute summary figures
        output = output.replace("{{gpa}}", &format!("{:.2}", ctx.summary.gpa));
        output = output.replace("{{total_credits}}", &ctx.summary.total_credits.to_string());
        output = output.replace("{{course_count}}", &ctx.course_count().to_string());
        output = output.replace("{{graded_count}}", &ctx.graded_count().to_string());

        // Generate per-course standing table
        let standings_table = Self::generate_standings_table(ctx);
        output = output.replace("{{standings_table}}", &standings_table);

        // Generate category breakdown sections
        let course_sections = Self::generate_course_sections(ctx);
        output = output.replace("{{course_sections}}", &course_sections);

        output
    }

    /// Generate the per-course standing table
    fn generate_standings_table(ctx: &ReportContext) -> String {
        let mut table = String::new();

        table.push_str("| Course | Name | Semester | Credits | Grade | Letter | Points |\n");
        table.push_str("|---|---|---|---|---|---|---|\n");

        for standing in &ctx.summary.courses {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {:.1}% | {} | {:.1} |",
                standing.code,
                standing.name,
                standing.semester.as_deref().unwrap_or("-"),
                standing.credit_hours,
                standing.final_grade,
                standing.letter,
                standing.points
            );
        }

        if ctx.summary.courses.is_empty() {
            table.push_str("| - | No graded courses | - | - | - | - | - |\n");
        }

        table
    }

    /// Generate one category-breakdown section per course in the summary
    fn generate_course_sections(ctx: &ReportContext) -> String {
        let mut sections = String::new();

        for standing in &ctx.summary.courses {
            let _ = writeln!(sections, "### {} - {}\n", standing.code, standing.name);

            let breakdown = ctx.breakdown(standing.course_id);
            let current = grades::current_grade(&breakdown);
            let _ = writeln!(
                sections,
                "Current grade: **{:.1}%** ({})\n",
                current, standing.letter
            );

            sections.push_str("| Category | Weight | Average | Graded | Weighted |\n");
            sections.push_str("|---|---|---|---|---|\n");

            for score in &breakdown {
                let average = score
                    .average
                    .map_or_else(|| "N/A".to_string(), |avg| format!("{avg:.1}%"));
                let _ = writeln!(
                    sections,
                    "| {} | {:.0}% | {} | {} | {:.1} |",
                    score.name, score.weight, average, score.graded_count, score.weighted_score
                );
            }

            sections.push('\n');
        }

        sections
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
