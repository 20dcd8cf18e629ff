//! HTML report generator
//!
//! Generates grade reports in HTML format. The generated HTML is
//! self-contained with embedded CSS.

use crate::core::grades;
use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded HTML report template
const HTML_TEMPLATE: &str = include_str!("../templates/report.html");

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = HTML_TEMPLATE.to_string();

        // Substitute header metadata
        output = output.replace("{{semester}}", &escape(ctx.semester_label()));
        output = output.replace(
            "{{generated_at}}",
            &ctx.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        );

        // Substitute summary figures
        output = output.replace("{{gpa}}", &format!("{:.2}", ctx.summary.gpa));
        output = output.replace("{{total_credits}}", &ctx.summary.total_credits.to_string());
        output = output.replace("{{course_count}}", &ctx.course_count().to_string());
        output = output.replace("{{graded_count}}", &ctx.graded_count().to_string());

        // Generate per-course standing rows
        let standings_rows = Self::generate_standings_rows(ctx);
        output = output.replace("{{standings_rows}}", &standings_rows);

        // Generate category breakdown sections
        let course_sections = Self::generate_course_sections(ctx);
        output = output.replace("{{course_sections}}", &course_sections);

        output
    }

    /// Generate the per-course standing table rows
    fn generate_standings_rows(ctx: &ReportContext) -> String {
        let mut html = String::new();

        for standing in &ctx.summary.courses {
            // Color by standing relative to common grade bands
            let grade_class = match standing.points {
                p if p >= 3.7 => "grade-high",
                p if p >= 2.7 => "grade-mid",
                _ => "grade-low",
            };

            let _ = writeln!(
                html,
                "<tr class=\"{grade_class}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.1}%</td><td>{}</td><td>{:.1}</td></tr>",
                escape(&standing.code),
                escape(&standing.name),
                escape(standing.semester.as_deref().unwrap_or("-")),
                standing.credit_hours,
                standing.final_grade,
                standing.letter,
                standing.points
            );
        }

        if ctx.summary.courses.is_empty() {
            html.push_str("<tr><td colspan=\"7\">No graded courses</td></tr>\n");
        }

        html
    }

    /// Generate one category-breakdown section per course in the summary
    fn generate_course_sections(ctx: &ReportContext) -> String {
        let mut html = String::new();

        for standing in &ctx.summary.courses {
            let _ = writeln!(html, "<div class=\"course-section\">");
            let _ = writeln!(
                html,
                "  <h3>{} - {}</h3>",
                escape(&standing.code),
                escape(&standing.name)
            );

            let breakdown = ctx.breakdown(standing.course_id);
            let current = grades::current_grade(&breakdown);
            let _ = writeln!(
                html,
                "  <p>Current grade: <strong>{current:.1}%</strong> ({})</p>",
                standing.letter
            );

            html.push_str("  <table>\n");
            html.push_str(
                "    <tr><th>Category</th><th>Weight</th><th>Average</th><th>Graded</th><th>Weighted</th></tr>\n",
            );

            for score in &breakdown {
                let average = score
                    .average
                    .map_or_else(|| "N/A".to_string(), |avg| format!("{avg:.1}%"));
                let _ = writeln!(
                    html,
                    "    <tr><td>{}</td><td>{:.0}%</td><td>{average}</td><td>{}</td><td>{:.1}</td></tr>",
                    escape(&score.name),
                    score.weight,
                    score.graded_count,
                    score.weighted_score
                );
            }

            html.push_str("  </table>\n");
            html.push_str("</div>\n");
        }

        html
    }
}

/// Minimal HTML escaping for user-provided strings
fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
