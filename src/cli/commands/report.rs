//! Report command handler
//!
//! Generates grade reports in Markdown or HTML with the GPA summary,
//! per-course standings, and category breakdowns.

use chrono::Utc;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use studyflow::config::Config;
use studyflow::core::grades::{self, SemesterFilter};
use studyflow::core::report::{
    HtmlReporter, MarkdownReporter, ReportContext, ReportFormat, ReportGenerator,
};
use studyflow::core::store::Repository;
use studyflow::{error, info};

/// Run the report command.
///
/// # Arguments
/// * `data` - Optional data file override
/// * `output_file` - Optional output path
/// * `format_str` - Report format (markdown, html)
/// * `semester` - Optional semester label to scope the report to
/// * `config` - Configuration containing default output directory
pub fn run(
    data: Option<&Path>,
    output_file: Option<&Path>,
    format_str: &str,
    semester: Option<&str>,
    config: &Config,
) {
    if let Err(err) = generate_report(data, output_file, format_str, semester, config) {
        error!("Report generation failed: {err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn generate_report(
    data: Option<&Path>,
    output_file: Option<&Path>,
    format_str: &str,
    semester: Option<&str>,
    config: &Config,
) -> Result<(), String> {
    // Parse the format
    let format =
        ReportFormat::from_str(format_str).map_err(|e| format!("✗ {e}. Use: markdown or html"))?;

    let store = super::open_store(data, config)?;
    let courses = store
        .list_courses()
        .map_err(|e| format!("✗ Failed to list courses: {e}"))?;
    let assignments = store
        .list_assignments()
        .map_err(|e| format!("✗ Failed to list assignments: {e}"))?;

    let filter = semester.map_or(SemesterFilter::All, |label| {
        label.parse().unwrap_or(SemesterFilter::All)
    });
    let summary = grades::overall_gpa(&courses, &assignments, &filter);
    let ctx = ReportContext::new(&courses, &assignments, &filter, &summary, Utc::now());

    // Determine output path
    let final_output_path: PathBuf = if let Some(output) = output_file {
        output.to_path_buf()
    } else {
        let reports_dir = PathBuf::from(&config.paths.reports_dir);
        std::fs::create_dir_all(&reports_dir).map_err(|e| {
            format!(
                "✗ Failed to create reports directory {}: {e}",
                reports_dir.display()
            )
        })?;

        let scope = match &filter {
            SemesterFilter::All => "all".to_string(),
            SemesterFilter::Term(label) => label.to_lowercase().replace(' ', "_"),
        };
        reports_dir.join(format!("grades_{scope}.{}", format.extension()))
    };

    // Write the report
    match format {
        ReportFormat::Markdown => {
            let reporter = MarkdownReporter::new();
            reporter
                .generate(&ctx, &final_output_path)
                .map_err(|e| format!("✗ Failed to generate Markdown report: {e}"))?;
        }
        ReportFormat::Html => {
            let reporter = HtmlReporter::new();
            reporter
                .generate(&ctx, &final_output_path)
                .map_err(|e| format!("✗ Failed to generate HTML report: {e}"))?;
        }
    }

    println!("✓ Report generated: {}", final_output_path.display());
    info!("Report exported to: {}", final_output_path.display());

    print_summary(&ctx);

    Ok(())
}

/// Print a short summary after writing the report
fn print_summary(ctx: &ReportContext) {
    println!("\n=== Summary ===");
    println!("Semester: {}", ctx.semester_label());
    println!("Courses: {}", ctx.course_count());
    println!("Graded assignments: {}", ctx.graded_count());
    println!(
        "GPA: {:.2} ({} credit hours)",
        ctx.summary.gpa, ctx.summary.total_credits
    );
}
