//! GPA command handler
//!
//! Prints the credit-weighted GPA summary and per-course standings,
//! optionally scoped to one semester.

use std::path::Path;
use studyflow::config::Config;
use studyflow::core::grades::{self, SemesterFilter};
use studyflow::core::store::Repository;
use studyflow::{error, info};

/// Run the gpa command
pub fn run(semester: Option<&str>, data: Option<&Path>, config: &Config) {
    if let Err(err) = print_gpa(semester, data, config) {
        error!("GPA command failed: {err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn print_gpa(semester: Option<&str>, data: Option<&Path>, config: &Config) -> Result<(), String> {
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

    info!(
        "GPA computed over {} courses ({} in scope)",
        courses.len(),
        summary.courses.len()
    );

    match &filter {
        SemesterFilter::All => println!("\n=== GPA Summary (all semesters) ==="),
        SemesterFilter::Term(label) => println!("\n=== GPA Summary ({label}) ==="),
    }

    if summary.courses.is_empty() {
        println!("\nNo graded courses in scope.");
        return Ok(());
    }

    println!();
    println!(
        "{:<10} {:<40} {:>7} {:>8} {:>7} {:>7}",
        "Course", "Name", "Credits", "Grade", "Letter", "Points"
    );
    for standing in &summary.courses {
        println!(
            "{:<10} {:<40} {:>7} {:>7.1}% {:>7} {:>7.1}",
            standing.code,
            standing.name,
            standing.credit_hours,
            standing.final_grade,
            standing.letter,
            standing.points
        );
    }

    println!();
    println!("GPA: {:.2} ({} credit hours)", summary.gpa, summary.total_credits);

    Ok(())
}
