//! Breakdown command handler
//!
//! Prints one course's category breakdown: per-category averages and
//! weights, plus the weight-normalized current grade.

use std::path::Path;
use studyflow::config::Config;
use studyflow::core::grades;
use studyflow::core::store::Repository;
use studyflow::{error, info};

/// Run the breakdown command
pub fn run(course_id: u32, data: Option<&Path>, config: &Config) {
    if let Err(err) = print_breakdown(course_id, data, config) {
        error!("Breakdown command failed: {err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn print_breakdown(course_id: u32, data: Option<&Path>, config: &Config) -> Result<(), String> {
    let store = super::open_store(data, config)?;
    let courses = store
        .list_courses()
        .map_err(|e| format!("✗ Failed to list courses: {e}"))?;
    let assignments = store
        .list_assignments()
        .map_err(|e| format!("✗ Failed to list assignments: {e}"))?;

    let course = courses
        .iter()
        .find(|c| c.id == course_id)
        .ok_or_else(|| format!("✗ No course with id {course_id}"))?;

    let breakdown = grades::category_breakdown(course, &assignments);
    let current = grades::current_grade(&breakdown);
    let (letter, points) = grades::letter_and_points(current);

    info!("Breakdown computed for course {} ({})", course.id, course.code);

    println!("\n=== {} - {} ===\n", course.code, course.name);
    println!(
        "{:<20} {:>7} {:>9} {:>7}",
        "Category", "Weight", "Average", "Graded"
    );
    for score in &breakdown {
        let average = score
            .average
            .map_or_else(|| "N/A".to_string(), |avg| format!("{avg:.1}%"));
        println!(
            "{:<20} {:>6.0}% {:>9} {:>7}",
            score.name, score.weight, average, score.graded_count
        );
    }

    println!();
    println!("Current grade: {current:.1}% ({letter}, {points:.1} points)");
    println!("Target grade:  {:.1}%", course.target_grade);

    Ok(())
}
