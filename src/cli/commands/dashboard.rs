//! Dashboard command handler
//!
//! Prints the summary statistics the dashboard view is built from: due-soon
//! and overdue assignments, completion rate, and per-course averages.

use chrono::Utc;
use std::path::Path;
use studyflow::config::Config;
use studyflow::core::dashboard;
use studyflow::core::models::Assignment;
use studyflow::core::store::Repository;
use studyflow::{error, info};

/// Run the dashboard command
pub fn run(data: Option<&Path>, config: &Config) {
    if let Err(err) = print_dashboard(data, config) {
        error!("Dashboard command failed: {err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn print_dashboard(data: Option<&Path>, config: &Config) -> Result<(), String> {
    let store = super::open_store(data, config)?;
    let courses = store
        .list_courses()
        .map_err(|e| format!("✗ Failed to list courses: {e}"))?;
    let assignments = store
        .list_assignments()
        .map_err(|e| format!("✗ Failed to list assignments: {e}"))?;

    let stats = dashboard::compute_stats(&courses, &assignments, Utc::now());

    info!(
        "Dashboard computed: {} upcoming, {} overdue",
        stats.upcoming.len(),
        stats.overdue.len()
    );

    println!("\n=== Dashboard ===\n");
    println!("Active courses:  {}", stats.active_courses);
    println!("Completion rate: {}%", stats.completion_rate);

    println!("\nDue in the next 7 days:");
    if stats.upcoming.is_empty() {
        println!("  (nothing due)");
    }
    for id in &stats.upcoming {
        if let Some(a) = find_assignment(&assignments, *id) {
            println!("  {} (due {})", a.title, a.due_date.format("%Y-%m-%d"));
        }
    }

    println!("\nOverdue:");
    if stats.overdue.is_empty() {
        println!("  (none)");
    }
    for id in &stats.overdue {
        if let Some(a) = find_assignment(&assignments, *id) {
            println!("  {} (was due {})", a.title, a.due_date.format("%Y-%m-%d"));
        }
    }

    println!("\nCourse averages:");
    if stats.course_averages.is_empty() {
        println!("  (no graded work yet)");
    }
    for avg in &stats.course_averages {
        println!("  {:<10} {}%", avg.code, avg.average);
    }

    Ok(())
}

fn find_assignment(assignments: &[Assignment], id: u32) -> Option<&Assignment> {
    assignments.iter().find(|a| a.id == id)
}
