//! Dashboard statistics
//!
//! Summary numbers for the "what's happening with your studies" view:
//! due-soon and overdue assignment counts, completion rate, and simple
//! per-course grade averages. Pure functions of the collections and a
//! caller-supplied clock instant.

use crate::core::models::{Assignment, Course};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Width of the "upcoming" window in days
const UPCOMING_WINDOW_DAYS: i64 = 7;

/// A course paired with the plain average of its graded assignments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseAverage {
    /// Course id
    pub course_id: u32,
    /// Course code
    pub code: String,
    /// Mean grade of completed, graded assignments, rounded to the
    /// nearest whole percent
    pub average: i64,
}

/// Aggregated dashboard statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    /// Ids of incomplete assignments due within the next seven days,
    /// soonest first
    pub upcoming: Vec<u32>,
    /// Ids of incomplete assignments already past their due date
    pub overdue: Vec<u32>,
    /// Completed assignments as a whole percentage of all assignments
    /// (0 when there are none)
    pub completion_rate: i64,
    /// Number of courses
    pub active_courses: usize,
    /// Per-course simple averages; courses with no graded work are omitted
    pub course_averages: Vec<CourseAverage>,
}

/// Compute dashboard statistics as of `now`.
///
/// The upcoming window is `(now, now + 7 days)` exclusive on both ends,
/// matching the due-soon card; anything incomplete and already due counts
/// as overdue.
#[must_use]
pub fn compute_stats(
    courses: &[Course],
    assignments: &[Assignment],
    now: DateTime<Utc>,
) -> DashboardStats {
    let week_from_now = now + Duration::days(UPCOMING_WINDOW_DAYS);

    let mut upcoming: Vec<&Assignment> = assignments
        .iter()
        .filter(|a| !a.completed && a.due_date > now && a.due_date < week_from_now)
        .collect();
    upcoming.sort_by_key(|a| a.due_date);

    let overdue: Vec<u32> = assignments
        .iter()
        .filter(|a| !a.completed && a.due_date < now)
        .map(|a| a.id)
        .collect();

    let completed = assignments.iter().filter(|a| a.completed).count();
    let completion_rate = if assignments.is_empty() {
        0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let rate = completed as f64 / assignments.len() as f64 * 100.0;
        #[allow(clippy::cast_possible_truncation)]
        {
            rate.round() as i64
        }
    };

    let course_averages = courses
        .iter()
        .filter_map(|course| {
            let grades: Vec<f64> = assignments
                .iter()
                .filter(|a| a.course_id == course.id && a.is_graded())
                .filter_map(|a| a.grade)
                .collect();

            if grades.is_empty() {
                return None;
            }

            #[allow(clippy::cast_precision_loss)]
            let mean = grades.iter().sum::<f64>() / grades.len() as f64;
            #[allow(clippy::cast_possible_truncation)]
            Some(CourseAverage {
                course_id: course.id,
                code: course.code.clone(),
                average: mean.round() as i64,
            })
        })
        .collect();

    DashboardStats {
        upcoming: upcoming.into_iter().map(|a| a.id).collect(),
        overdue,
        completion_rate,
        active_courses: courses.len(),
        course_averages,
    }
}
