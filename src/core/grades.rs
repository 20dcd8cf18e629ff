//! Grade aggregation
//!
//! Pure computations over in-memory course and assignment collections:
//! per-category breakdowns, active-weight-normalized current grades,
//! letter-grade banding, and the credit-weighted GPA. Nothing here touches
//! storage and nothing here fails; missing or partial input degrades to
//! zero/empty results so the presentation layer always has a number to show.

use crate::core::models::{Assignment, Course};
use serde::Serialize;
use std::convert::Infallible;
use std::str::FromStr;

/// Grade banding table, evaluated top-down; first row whose minimum the
/// percentage meets wins. Anything below 60 is an F at 0.0 points.
const GRADE_BANDS: [(f64, &str, f64); 11] = [
    (93.0, "A", 4.0),
    (90.0, "A-", 3.7),
    (87.0, "B+", 3.3),
    (83.0, "B", 3.0),
    (80.0, "B-", 2.7),
    (77.0, "C+", 2.3),
    (73.0, "C", 2.0),
    (70.0, "C-", 1.7),
    (67.0, "D+", 1.3),
    (63.0, "D", 1.0),
    (60.0, "D-", 0.7),
];

/// Aggregated standing of one declared grade category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    /// Category name as declared on the course
    pub name: String,
    /// Declared weight (percentage of the course grade)
    pub weight: f64,
    /// Mean of matching graded assignments (0-100); `None` when no
    /// assignment in this category has been graded yet
    pub average: Option<f64>,
    /// Number of graded assignments matched to this category
    pub graded_count: usize,
    /// `average * weight / 100`; exactly 0 for an empty category
    pub weighted_score: f64,
}

impl CategoryScore {
    /// Whether any graded work has landed in this category.
    /// Only active categories count toward the current-grade denominator.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.graded_count > 0
    }
}

/// One course's line in the GPA summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseStanding {
    /// Course id
    pub course_id: u32,
    /// Course code
    pub code: String,
    /// Course name
    pub name: String,
    /// Semester label, if assigned
    pub semester: Option<String>,
    /// Credit hours counted toward the GPA
    pub credit_hours: u32,
    /// Current grade percentage rounded to one decimal
    pub final_grade: f64,
    /// Letter grade banded from `final_grade`
    pub letter: &'static str,
    /// Grade points banded from `final_grade`
    pub points: f64,
}

/// Credit-weighted GPA across a set of courses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpaSummary {
    /// GPA on a 4.0 scale, rounded to two decimals; 0 when no course has
    /// graded work
    pub gpa: f64,
    /// Total credit hours across included courses
    pub total_credits: u32,
    /// Included courses in input order. Courses without any graded
    /// assignment are absent entirely (they contribute neither credits
    /// nor points).
    pub courses: Vec<CourseStanding>,
}

/// Restricts GPA computation to one semester, or includes everything
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemesterFilter {
    /// Include every course regardless of semester
    All,
    /// Include only courses whose semester label matches exactly
    /// (case-sensitive)
    Term(String),
}

impl SemesterFilter {
    /// Whether a course passes this filter
    #[must_use]
    pub fn matches(&self, course: &Course) -> bool {
        match self {
            Self::All => true,
            Self::Term(label) => course.in_semester(label),
        }
    }
}

impl FromStr for SemesterFilter {
    type Err = Infallible;

    /// The literal `all` (any casing) means no restriction; anything else
    /// is treated as a semester label verbatim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Ok(Self::Term(s.to_string()))
        }
    }
}

/// Round to `decimals` places, half away from zero
fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals.try_into().unwrap_or(i32::MAX));
    (value * factor).round() / factor
}

/// Map a grade percentage to its letter grade and grade points.
///
/// Uses the fixed banding table: 93+ is an A (4.0), 90+ an A- (3.7), down
/// to D- at 60 (0.7); everything below 60 is an F (0.0).
#[must_use]
pub fn letter_and_points(percent: f64) -> (&'static str, f64) {
    for (min, letter, points) in GRADE_BANDS {
        if percent >= min {
            return (letter, points);
        }
    }
    ("F", 0.0)
}

/// Compute the per-category breakdown for one course.
///
/// Considers only assignments that belong to the course, are completed, and
/// carry a grade. Each graded assignment is matched to a declared category
/// by exact name; grades naming an undeclared category are ignored rather
/// than invented as new categories. The result has one entry per declared
/// category, in the course's declared order.
#[must_use]
pub fn category_breakdown(course: &Course, assignments: &[Assignment]) -> Vec<CategoryScore> {
    let graded: Vec<&Assignment> = assignments
        .iter()
        .filter(|a| a.course_id == course.id && a.is_graded())
        .collect();

    course
        .grade_categories
        .iter()
        .map(|category| {
            let grades: Vec<f64> = graded
                .iter()
                .filter(|a| a.category == category.name)
                .filter_map(|a| a.grade)
                .collect();

            if grades.is_empty() {
                CategoryScore {
                    name: category.name.clone(),
                    weight: category.weight,
                    average: None,
                    graded_count: 0,
                    weighted_score: 0.0,
                }
            } else {
                #[allow(clippy::cast_precision_loss)]
                let average = grades.iter().sum::<f64>() / grades.len() as f64;
                CategoryScore {
                    name: category.name.clone(),
                    weight: category.weight,
                    average: Some(average),
                    graded_count: grades.len(),
                    weighted_score: average * category.weight / 100.0,
                }
            }
        })
        .collect()
}

/// Compute the current grade percentage from a category breakdown.
///
/// The sum of weighted scores is normalized by the *active weight*, the
/// summed weight of categories with at least one graded assignment, so a
/// student is not penalized for categories with no graded work yet.
///
/// Returns 0.0 when no category is active (a course with no categories or
/// no graded work displays as 0%, not N/A; the GPA path in [`overall_gpa`]
/// instead skips such courses). Rounded to one decimal place.
#[must_use]
pub fn current_grade(breakdown: &[CategoryScore]) -> f64 {
    let weighted_sum: f64 = breakdown.iter().map(|c| c.weighted_score).sum();
    let active_weight: f64 = breakdown
        .iter()
        .filter(|c| c.is_active())
        .map(|c| c.weight)
        .sum();

    if active_weight > 0.0 {
        round_to(weighted_sum / active_weight * 100.0, 1)
    } else {
        0.0
    }
}

/// Compute the credit-weighted GPA across courses.
///
/// Courses failing the semester filter are excluded; so are courses with no
/// graded assignments at all: unlike [`current_grade`]'s 0% display
/// behavior, a course nobody has graded contributes neither credits nor
/// grade points here. Letter and points are banded on the one-decimal
/// rounded final grade.
///
/// `gpa = Σ(final_grade / 100 × 4.0 × credit_hours) / Σ credit_hours`,
/// rounded to two decimals, or 0 when no course qualifies.
#[must_use]
pub fn overall_gpa(
    courses: &[Course],
    assignments: &[Assignment],
    filter: &SemesterFilter,
) -> GpaSummary {
    let mut standings = Vec::new();

    for course in courses.iter().filter(|c| filter.matches(c)) {
        let breakdown = category_breakdown(course, assignments);
        let graded_total: usize = breakdown.iter().map(|c| c.graded_count).sum();
        if graded_total == 0 {
            continue;
        }

        let final_grade = current_grade(&breakdown);
        let (letter, points) = letter_and_points(final_grade);

        standings.push(CourseStanding {
            course_id: course.id,
            code: course.code.clone(),
            name: course.name.clone(),
            semester: course.semester.clone(),
            credit_hours: course.credit_hours,
            final_grade,
            letter,
            points,
        });
    }

    let total_credits: u32 = standings.iter().map(|s| s.credit_hours).sum();
    let weighted_points: f64 = standings
        .iter()
        .map(|s| s.final_grade / 100.0 * 4.0 * f64::from(s.credit_hours))
        .sum();

    let gpa = if total_credits > 0 {
        round_to(weighted_points / f64::from(total_credits), 2)
    } else {
        0.0
    };

    GpaSummary {
        gpa,
        total_credits,
        courses: standings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn course_with_categories(id: u32, categories: &[(&str, f64)]) -> Course {
        let mut course = Course::new(id, format!("CS {id}"), format!("Course {id}"));
        for (name, weight) in categories {
            course.add_category(name, *weight);
        }
        course
    }

    fn graded_assignment(id: u32, course_id: u32, category: &str, grade: f64) -> Assignment {
        let due = Utc.with_ymd_and_hms(2025, 11, 15, 23, 59, 0).unwrap();
        Assignment::new(id, course_id, format!("Assignment {id}"), due)
            .with_category(category)
            .graded(grade)
    }

    #[test]
    fn incomplete_or_ungraded_assignments_never_contribute() {
        let course = course_with_categories(1, &[("Homework", 100.0)]);
        let due = Utc.with_ymd_and_hms(2025, 11, 15, 23, 59, 0).unwrap();

        let incomplete = Assignment::new(1, 1, "HW1".to_string(), due).with_category("Homework");
        let mut completed_ungraded =
            Assignment::new(2, 1, "HW2".to_string(), due).with_category("Homework");
        completed_ungraded.completed = true;
        let graded = graded_assignment(3, 1, "Homework", 95.0);

        let breakdown =
            category_breakdown(&course, &[incomplete, completed_ungraded, graded]);

        assert_eq!(breakdown[0].graded_count, 1);
        assert_eq!(breakdown[0].average, Some(95.0));
    }

    #[test]
    fn empty_category_has_zero_contribution_and_no_average() {
        let course = course_with_categories(1, &[("Homework", 40.0), ("Exams", 60.0)]);
        let assignments = [graded_assignment(1, 1, "Homework", 80.0)];

        let breakdown = category_breakdown(&course, &assignments);

        let exams = &breakdown[1];
        assert_eq!(exams.name, "Exams");
        assert!(exams.average.is_none());
        assert_eq!(exams.graded_count, 0);
        assert!((exams.weighted_score - 0.0).abs() < f64::EPSILON);
        assert!(!exams.is_active());
    }

    #[test]
    fn undeclared_categories_are_not_invented() {
        let course = course_with_categories(1, &[("Homework", 100.0)]);
        let assignments = [
            graded_assignment(1, 1, "Homework", 90.0),
            graded_assignment(2, 1, "Extra Credit", 100.0),
        ];

        let breakdown = category_breakdown(&course, &assignments);

        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].graded_count, 1);
        assert_eq!(breakdown[0].average, Some(90.0));
    }

    #[test]
    fn category_match_is_case_sensitive() {
        let course = course_with_categories(1, &[("Homework", 100.0)]);
        let assignments = [graded_assignment(1, 1, "homework", 90.0)];

        let breakdown = category_breakdown(&course, &assignments);

        assert_eq!(breakdown[0].graded_count, 0);
    }

    #[test]
    fn other_courses_assignments_are_excluded() {
        let course = course_with_categories(1, &[("Homework", 100.0)]);
        let assignments = [
            graded_assignment(1, 1, "Homework", 90.0),
            graded_assignment(2, 2, "Homework", 10.0),
        ];

        let breakdown = category_breakdown(&course, &assignments);

        assert_eq!(breakdown[0].graded_count, 1);
        assert_eq!(breakdown[0].average, Some(90.0));
    }

    #[test]
    fn breakdown_preserves_declared_order() {
        let course =
            course_with_categories(1, &[("Exams", 50.0), ("Homework", 30.0), ("Labs", 20.0)]);

        let breakdown = category_breakdown(&course, &[]);

        let names: Vec<&str> = breakdown.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Exams", "Homework", "Labs"]);
    }

    #[test]
    fn current_grade_with_all_categories_active() {
        // Homework 40% averaging 90, Exams 60% averaging 70:
        // (90*40/100 + 70*60/100) / (40+60) * 100 = 78.0
        let course = course_with_categories(1, &[("Homework", 40.0), ("Exams", 60.0)]);
        let assignments = [
            graded_assignment(1, 1, "Homework", 80.0),
            graded_assignment(2, 1, "Homework", 100.0),
            graded_assignment(3, 1, "Exams", 70.0),
        ];

        let breakdown = category_breakdown(&course, &assignments);
        assert!((current_grade(&breakdown) - 78.0).abs() < f64::EPSILON);
    }

    #[test]
    fn current_grade_excludes_ungraded_categories_from_denominator() {
        // Same course but no exam grades yet: 36 / 40 * 100 = 90.0
        let course = course_with_categories(1, &[("Homework", 40.0), ("Exams", 60.0)]);
        let assignments = [
            graded_assignment(1, 1, "Homework", 80.0),
            graded_assignment(2, 1, "Homework", 100.0),
        ];

        let breakdown = category_breakdown(&course, &assignments);
        assert!((current_grade(&breakdown) - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn current_grade_is_order_invariant() {
        let course = course_with_categories(1, &[("Homework", 40.0), ("Exams", 60.0)]);
        let assignments = [
            graded_assignment(1, 1, "Homework", 85.0),
            graded_assignment(2, 1, "Exams", 72.0),
        ];

        let mut breakdown = category_breakdown(&course, &assignments);
        let forward = current_grade(&breakdown);
        breakdown.reverse();
        let backward = current_grade(&breakdown);

        assert!((forward - backward).abs() < f64::EPSILON);
    }

    #[test]
    fn current_grade_without_graded_work_is_zero() {
        let course = course_with_categories(1, &[("Homework", 40.0), ("Exams", 60.0)]);
        let breakdown = category_breakdown(&course, &[]);
        assert!((current_grade(&breakdown) - 0.0).abs() < f64::EPSILON);

        let no_categories = Course::new(2, "CS 2".to_string(), "Empty".to_string());
        let breakdown = category_breakdown(&no_categories, &[]);
        assert!((current_grade(&breakdown) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn current_grade_rounds_to_one_decimal() {
        // Single category averaging exactly 85.25; half rounds away from zero
        let course = course_with_categories(1, &[("Homework", 100.0)]);
        let assignments = [
            graded_assignment(1, 1, "Homework", 85.0),
            graded_assignment(2, 1, "Homework", 85.5),
        ];

        let breakdown = category_breakdown(&course, &assignments);
        assert!((current_grade(&breakdown) - 85.3).abs() < f64::EPSILON);
    }

    #[test]
    fn banding_boundaries() {
        assert_eq!(letter_and_points(93.0), ("A", 4.0));
        assert_eq!(letter_and_points(92.99), ("A-", 3.7));
        assert_eq!(letter_and_points(90.0), ("A-", 3.7));
        assert_eq!(letter_and_points(87.0), ("B+", 3.3));
        assert_eq!(letter_and_points(80.0), ("B-", 2.7));
        assert_eq!(letter_and_points(73.0), ("C", 2.0));
        assert_eq!(letter_and_points(67.0), ("D+", 1.3));
        assert_eq!(letter_and_points(60.0), ("D-", 0.7));
        assert_eq!(letter_and_points(59.9), ("F", 0.0));
        assert_eq!(letter_and_points(0.0), ("F", 0.0));
        assert_eq!(letter_and_points(100.0), ("A", 4.0));
    }

    #[test]
    fn gpa_two_courses_credit_weighted() {
        // Course 1: 3 credits at 90.0% (A-, 3.7 via final_grade/100*4.0 path:
        // 90/100*4.0*3 = 10.8); Course 2: 4 credits at 80.0% (80/100*4.0*4 = 12.8).
        // gpa = (10.8 + 12.8) / 7 = 3.37
        let c1 = course_with_categories(1, &[("Homework", 100.0)]).with_credit_hours(3);
        let c2 = course_with_categories(2, &[("Homework", 100.0)]).with_credit_hours(4);
        let assignments = [
            graded_assignment(1, 1, "Homework", 90.0),
            graded_assignment(2, 2, "Homework", 80.0),
        ];

        let summary = overall_gpa(&[c1, c2], &assignments, &SemesterFilter::All);

        assert_eq!(summary.total_credits, 7);
        assert_eq!(summary.courses.len(), 2);
        assert_eq!(summary.courses[0].letter, "A-");
        assert!((summary.courses[0].points - 3.7).abs() < f64::EPSILON);
        assert_eq!(summary.courses[1].letter, "B-");
        assert!((summary.courses[1].points - 2.7).abs() < f64::EPSILON);
        assert!((summary.gpa - 3.37).abs() < f64::EPSILON);
    }

    #[test]
    fn gpa_skips_courses_without_graded_work() {
        let graded_course = course_with_categories(1, &[("Homework", 100.0)]).with_credit_hours(3);
        let ungraded_course = course_with_categories(2, &[("Exams", 100.0)]).with_credit_hours(4);
        let assignments = [graded_assignment(1, 1, "Homework", 100.0)];

        let summary = overall_gpa(&[graded_course, ungraded_course], &assignments, &SemesterFilter::All);

        // The ungraded course contributes neither credits nor points
        assert_eq!(summary.total_credits, 3);
        assert_eq!(summary.courses.len(), 1);
        assert_eq!(summary.courses[0].course_id, 1);
        assert!((summary.gpa - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn gpa_with_no_graded_courses_is_empty_zero() {
        let course = course_with_categories(1, &[("Homework", 100.0)]);

        let summary = overall_gpa(&[course], &[], &SemesterFilter::All);

        assert!((summary.gpa - 0.0).abs() < f64::EPSILON);
        assert_eq!(summary.total_credits, 0);
        assert!(summary.courses.is_empty());
    }

    #[test]
    fn semester_filter_is_exact_and_case_sensitive() {
        let fall = course_with_categories(1, &[("Homework", 100.0)]).with_semester("Fall 2025");
        let spring = course_with_categories(2, &[("Homework", 100.0)]).with_semester("Spring 2026");
        let unassigned = course_with_categories(3, &[("Homework", 100.0)]);
        let assignments = [
            graded_assignment(1, 1, "Homework", 90.0),
            graded_assignment(2, 2, "Homework", 80.0),
            graded_assignment(3, 3, "Homework", 70.0),
        ];
        let courses = [fall, spring, unassigned];

        let all = overall_gpa(&courses, &assignments, &SemesterFilter::All);
        assert_eq!(all.courses.len(), 3);

        let fall_only = overall_gpa(
            &courses,
            &assignments,
            &SemesterFilter::Term("Fall 2025".to_string()),
        );
        assert_eq!(fall_only.courses.len(), 1);
        assert_eq!(fall_only.courses[0].course_id, 1);

        let wrong_case = overall_gpa(
            &courses,
            &assignments,
            &SemesterFilter::Term("fall 2025".to_string()),
        );
        assert!(wrong_case.courses.is_empty());
    }

    #[test]
    fn semester_filter_from_str() {
        assert_eq!("all".parse::<SemesterFilter>().unwrap(), SemesterFilter::All);
        assert_eq!("ALL".parse::<SemesterFilter>().unwrap(), SemesterFilter::All);
        assert_eq!(
            "Fall 2025".parse::<SemesterFilter>().unwrap(),
            SemesterFilter::Term("Fall 2025".to_string())
        );
    }

    #[test]
    fn gpa_rounds_to_two_decimals() {
        // One course, 3 credits, final grade 83.3%: 83.3/100*4.0 = 3.332 -> 3.33
        let course = course_with_categories(1, &[("Homework", 100.0)]).with_credit_hours(3);
        let assignments = [
            graded_assignment(1, 1, "Homework", 83.3),
        ];

        let summary = overall_gpa(&[course], &assignments, &SemesterFilter::All);
        assert!((summary.gpa - 3.33).abs() < f64::EPSILON);
    }

    #[test]
    fn weights_need_not_sum_to_one_hundred() {
        // Categories 30 + 30 with both active: (avg80*30/100 + avg60*30/100)/60*100 = 70
        let course = course_with_categories(1, &[("Homework", 30.0), ("Labs", 30.0)]);
        let assignments = [
            graded_assignment(1, 1, "Homework", 80.0),
            graded_assignment(2, 1, "Labs", 60.0),
        ];

        let breakdown = category_breakdown(&course, &assignments);
        assert!((current_grade(&breakdown) - 70.0).abs() < f64::EPSILON);
    }
}
