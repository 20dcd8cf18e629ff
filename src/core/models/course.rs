//! Course model

use serde::{Deserialize, Serialize};

/// Default credit hours for a course when none are given
pub const DEFAULT_CREDIT_HOURS: u32 = 3;

/// A named, weighted bucket of assignments within a course
/// (e.g., "Homework" at 40% of the grade).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeCategory {
    /// Category name; assignment categories match against this exactly
    pub name: String,

    /// Share of the course grade, as a percentage (0-100)
    pub weight: f64,
}

impl GradeCategory {
    /// Create a new grade category
    #[must_use]
    pub const fn new(name: String, weight: f64) -> Self {
        Self { name, weight }
    }
}

/// Represents one enrolled course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier
    pub id: u32,

    /// Course code (e.g., "CS 2510")
    pub code: String,

    /// Full course name
    pub name: String,

    /// Instructor name
    #[serde(default)]
    pub instructor: String,

    /// Display color (hex string, e.g., "#4F46E5")
    #[serde(default)]
    pub color: String,

    /// Credit hours (positive; defaults to 3)
    #[serde(default = "default_credit_hours")]
    pub credit_hours: u32,

    /// Target grade percentage (0-100)
    #[serde(default)]
    pub target_grade: f64,

    /// Semester label (e.g., "Fall 2025"); `None` when unassigned
    #[serde(default)]
    pub semester: Option<String>,

    /// Weighted grade categories, in display order.
    /// Weights are not required to sum to 100; aggregation normalizes by
    /// the weight of categories that actually have graded work.
    #[serde(default)]
    pub grade_categories: Vec<GradeCategory>,
}

const fn default_credit_hours() -> u32 {
    DEFAULT_CREDIT_HOURS
}

impl Course {
    /// Create a new course with default credit hours and no categories
    #[must_use]
    pub const fn new(id: u32, code: String, name: String) -> Self {
        Self {
            id,
            code,
            name,
            instructor: String::new(),
            color: String::new(),
            credit_hours: DEFAULT_CREDIT_HOURS,
            target_grade: 0.0,
            semester: None,
            grade_categories: Vec::new(),
        }
    }

    /// Set the credit hours (builder-style)
    #[must_use]
    pub const fn with_credit_hours(mut self, credit_hours: u32) -> Self {
        self.credit_hours = credit_hours;
        self
    }

    /// Set the semester label (builder-style)
    #[must_use]
    pub fn with_semester(mut self, semester: &str) -> Self {
        self.semester = Some(semester.to_string());
        self
    }

    /// Add a grade category (duplicate names are not added twice)
    pub fn add_category(&mut self, name: &str, weight: f64) {
        if !self.grade_categories.iter().any(|c| c.name == name) {
            self.grade_categories
                .push(GradeCategory::new(name.to_string(), weight));
        }
    }

    /// Look up a declared category by exact name
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&GradeCategory> {
        self.grade_categories.iter().find(|c| c.name == name)
    }

    /// Whether this course belongs to the given semester label (exact match)
    #[must_use]
    pub fn in_semester(&self, label: &str) -> bool {
        self.semester.as_deref() == Some(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_creation() {
        let course = Course::new(7, "CS 2510".to_string(), "Fundamentals II".to_string());

        assert_eq!(course.id, 7);
        assert_eq!(course.code, "CS 2510");
        assert_eq!(course.name, "Fundamentals II");
        assert_eq!(course.credit_hours, DEFAULT_CREDIT_HOURS);
        assert!(course.semester.is_none());
        assert!(course.grade_categories.is_empty());
    }

    #[test]
    fn test_add_category() {
        let mut course = Course::new(1, "MATH 1342".to_string(), "Calculus 2".to_string());

        course.add_category("Homework", 40.0);
        course.add_category("Exams", 60.0);
        assert_eq!(course.grade_categories.len(), 2);

        // Adding a duplicate name should not duplicate
        course.add_category("Homework", 25.0);
        assert_eq!(course.grade_categories.len(), 2);
        assert!((course.category("Homework").unwrap().weight - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_category_lookup_is_case_sensitive() {
        let mut course = Course::new(1, "CS 1800".to_string(), "Discrete".to_string());
        course.add_category("Quizzes", 20.0);

        assert!(course.category("Quizzes").is_some());
        assert!(course.category("quizzes").is_none());
    }

    #[test]
    fn test_in_semester() {
        let course = Course::new(2, "CS 3500".to_string(), "OOD".to_string())
            .with_semester("Fall 2025");

        assert!(course.in_semester("Fall 2025"));
        assert!(!course.in_semester("fall 2025"));
        assert!(!course.in_semester("Spring 2026"));
    }

    #[test]
    fn test_builder_credit_hours() {
        let course =
            Course::new(3, "PHYS 1151".to_string(), "Physics 1".to_string()).with_credit_hours(4);
        assert_eq!(course.credit_hours, 4);
    }
}
