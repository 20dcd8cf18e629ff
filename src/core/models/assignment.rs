//! Assignment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Assignment priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority
    Low,
    /// Medium priority
    #[default]
    Medium,
    /// High priority
    High,
}

/// Represents one assignment belonging to a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique identifier
    pub id: u32,

    /// Owning course id
    pub course_id: u32,

    /// Assignment title
    pub title: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Due date
    pub due_date: DateTime<Utc>,

    /// Priority level
    #[serde(default)]
    pub priority: Priority,

    /// Grade category name; matched against the course's declared
    /// categories by exact, case-sensitive comparison
    #[serde(default)]
    pub category: String,

    /// Whether the assignment has been completed
    #[serde(default)]
    pub completed: bool,

    /// Grade percentage (0-100); only meaningful when `completed` is true
    #[serde(default)]
    pub grade: Option<f64>,
}

impl Assignment {
    /// Create a new assignment, incomplete and ungraded
    #[must_use]
    pub const fn new(id: u32, course_id: u32, title: String, due_date: DateTime<Utc>) -> Self {
        Self {
            id,
            course_id,
            title,
            description: String::new(),
            due_date,
            priority: Priority::Medium,
            category: String::new(),
            completed: false,
            grade: None,
        }
    }

    /// Set the category name (builder-style)
    #[must_use]
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    /// Mark complete with a grade (builder-style, used heavily in tests)
    #[must_use]
    pub const fn graded(mut self, grade: f64) -> Self {
        self.completed = true;
        self.grade = Some(grade);
        self
    }

    /// Whether this assignment carries a grade that counts toward aggregation:
    /// completed with a recorded numeric grade
    #[must_use]
    pub const fn is_graded(&self) -> bool {
        self.completed && self.grade.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn due() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 23, 59, 0).unwrap()
    }

    #[test]
    fn test_new_assignment_is_ungraded() {
        let a = Assignment::new(1, 10, "Problem Set 1".to_string(), due());

        assert!(!a.completed);
        assert!(a.grade.is_none());
        assert!(!a.is_graded());
        assert_eq!(a.priority, Priority::Medium);
    }

    #[test]
    fn test_graded_builder() {
        let a = Assignment::new(2, 10, "Quiz 1".to_string(), due())
            .with_category("Quizzes")
            .graded(88.0);

        assert!(a.completed);
        assert_eq!(a.grade, Some(88.0));
        assert!(a.is_graded());
        assert_eq!(a.category, "Quizzes");
    }

    #[test]
    fn test_completed_without_grade_is_not_graded() {
        let mut a = Assignment::new(3, 10, "Essay".to_string(), due());
        a.completed = true;

        assert!(!a.is_graded());
    }

    #[test]
    fn test_priority_serde_lowercase() {
        let json = serde_json::to_string(&Priority::High).unwrap();
        assert_eq!(json, "\"high\"");

        let parsed: Priority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(parsed, Priority::Low);
    }
}
