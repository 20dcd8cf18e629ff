//! Data store
//!
//! The aggregation core consumes plain course/assignment collections and
//! must not care where they come from. [`Repository`] is that seam; the
//! bundled implementation is [`JsonStore`], a single-file JSON document
//! that mirrors the hosted record service's canonical schema. Adapters for
//! other backends normalize into the same model types before data crosses
//! this boundary.

use crate::core::models::{course::DEFAULT_CREDIT_HOURS, Assignment, Course};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Bundled sample dataset, used when no data file exists yet
const SAMPLE_DATA: &str = include_str!("../assets/sample_data.json");

/// Errors produced by store operations
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the data file failed
    Io(std::io::Error),
    /// The data file is not a valid store document
    Parse(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "data file I/O error: {e}"),
            Self::Parse(e) => write!(f, "invalid data file: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Read-only access to the canonical collections.
///
/// The grade aggregator and dashboard take these collections by slice; this
/// trait is the seam between them and whichever persistence backend is
/// active.
pub trait Repository {
    /// List every course
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read
    fn list_courses(&self) -> Result<Vec<Course>, StoreError>;

    /// List every assignment
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read
    fn list_assignments(&self) -> Result<Vec<Assignment>, StoreError>;
}

/// On-disk document shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    courses: Vec<Course>,
    #[serde(default)]
    assignments: Vec<Assignment>,
}

/// File-backed store holding the full dataset in memory.
///
/// Mutations operate on the in-memory document; callers persist explicitly
/// with [`save`](JsonStore::save). New records get the highest existing id
/// plus one.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    doc: Document,
}

impl JsonStore {
    /// Open a store at `path`, seeding from the bundled sample data when
    /// the file does not exist yet.
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let doc = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            Self::sample_document()
        };
        Ok(Self { path, doc })
    }

    fn sample_document() -> Document {
        // The bundled sample is compiled in; a parse failure is a build defect.
        serde_json::from_str(SAMPLE_DATA).expect("bundled sample data is valid JSON")
    }

    /// Persist the current document to the store's path, creating parent
    /// directories as needed.
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails.
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.doc)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// All courses
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.doc.courses
    }

    /// All assignments
    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.doc.assignments
    }

    /// Look up a course by id
    #[must_use]
    pub fn course(&self, id: u32) -> Option<&Course> {
        self.doc.courses.iter().find(|c| c.id == id)
    }

    /// Look up an assignment by id
    #[must_use]
    pub fn assignment(&self, id: u32) -> Option<&Assignment> {
        self.doc.assignments.iter().find(|a| a.id == id)
    }

    /// Assignments belonging to one course
    #[must_use]
    pub fn assignments_for_course(&self, course_id: u32) -> Vec<&Assignment> {
        self.doc
            .assignments
            .iter()
            .filter(|a| a.course_id == course_id)
            .collect()
    }

    /// Add a course, assigning the next id and defaulting zero credit
    /// hours to 3. Returns the assigned id.
    pub fn add_course(&mut self, mut course: Course) -> u32 {
        let next_id = self.doc.courses.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        course.id = next_id;
        if course.credit_hours == 0 {
            course.credit_hours = DEFAULT_CREDIT_HOURS;
        }
        self.doc.courses.push(course);
        next_id
    }

    /// Replace a course by id. Returns `false` when no course has that id.
    pub fn update_course(&mut self, course: Course) -> bool {
        self.doc
            .courses
            .iter_mut()
            .find(|c| c.id == course.id)
            .is_some_and(|slot| {
                *slot = course;
                true
            })
    }

    /// Remove a course by id. Assignments referencing it are left in place.
    /// Returns `false` when no course has that id.
    pub fn remove_course(&mut self, id: u32) -> bool {
        let before = self.doc.courses.len();
        self.doc.courses.retain(|c| c.id != id);
        self.doc.courses.len() != before
    }

    /// Add an assignment, assigning the next id. New assignments always
    /// start incomplete and ungraded regardless of the passed fields.
    /// Returns the assigned id.
    pub fn add_assignment(&mut self, mut assignment: Assignment) -> u32 {
        let next_id = self.doc.assignments.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        assignment.id = next_id;
        assignment.completed = false;
        assignment.grade = None;
        self.doc.assignments.push(assignment);
        next_id
    }

    /// Replace an assignment by id. Returns `false` when no assignment has
    /// that id.
    pub fn update_assignment(&mut self, assignment: Assignment) -> bool {
        self.doc
            .assignments
            .iter_mut()
            .find(|a| a.id == assignment.id)
            .is_some_and(|slot| {
                *slot = assignment;
                true
            })
    }

    /// Remove an assignment by id. Returns `false` when no assignment has
    /// that id.
    pub fn remove_assignment(&mut self, id: u32) -> bool {
        let before = self.doc.assignments.len();
        self.doc.assignments.retain(|a| a.id != id);
        self.doc.assignments.len() != before
    }

    /// Flip an assignment's completed flag. Returns the new state, or
    /// `None` when no assignment has that id.
    pub fn toggle_complete(&mut self, id: u32) -> Option<bool> {
        self.doc.assignments.iter_mut().find(|a| a.id == id).map(|a| {
            a.completed = !a.completed;
            a.completed
        })
    }

    /// Record a grade for an assignment, marking it completed. Returns
    /// `false` when no assignment has that id.
    pub fn record_grade(&mut self, id: u32, grade: f64) -> bool {
        self.doc
            .assignments
            .iter_mut()
            .find(|a| a.id == id)
            .is_some_and(|a| {
                a.completed = true;
                a.grade = Some(grade);
                true
            })
    }
}

impl Repository for JsonStore {
    fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        Ok(self.doc.courses.clone())
    }

    fn list_assignments(&self) -> Result<Vec<Assignment>, StoreError> {
        Ok(self.doc.assignments.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().expect("create temp dir");
        let store = JsonStore::open(dir.path().join("studyflow.json")).expect("open store");
        (dir, store)
    }

    fn new_assignment(course_id: u32) -> Assignment {
        let due = Utc.with_ymd_and_hms(2025, 12, 1, 5, 0, 0).unwrap();
        Assignment::new(0, course_id, "Essay".to_string(), due).with_category("Essays")
    }

    #[test]
    fn missing_file_seeds_sample_data() {
        let (_dir, store) = temp_store();

        assert!(!store.courses().is_empty());
        assert!(!store.assignments().is_empty());
        // Sample ids are unique
        let mut ids: Vec<u32> = store.courses().iter().map(|c| c.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), store.courses().len());
    }

    #[test]
    fn save_and_reopen_round_trips() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("data").join("studyflow.json");

        let mut store = JsonStore::open(&path).expect("open store");
        let id = store.add_course(Course::new(0, "CS 4500".to_string(), "SwDev".to_string()));
        store.save().expect("save store");

        let reopened = JsonStore::open(&path).expect("reopen store");
        assert!(reopened.course(id).is_some());
        assert_eq!(reopened.courses().len(), store.courses().len());
    }

    #[test]
    fn add_course_assigns_max_plus_one_and_default_credits() {
        let (_dir, mut store) = temp_store();
        let max_id = store.courses().iter().map(|c| c.id).max().unwrap_or(0);

        let mut course = Course::new(0, "CS 3000".to_string(), "Algorithms".to_string());
        course.credit_hours = 0;
        let id = store.add_course(course);

        assert_eq!(id, max_id + 1);
        assert_eq!(store.course(id).unwrap().credit_hours, DEFAULT_CREDIT_HOURS);
    }

    #[test]
    fn add_assignment_starts_incomplete_and_ungraded() {
        let (_dir, mut store) = temp_store();

        let sneaky = new_assignment(1).graded(100.0);
        let id = store.add_assignment(sneaky);

        let stored = store.assignment(id).expect("assignment exists");
        assert!(!stored.completed);
        assert!(stored.grade.is_none());
    }

    #[test]
    fn update_and_remove_by_id() {
        let (_dir, mut store) = temp_store();
        let id = store.add_course(Course::new(0, "CS 3650".to_string(), "Systems".to_string()));

        let mut updated = store.course(id).unwrap().clone();
        updated.name = "Computer Systems".to_string();
        assert!(store.update_course(updated));
        assert_eq!(store.course(id).unwrap().name, "Computer Systems");

        assert!(store.remove_course(id));
        assert!(store.course(id).is_none());
        assert!(!store.remove_course(id));

        let mut missing = Course::new(0, "X".to_string(), "X".to_string());
        missing.id = 9999;
        assert!(!store.update_course(missing));
    }

    #[test]
    fn toggle_complete_flips_state() {
        let (_dir, mut store) = temp_store();
        let id = store.add_assignment(new_assignment(1));

        assert_eq!(store.toggle_complete(id), Some(true));
        assert_eq!(store.toggle_complete(id), Some(false));
        assert_eq!(store.toggle_complete(9999), None);
    }

    #[test]
    fn record_grade_marks_completed() {
        let (_dir, mut store) = temp_store();
        let id = store.add_assignment(new_assignment(1));

        assert!(store.record_grade(id, 87.5));
        let stored = store.assignment(id).unwrap();
        assert!(stored.completed);
        assert_eq!(stored.grade, Some(87.5));

        assert!(!store.record_grade(9999, 50.0));
    }

    #[test]
    fn assignments_for_course_filters_by_owner() {
        let (_dir, mut store) = temp_store();
        let a = store.add_assignment(new_assignment(42));
        let b = store.add_assignment(new_assignment(42));
        store.add_assignment(new_assignment(43));

        let for_course: Vec<u32> = store
            .assignments_for_course(42)
            .iter()
            .map(|x| x.id)
            .collect();
        assert_eq!(for_course, vec![a, b]);
    }

    #[test]
    fn repository_trait_returns_collections() {
        let (_dir, store) = temp_store();

        let courses = store.list_courses().expect("list courses");
        let assignments = store.list_assignments().expect("list assignments");
        assert_eq!(courses.len(), store.courses().len());
        assert_eq!(assignments.len(), store.assignments().len());
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").expect("write file");

        let err = JsonStore::open(&path).expect_err("should fail");
        assert!(matches!(err, StoreError::Parse(_)));
    }
}
