//! Storage operations for the grade book
//!
//! All courses live in a single `courses.json` array. Mutations rewrite the
//! whole file, which is how the rest of the planner's collections persist
//! too; admission validation happens before any mutation is constructed so
//! the file never holds partial state.

use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

use super::engine::{admit_component, AdmissionError};
use super::models::{Component, ComponentDraft, Course};
use crate::storage::{Result, StorageError};

/// Storage manager for courses and their graded components
pub struct GradeBook {
    data_dir: PathBuf,
}

impl GradeBook {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn courses_path(&self) -> PathBuf {
        self.data_dir.join("courses.json")
    }

    fn save_courses(&self, courses: &[Course]) -> Result<()> {
        fs::write(self.courses_path(), serde_json::to_string_pretty(courses)?)?;
        Ok(())
    }

    // ==================== Course Operations ====================

    /// List all courses
    pub fn list_courses(&self) -> Result<Vec<Course>> {
        let path = self.courses_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let courses: Vec<Course> = serde_json::from_str(&content)?;
        Ok(courses)
    }

    /// Get a specific course
    pub fn get_course(&self, course_id: Uuid) -> Result<Course> {
        let courses = self.list_courses()?;
        courses
            .into_iter()
            .find(|c| c.id == course_id)
            .ok_or(StorageError::CourseNotFound(course_id))
    }

    /// Create a new, empty course
    pub fn create_course(&self, name: &str) -> Result<Course> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StorageError::InvalidOperation(
                "Course name is required".to_string(),
            ));
        }

        let course = Course::new(name.to_string());
        let mut courses = self.list_courses()?;
        courses.push(course.clone());
        self.save_courses(&courses)?;

        Ok(course)
    }

    /// Rename a course
    pub fn rename_course(&self, course_id: Uuid, name: &str) -> Result<Course> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StorageError::InvalidOperation(
                "Course name is required".to_string(),
            ));
        }

        let mut courses = self.list_courses()?;
        let course = courses
            .iter_mut()
            .find(|c| c.id == course_id)
            .ok_or(StorageError::CourseNotFound(course_id))?;

        course.name = name.to_string();
        let renamed = course.clone();
        self.save_courses(&courses)?;

        Ok(renamed)
    }

    /// Delete a course and all its components
    pub fn delete_course(&self, course_id: Uuid) -> Result<()> {
        let mut courses = self.list_courses()?;
        let before = courses.len();
        courses.retain(|c| c.id != course_id);
        if courses.len() == before {
            return Err(StorageError::CourseNotFound(course_id));
        }

        self.save_courses(&courses)
    }

    /// Filter courses by case-insensitive substring match on name
    pub fn search(&self, query: &str) -> Result<Vec<Course>> {
        let courses = self.list_courses()?;
        if query.trim().is_empty() {
            return Ok(courses);
        }

        let query = query.to_lowercase();
        Ok(courses
            .into_iter()
            .filter(|c| c.name.to_lowercase().contains(&query))
            .collect())
    }

    // ==================== Component Operations ====================

    /// Validate a component draft against a course and persist the admitted
    /// component (replace by id for an edit, append for a new one)
    pub fn admit(
        &self,
        course_id: Uuid,
        draft: &ComponentDraft,
    ) -> std::result::Result<Component, GradeBookError> {
        let mut courses = self.list_courses()?;
        let course = courses
            .iter_mut()
            .find(|c| c.id == course_id)
            .ok_or(StorageError::CourseNotFound(course_id))?;

        let admitted = admit_component(course, draft)?;

        match course.components.iter_mut().find(|c| c.id == admitted.id) {
            Some(existing) => *existing = admitted.clone(),
            None => course.components.push(admitted.clone()),
        }

        self.save_courses(&courses)?;
        Ok(admitted)
    }

    /// Remove a component from a course
    pub fn remove_component(&self, course_id: Uuid, component_id: Uuid) -> Result<()> {
        let mut courses = self.list_courses()?;
        let course = courses
            .iter_mut()
            .find(|c| c.id == course_id)
            .ok_or(StorageError::CourseNotFound(course_id))?;

        let before = course.components.len();
        course.components.retain(|c| c.id != component_id);
        if course.components.len() == before {
            return Err(StorageError::ComponentNotFound(component_id));
        }

        self.save_courses(&courses)
    }
}

/// Failure admitting a component: either the draft was refused or the
/// grade book itself could not be read or written
#[derive(thiserror::Error, Debug)]
pub enum GradeBookError {
    #[error(transparent)]
    Admission(#[from] AdmissionError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grades::engine::{gpa_band, weighted_grade};
    use tempfile::TempDir;

    fn create_test_book() -> (GradeBook, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let book = GradeBook::new(temp_dir.path().to_path_buf()).unwrap();
        (book, temp_dir)
    }

    #[test]
    fn test_create_and_list_courses() {
        let (book, _temp) = create_test_book();

        book.create_course("Algorithms").unwrap();
        book.create_course("Databases").unwrap();

        let courses = book.list_courses().unwrap();
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].name, "Algorithms");
    }

    #[test]
    fn test_create_course_requires_name() {
        let (book, _temp) = create_test_book();
        assert!(book.create_course("   ").is_err());
    }

    #[test]
    fn test_admit_appends_and_edit_replaces_in_place() {
        let (book, _temp) = create_test_book();
        let course = book.create_course("Algorithms").unwrap();

        let midterm = book
            .admit(course.id, &ComponentDraft::new("Midterm", "40", "80"))
            .unwrap();
        book.admit(course.id, &ComponentDraft::new("Final", "60", "90"))
            .unwrap();

        // Edit the midterm score, identity preserved
        let mut edit = ComponentDraft::edit_of(&midterm);
        edit.score = "95".to_string();
        let edited = book.admit(course.id, &edit).unwrap();
        assert_eq!(edited.id, midterm.id);

        let stored = book.get_course(course.id).unwrap();
        assert_eq!(stored.components.len(), 2);
        assert_eq!(stored.components[0].score, Some(95.0));
        assert_eq!(weighted_grade(&stored.components), 92.0);
        assert_eq!(gpa_band(&stored.components), 10);
    }

    #[test]
    fn test_admit_rejection_leaves_course_untouched() {
        let (book, _temp) = create_test_book();
        let course = book.create_course("Algorithms").unwrap();
        book.admit(course.id, &ComponentDraft::new("Midterm", "60", ""))
            .unwrap();

        let result = book.admit(course.id, &ComponentDraft::new("Final", "41", ""));
        assert!(matches!(
            result,
            Err(GradeBookError::Admission(AdmissionError::WeightOverflow))
        ));

        let stored = book.get_course(course.id).unwrap();
        assert_eq!(stored.components.len(), 1);
    }

    #[test]
    fn test_delete_course_cascades_to_components() {
        let (book, _temp) = create_test_book();
        let course = book.create_course("Algorithms").unwrap();
        book.admit(course.id, &ComponentDraft::new("Midterm", "40", ""))
            .unwrap();

        book.delete_course(course.id).unwrap();
        assert!(book.list_courses().unwrap().is_empty());
        assert!(matches!(
            book.get_course(course.id),
            Err(StorageError::CourseNotFound(_))
        ));
    }

    #[test]
    fn test_remove_component() {
        let (book, _temp) = create_test_book();
        let course = book.create_course("Algorithms").unwrap();
        let quiz = book
            .admit(course.id, &ComponentDraft::new("Quiz", "10", ""))
            .unwrap();

        book.remove_component(course.id, quiz.id).unwrap();
        assert!(book.get_course(course.id).unwrap().components.is_empty());

        assert!(matches!(
            book.remove_component(course.id, quiz.id),
            Err(StorageError::ComponentNotFound(_))
        ));
    }

    #[test]
    fn test_search_by_name_substring() {
        let (book, _temp) = create_test_book();
        book.create_course("Linear Algebra").unwrap();
        book.create_course("Databases").unwrap();

        let hits = book.search("alge").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Linear Algebra");

        // Empty query returns everything
        assert_eq!(book.search("").unwrap().len(), 2);
    }

    #[test]
    fn test_rename_course() {
        let (book, _temp) = create_test_book();
        let course = book.create_course("Algoritms").unwrap();

        let renamed = book.rename_course(course.id, "Algorithms").unwrap();
        assert_eq!(renamed.name, "Algorithms");
        assert_eq!(book.get_course(course.id).unwrap().name, "Algorithms");
    }
}
