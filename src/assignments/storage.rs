//! Assignment storage implementation

use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

use super::models::{admit_assignment, Assignment, AssignmentDraft, AssignmentError};
use crate::storage::{Result, StorageError};

/// Storage for tracked assignments, kept sorted by due date
pub struct AssignmentStorage {
    data_dir: PathBuf,
}

impl AssignmentStorage {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn assignments_path(&self) -> PathBuf {
        self.data_dir.join("assignments.json")
    }

    fn save(&self, assignments: &mut Vec<Assignment>) -> Result<()> {
        // The list is always persisted due-date ascending, so a plain load
        // comes back in display order
        assignments.sort_by_key(|a| a.due_date);
        fs::write(
            self.assignments_path(),
            serde_json::to_string_pretty(assignments)?,
        )?;
        Ok(())
    }

    /// List all assignments, due-date ascending
    pub fn list(&self) -> Result<Vec<Assignment>> {
        let path = self.assignments_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let mut assignments: Vec<Assignment> = serde_json::from_str(&content)?;
        assignments.sort_by_key(|a| a.due_date);
        Ok(assignments)
    }

    /// Get an assignment by id
    pub fn get(&self, id: Uuid) -> Result<Assignment> {
        self.list()?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or(StorageError::AssignmentNotFound(id))
    }

    /// Validate a draft and persist the admitted assignment
    pub fn admit(
        &self,
        draft: &AssignmentDraft,
    ) -> std::result::Result<Assignment, AssignmentStorageError> {
        let mut assignments = self.list()?;
        let admitted = admit_assignment(&assignments, draft)?;

        match assignments.iter_mut().find(|a| a.id == admitted.id) {
            Some(existing) => *existing = admitted.clone(),
            None => assignments.push(admitted.clone()),
        }

        self.save(&mut assignments)?;
        Ok(admitted)
    }

    /// Mark an assignment completed or not
    pub fn set_completed(&self, id: Uuid, completed: bool) -> Result<Assignment> {
        let mut assignments = self.list()?;
        let assignment = assignments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StorageError::AssignmentNotFound(id))?;

        assignment.completed = completed;
        let updated = assignment.clone();
        self.save(&mut assignments)?;
        Ok(updated)
    }

    /// Delete an assignment
    pub fn remove(&self, id: Uuid) -> Result<()> {
        let mut assignments = self.list()?;
        let before = assignments.len();
        assignments.retain(|a| a.id != id);
        if assignments.len() == before {
            return Err(StorageError::AssignmentNotFound(id));
        }

        self.save(&mut assignments)
    }

    /// Filter by case-insensitive substring match on title or course
    pub fn search(&self, query: &str) -> Result<Vec<Assignment>> {
        let assignments = self.list()?;
        if query.trim().is_empty() {
            return Ok(assignments);
        }

        let query = query.to_lowercase();
        Ok(assignments
            .into_iter()
            .filter(|a| {
                a.title.to_lowercase().contains(&query)
                    || a.course.to_lowercase().contains(&query)
            })
            .collect())
    }
}

/// Failure admitting an assignment: refused draft or storage trouble
#[derive(thiserror::Error, Debug)]
pub enum AssignmentStorageError {
    #[error(transparent)]
    Invalid(#[from] AssignmentError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn create_test_storage() -> (AssignmentStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = AssignmentStorage::new(temp_dir.path().to_path_buf()).unwrap();
        (storage, temp_dir)
    }

    fn draft(title: &str, course: &str, day: u32) -> AssignmentDraft {
        AssignmentDraft::new(
            title,
            course,
            Utc.with_ymd_and_hms(2026, 9, day, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_list_is_sorted_by_due_date() {
        let (storage, _temp) = create_test_storage();

        storage.admit(&draft("Essay", "History", 20)).unwrap();
        storage.admit(&draft("Problem set", "Algorithms", 5)).unwrap();
        storage.admit(&draft("Lab report", "Physics", 12)).unwrap();

        let titles: Vec<String> = storage
            .list()
            .unwrap()
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, ["Problem set", "Lab report", "Essay"]);
    }

    #[test]
    fn test_toggle_completion() {
        let (storage, _temp) = create_test_storage();
        let assignment = storage.admit(&draft("Essay", "History", 20)).unwrap();

        let updated = storage.set_completed(assignment.id, true).unwrap();
        assert!(updated.completed);
        assert!(storage.get(assignment.id).unwrap().completed);

        let updated = storage.set_completed(assignment.id, false).unwrap();
        assert!(!updated.completed);
    }

    #[test]
    fn test_duplicate_title_refused_on_admit() {
        let (storage, _temp) = create_test_storage();
        storage.admit(&draft("Essay", "History", 20)).unwrap();

        let result = storage.admit(&draft("essay", "Philosophy", 22));
        assert!(matches!(
            result,
            Err(AssignmentStorageError::Invalid(
                AssignmentError::DuplicateTitle
            ))
        ));
        assert_eq!(storage.list().unwrap().len(), 1);
    }

    #[test]
    fn test_search_matches_title_or_course() {
        let (storage, _temp) = create_test_storage();
        storage.admit(&draft("Essay", "History", 20)).unwrap();
        storage.admit(&draft("Problem set", "Algorithms", 5)).unwrap();

        assert_eq!(storage.search("algo").unwrap().len(), 1);
        assert_eq!(storage.search("essay").unwrap().len(), 1);
        assert_eq!(storage.search("").unwrap().len(), 2);
        assert!(storage.search("chemistry").unwrap().is_empty());
    }

    #[test]
    fn test_remove() {
        let (storage, _temp) = create_test_storage();
        let assignment = storage.admit(&draft("Essay", "History", 20)).unwrap();

        storage.remove(assignment.id).unwrap();
        assert!(storage.list().unwrap().is_empty());
        assert!(matches!(
            storage.remove(assignment.id),
            Err(StorageError::AssignmentNotFound(_))
        ));
    }
}
