//! Schedule storage implementation

use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

use super::models::{admit_entry, EntryDraft, ScheduleEntry, ScheduleError};
use crate::storage::{Result, StorageError};

/// Storage for the weekly course schedule
pub struct ScheduleStorage {
    data_dir: PathBuf,
}

impl ScheduleStorage {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn schedule_path(&self) -> PathBuf {
        self.data_dir.join("schedule.json")
    }

    fn save(&self, entries: &[ScheduleEntry]) -> Result<()> {
        fs::write(self.schedule_path(), serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }

    /// List all schedule entries
    pub fn list(&self) -> Result<Vec<ScheduleEntry>> {
        let path = self.schedule_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let entries: Vec<ScheduleEntry> = serde_json::from_str(&content)?;
        Ok(entries)
    }

    /// Get an entry by id
    pub fn get(&self, id: Uuid) -> Result<ScheduleEntry> {
        self.list()?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or(StorageError::EntryNotFound(id))
    }

    /// Validate a draft and persist the admitted entry
    pub fn admit(
        &self,
        draft: &EntryDraft,
    ) -> std::result::Result<ScheduleEntry, ScheduleStorageError> {
        let mut entries = self.list()?;
        let admitted = admit_entry(&entries, draft)?;

        match entries.iter_mut().find(|e| e.id == admitted.id) {
            Some(existing) => *existing = admitted.clone(),
            None => entries.push(admitted.clone()),
        }

        self.save(&entries)?;
        Ok(admitted)
    }

    /// Delete an entry
    pub fn remove(&self, id: Uuid) -> Result<()> {
        let mut entries = self.list()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(StorageError::EntryNotFound(id));
        }

        self.save(&entries)
    }

    /// Filter by case-insensitive substring match on course name
    pub fn search(&self, query: &str) -> Result<Vec<ScheduleEntry>> {
        let entries = self.list()?;
        if query.trim().is_empty() {
            return Ok(entries);
        }

        let query = query.to_lowercase();
        Ok(entries
            .into_iter()
            .filter(|e| e.name.to_lowercase().contains(&query))
            .collect())
    }
}

/// Failure admitting a schedule entry: refused draft or storage trouble
#[derive(thiserror::Error, Debug)]
pub enum ScheduleStorageError {
    #[error(transparent)]
    Invalid(#[from] ScheduleError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (ScheduleStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = ScheduleStorage::new(temp_dir.path().to_path_buf()).unwrap();
        (storage, temp_dir)
    }

    fn draft(name: &str) -> EntryDraft {
        EntryDraft {
            id: None,
            name: name.to_string(),
            start_time: "10:00".to_string(),
            end_time: "11:30".to_string(),
            start_date: "01.09.2026".to_string(),
            end_date: "18.12.2026".to_string(),
            days: "Monday, Wednesday".to_string(),
            location: "Room 204".to_string(),
        }
    }

    #[test]
    fn test_admit_and_list() {
        let (storage, _temp) = create_test_storage();

        storage.admit(&draft("Algorithms")).unwrap();
        storage.admit(&draft("Databases")).unwrap();

        assert_eq!(storage.list().unwrap().len(), 2);
    }

    #[test]
    fn test_admit_edit_replaces() {
        let (storage, _temp) = create_test_storage();
        let entry = storage.admit(&draft("Algorithms")).unwrap();

        let mut edit = EntryDraft::edit_of(&entry);
        edit.location = "Room 101".to_string();
        storage.admit(&edit).unwrap();

        let entries = storage.list().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].location, "Room 101");
    }

    #[test]
    fn test_duplicate_name_refused() {
        let (storage, _temp) = create_test_storage();
        storage.admit(&draft("Algorithms")).unwrap();

        let result = storage.admit(&draft("algorithms"));
        assert!(matches!(
            result,
            Err(ScheduleStorageError::Invalid(ScheduleError::DuplicateName))
        ));
    }

    #[test]
    fn test_remove_and_search() {
        let (storage, _temp) = create_test_storage();
        let entry = storage.admit(&draft("Algorithms")).unwrap();
        storage.admit(&draft("Databases")).unwrap();

        assert_eq!(storage.search("data").unwrap().len(), 1);

        storage.remove(entry.id).unwrap();
        assert_eq!(storage.list().unwrap().len(), 1);
        assert!(matches!(
            storage.remove(entry.id),
            Err(StorageError::EntryNotFound(_))
        ));
    }
}
