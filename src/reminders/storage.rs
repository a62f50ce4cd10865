//! Reminder storage implementation

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::models::{admit_reminder, Reminder, ReminderDraft, ReminderError};
use crate::storage::{Result, StorageError};

/// Storage for reminders
pub struct ReminderStorage {
    data_dir: PathBuf,
}

impl ReminderStorage {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn reminders_path(&self) -> PathBuf {
        self.data_dir.join("reminders.json")
    }

    fn save(&self, reminders: &mut Vec<Reminder>) -> Result<()> {
        reminders.sort_by_key(|r| r.date);
        fs::write(
            self.reminders_path(),
            serde_json::to_string_pretty(reminders)?,
        )?;
        Ok(())
    }

    /// List all reminders, soonest first
    pub fn list(&self) -> Result<Vec<Reminder>> {
        let path = self.reminders_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let mut reminders: Vec<Reminder> = serde_json::from_str(&content)?;
        reminders.sort_by_key(|r| r.date);
        Ok(reminders)
    }

    /// Get a reminder by id
    pub fn get(&self, id: Uuid) -> Result<Reminder> {
        self.list()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(StorageError::ReminderNotFound(id))
    }

    /// Reminders that should fire at or before the given instant
    pub fn due_before(&self, now: DateTime<Utc>) -> Result<Vec<Reminder>> {
        Ok(self.list()?.into_iter().filter(|r| r.is_due(now)).collect())
    }

    /// Validate a draft and persist the admitted reminder
    pub fn admit(
        &self,
        draft: &ReminderDraft,
    ) -> std::result::Result<Reminder, ReminderStorageError> {
        let mut reminders = self.list()?;
        let admitted = admit_reminder(draft)?;

        match reminders.iter_mut().find(|r| r.id == admitted.id) {
            Some(existing) => *existing = admitted.clone(),
            None => reminders.push(admitted.clone()),
        }

        self.save(&mut reminders)?;
        Ok(admitted)
    }

    /// Move a reminder to its next occurrence after it fired
    pub fn reschedule(&self, id: Uuid, date: DateTime<Utc>) -> Result<Reminder> {
        let mut reminders = self.list()?;
        let reminder = reminders
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StorageError::ReminderNotFound(id))?;

        reminder.date = date;
        let updated = reminder.clone();
        self.save(&mut reminders)?;
        Ok(updated)
    }

    /// Mark a reminder completed or not
    ///
    /// A completed reminder is never scheduled for delivery.
    pub fn set_completed(&self, id: Uuid, completed: bool) -> Result<Reminder> {
        let mut reminders = self.list()?;
        let reminder = reminders
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StorageError::ReminderNotFound(id))?;

        reminder.completed = completed;
        let updated = reminder.clone();
        self.save(&mut reminders)?;
        Ok(updated)
    }

    /// Delete a reminder
    pub fn remove(&self, id: Uuid) -> Result<()> {
        let mut reminders = self.list()?;
        let before = reminders.len();
        reminders.retain(|r| r.id != id);
        if reminders.len() == before {
            return Err(StorageError::ReminderNotFound(id));
        }

        self.save(&mut reminders)
    }
}

/// Failure admitting a reminder: refused draft or storage trouble
#[derive(thiserror::Error, Debug)]
pub enum ReminderStorageError {
    #[error(transparent)]
    Invalid(#[from] ReminderError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
