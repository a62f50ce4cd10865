//! Shared storage plumbing
//!
//! Each domain keeps its collection in one pretty-printed JSON file under
//! the data directory:
//! ```text
//! ~/.local/share/satchel/
//! ├── courses.json       # grade book courses with their components
//! ├── assignments.json
//! ├── schedule.json
//! └── reminders.json
//! ```

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Course not found: {0}")]
    CourseNotFound(Uuid),

    #[error("Component not found: {0}")]
    ComponentNotFound(Uuid),

    #[error("Assignment not found: {0}")]
    AssignmentNotFound(Uuid),

    #[error("Schedule entry not found: {0}")]
    EntryNotFound(Uuid),

    #[error("Reminder not found: {0}")]
    ReminderNotFound(Uuid),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Get the default data directory
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|p| p.join("satchel"))
        .ok_or(StorageError::DataDirNotFound)
}
