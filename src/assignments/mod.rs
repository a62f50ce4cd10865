//! Assignment tracker: due dates, priorities and completion state

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::{AssignmentStorage, AssignmentStorageError};
