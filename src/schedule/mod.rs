//! Weekly course schedule: meeting times, date ranges and rooms

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::{ScheduleStorage, ScheduleStorageError};
