//! Reminders with recurrence and in-app delivery scheduling
//!
//! This module provides:
//! - Reminder CRUD with daily/weekly/monthly recurrence rules
//! - Next-occurrence arithmetic
//! - A background scheduler that hands due reminders to a notification sink

pub mod models;
pub mod scheduler;
pub mod storage;

pub use models::*;
pub use scheduler::{LogSink, NotificationSink, ReminderScheduler, SchedulerMessage};
pub use storage::{ReminderStorage, ReminderStorageError};
