//! satchel, a local student planner.
//!
//! Four collections over on-device JSON storage: an assignment tracker, a
//! weekly course schedule, a grade book with weighted-grade and GPA band
//! computation, and reminders with recurrence-based delivery scheduling.
//! All validation runs over immutable snapshots before anything is written,
//! so a refused edit never leaves partial state behind.

pub mod assignments;
pub mod grades;
pub mod reminders;
pub mod schedule;
pub mod storage;
