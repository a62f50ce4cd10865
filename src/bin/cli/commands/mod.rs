pub mod assignments;
pub mod courses;
pub mod reminders;
pub mod schedule;
