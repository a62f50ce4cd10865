use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Context, Result};

use satchel_lib::assignments::{Assignment, AssignmentStorage};
use satchel_lib::grades::{Course, GradeBook};
use satchel_lib::reminders::{Reminder, ReminderStorage};
use satchel_lib::schedule::{ScheduleEntry, ScheduleStorage};
use satchel_lib::storage;

/// Shared application state for CLI commands
pub struct App {
    pub grade_book: GradeBook,
    pub assignments: AssignmentStorage,
    pub schedule: ScheduleStorage,
    pub reminders: Arc<Mutex<ReminderStorage>>,
}

impl App {
    /// Initialize from the default data directory, or an explicit override
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => storage::default_data_dir().context("Failed to get data directory")?,
        };

        Ok(Self {
            grade_book: GradeBook::new(data_dir.clone())
                .context("Failed to initialize grade book")?,
            assignments: AssignmentStorage::new(data_dir.clone())
                .context("Failed to initialize assignment storage")?,
            schedule: ScheduleStorage::new(data_dir.clone())
                .context("Failed to initialize schedule storage")?,
            reminders: Arc::new(Mutex::new(
                ReminderStorage::new(data_dir).context("Failed to initialize reminder storage")?,
            )),
        })
    }

    /// Find a course by name (case-insensitive prefix match)
    pub fn find_course(&self, name: &str) -> Result<Course> {
        let courses = self.grade_book.list_courses().context("Failed to list courses")?;
        resolve("course", name, courses, |c| &c.name)
    }

    /// Find an assignment by title (case-insensitive prefix match)
    pub fn find_assignment(&self, title: &str) -> Result<Assignment> {
        let assignments = self.assignments.list().context("Failed to list assignments")?;
        resolve("assignment", title, assignments, |a| &a.title)
    }

    /// Find a schedule entry by course name (case-insensitive prefix match)
    pub fn find_entry(&self, name: &str) -> Result<ScheduleEntry> {
        let entries = self.schedule.list().context("Failed to list schedule")?;
        resolve("schedule entry", name, entries, |e| &e.name)
    }

    /// Find a reminder by title (case-insensitive prefix match)
    pub fn find_reminder(&self, title: &str) -> Result<Reminder> {
        let reminders = self
            .reminders
            .lock()
            .map_err(|_| anyhow::anyhow!("Reminder storage lock poisoned"))?
            .list()
            .context("Failed to list reminders")?;
        resolve("reminder", title, reminders, |r| &r.title)
    }
}

/// Resolve a name against a collection: exact match first, then unique
/// case-insensitive prefix
fn resolve<T: Clone>(
    kind: &str,
    name: &str,
    items: Vec<T>,
    label: impl Fn(&T) -> &str,
) -> Result<T> {
    let name_lower = name.to_lowercase();

    if let Some(item) = items.iter().find(|i| label(i).to_lowercase() == name_lower) {
        return Ok(item.clone());
    }

    let matches: Vec<&T> = items
        .iter()
        .filter(|i| label(i).to_lowercase().starts_with(&name_lower))
        .collect();

    match matches.len() {
        0 => bail!(
            "No {} matching '{}'. Available:\n{}",
            kind,
            name,
            items
                .iter()
                .map(|i| format!("  - {}", label(i)))
                .collect::<Vec<_>>()
                .join("\n")
        ),
        1 => Ok(matches[0].clone()),
        _ => bail!(
            "Ambiguous {} name '{}'. Matches:\n{}",
            kind,
            name,
            matches
                .iter()
                .map(|i| format!("  - {}", label(i)))
                .collect::<Vec<_>>()
                .join("\n")
        ),
    }
}
