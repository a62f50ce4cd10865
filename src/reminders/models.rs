//! Reminder data models and recurrence arithmetic

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// How often a reminder repeats after firing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    /// The next occurrence strictly after the given instant, keeping the
    /// time of day
    ///
    /// Monthly recurrence skips months that lack the day (a reminder on the
    /// 31st next fires in the next month that has a 31st).
    pub fn next_occurrence(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Recurrence::None => None,
            Recurrence::Daily => Some(after + Duration::days(1)),
            Recurrence::Weekly => Some(after + Duration::days(7)),
            Recurrence::Monthly => {
                let mut year = after.year();
                let mut month = after.month();
                let day = after.day();

                for _ in 0..12 {
                    month += 1;
                    if month > 12 {
                        month = 1;
                        year += 1;
                    }
                    if let Some(date) = chrono::NaiveDate::from_ymd_opt(year, month, day) {
                        let datetime = date.and_hms_opt(
                            after.hour(),
                            after.minute(),
                            after.second(),
                        )?;
                        return Utc.from_local_datetime(&datetime).single();
                    }
                }
                None
            }
        }
    }
}

/// A reminder with an optional recurrence rule
///
/// Actual notification delivery belongs to the platform; the planner only
/// decides when a reminder is due and hands it to a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub completed: bool,
}

impl Reminder {
    /// Whether the reminder should fire at or before the given instant
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.date <= now
    }
}

/// Form input for a new or edited reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub recurrence: Recurrence,
}

impl ReminderDraft {
    pub fn new(title: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: title.into(),
            body: None,
            date,
            recurrence: Recurrence::default(),
        }
    }

    /// Draft an edit of an existing reminder, identity preserved
    pub fn edit_of(reminder: &Reminder) -> Self {
        Self {
            id: Some(reminder.id),
            title: reminder.title.clone(),
            body: reminder.body.clone(),
            date: reminder.date,
            recurrence: reminder.recurrence,
        }
    }
}

/// Why a reminder draft was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReminderError {
    #[error("Title and date are required")]
    TitleRequired,
}

/// Validate a draft and construct the admitted reminder
///
/// Editing a reminder resets its completed flag, matching the planner's
/// behavior of rescheduling a reminder when it is changed.
pub fn admit_reminder(draft: &ReminderDraft) -> Result<Reminder, ReminderError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(ReminderError::TitleRequired);
    }

    Ok(Reminder {
        id: draft.id.unwrap_or_else(Uuid::new_v4),
        title: title.to_string(),
        body: draft.body.clone(),
        date: draft.date,
        recurrence: draft.recurrence,
        completed: false,
    })
}
