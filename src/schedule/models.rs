//! Course schedule data models and admission rules
//!
//! Times and dates stay in the form the planner has always stored them:
//! `HH:MM` (24-hour) and `DD.MM.YYYY` strings, validated on the way in.

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

const WEEKDAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// A recurring course meeting in the weekly schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub id: Uuid,
    /// Unique across the schedule, case-insensitive
    pub name: String,
    /// `HH:MM`, 24-hour
    pub start_time: String,
    pub end_time: String,
    /// `DD.MM.YYYY`
    pub start_date: String,
    pub end_date: String,
    /// Weekday names, Monday through Friday
    pub days: Vec<String>,
    pub location: String,
}

/// Form input for a new or edited schedule entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub start_date: String,
    pub end_date: String,
    /// Comma-separated weekday names as typed into the form
    pub days: String,
    pub location: String,
}

impl EntryDraft {
    /// Draft an edit of an existing entry, identity preserved
    pub fn edit_of(entry: &ScheduleEntry) -> Self {
        Self {
            id: Some(entry.id),
            name: entry.name.clone(),
            start_time: entry.start_time.clone(),
            end_time: entry.end_time.clone(),
            start_date: entry.start_date.clone(),
            end_date: entry.end_date.clone(),
            days: entry.days.join(", "),
            location: entry.location.clone(),
        }
    }
}

/// Why a schedule entry draft was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Course name is required")]
    NameRequired,

    #[error("Course name must be unique")]
    DuplicateName,

    #[error("Start time must be in HH:MM format (24-hour)")]
    InvalidStartTime,

    #[error("End time must be in HH:MM format (24-hour)")]
    InvalidEndTime,

    #[error("End time must be greater than start time")]
    EndTimeNotAfterStart,

    #[error("Start date must be in DD.MM.YYYY format")]
    InvalidStartDate,

    #[error("End date must be in DD.MM.YYYY format")]
    InvalidEndDate,

    #[error("End date must be greater than start date")]
    EndDateNotAfterStart,

    #[error("Days must be from Monday to Friday only")]
    InvalidDays,

    #[error("Location is required")]
    LocationRequired,
}

/// Parse a `HH:MM` field, checking both shape and that it names a real time
fn parse_time(raw: &str) -> Option<NaiveTime> {
    let re = Regex::new(r"^\d{2}:\d{2}$").ok()?;
    if !re.is_match(raw) {
        return None;
    }
    NaiveTime::parse_from_str(raw, "%H:%M").ok()
}

/// Parse a `DD.MM.YYYY` field, checking shape and calendar validity
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let re = Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").ok()?;
    if !re.is_match(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%d.%m.%Y").ok()
}

/// Validate a draft against the current schedule and construct the
/// admitted entry
pub fn admit_entry(
    existing: &[ScheduleEntry],
    draft: &EntryDraft,
) -> Result<ScheduleEntry, ScheduleError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(ScheduleError::NameRequired);
    }

    let start_time =
        parse_time(draft.start_time.trim()).ok_or(ScheduleError::InvalidStartTime)?;
    let end_time = parse_time(draft.end_time.trim()).ok_or(ScheduleError::InvalidEndTime)?;
    if end_time <= start_time {
        return Err(ScheduleError::EndTimeNotAfterStart);
    }

    let start_date =
        parse_date(draft.start_date.trim()).ok_or(ScheduleError::InvalidStartDate)?;
    let end_date = parse_date(draft.end_date.trim()).ok_or(ScheduleError::InvalidEndDate)?;
    if end_date <= start_date {
        return Err(ScheduleError::EndDateNotAfterStart);
    }

    let days: Vec<String> = draft
        .days
        .split(',')
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .collect();
    if days.is_empty() || days.iter().any(|d| !WEEKDAYS.contains(&d.as_str())) {
        return Err(ScheduleError::InvalidDays);
    }

    let location = draft.location.trim();
    if location.is_empty() {
        return Err(ScheduleError::LocationRequired);
    }

    let name_taken = existing.iter().any(|e| {
        e.name.trim().eq_ignore_ascii_case(name) && draft.id != Some(e.id)
    });
    if name_taken {
        return Err(ScheduleError::DuplicateName);
    }

    Ok(ScheduleEntry {
        id: draft.id.unwrap_or_else(Uuid::new_v4),
        name: name.to_string(),
        start_time: draft.start_time.trim().to_string(),
        end_time: draft.end_time.trim().to_string(),
        start_date: draft.start_date.trim().to_string(),
        end_date: draft.end_date.trim().to_string(),
        days,
        location: location.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> EntryDraft {
        EntryDraft {
            id: None,
            name: "Algorithms".to_string(),
            start_time: "10:00".to_string(),
            end_time: "11:30".to_string(),
            start_date: "01.09.2026".to_string(),
            end_date: "18.12.2026".to_string(),
            days: "Monday, Wednesday".to_string(),
            location: "Room 204".to_string(),
        }
    }

    #[test]
    fn test_admit_valid_entry() {
        let entry = admit_entry(&[], &valid_draft()).unwrap();
        assert_eq!(entry.name, "Algorithms");
        assert_eq!(entry.days, ["Monday", "Wednesday"]);
    }

    #[test]
    fn test_time_format_enforced() {
        let mut draft = valid_draft();
        draft.start_time = "9:00".to_string();
        assert_eq!(admit_entry(&[], &draft), Err(ScheduleError::InvalidStartTime));

        let mut draft = valid_draft();
        draft.end_time = "25:00".to_string();
        assert_eq!(admit_entry(&[], &draft), Err(ScheduleError::InvalidEndTime));
    }

    #[test]
    fn test_end_time_must_follow_start() {
        let mut draft = valid_draft();
        draft.end_time = "10:00".to_string();
        assert_eq!(
            admit_entry(&[], &draft),
            Err(ScheduleError::EndTimeNotAfterStart)
        );

        draft.end_time = "09:30".to_string();
        assert_eq!(
            admit_entry(&[], &draft),
            Err(ScheduleError::EndTimeNotAfterStart)
        );
    }

    #[test]
    fn test_date_format_and_calendar_validity() {
        let mut draft = valid_draft();
        draft.start_date = "2026-09-01".to_string();
        assert_eq!(admit_entry(&[], &draft), Err(ScheduleError::InvalidStartDate));

        let mut draft = valid_draft();
        draft.end_date = "31.02.2026".to_string();
        assert_eq!(admit_entry(&[], &draft), Err(ScheduleError::InvalidEndDate));
    }

    #[test]
    fn test_end_date_must_follow_start() {
        let mut draft = valid_draft();
        draft.end_date = draft.start_date.clone();
        assert_eq!(
            admit_entry(&[], &draft),
            Err(ScheduleError::EndDateNotAfterStart)
        );
    }

    #[test]
    fn test_days_restricted_to_weekdays() {
        let mut draft = valid_draft();
        draft.days = "Monday, Saturday".to_string();
        assert_eq!(admit_entry(&[], &draft), Err(ScheduleError::InvalidDays));

        draft.days = "".to_string();
        assert_eq!(admit_entry(&[], &draft), Err(ScheduleError::InvalidDays));
    }

    #[test]
    fn test_location_required() {
        let mut draft = valid_draft();
        draft.location = "  ".to_string();
        assert_eq!(admit_entry(&[], &draft), Err(ScheduleError::LocationRequired));
    }

    #[test]
    fn test_duplicate_name_excludes_own_id() {
        let entry = admit_entry(&[], &valid_draft()).unwrap();

        let mut dup = valid_draft();
        dup.name = "ALGORITHMS".to_string();
        assert_eq!(
            admit_entry(std::slice::from_ref(&entry), &dup),
            Err(ScheduleError::DuplicateName)
        );

        // An edit keeping its own name is fine
        let mut edit = EntryDraft::edit_of(&entry);
        edit.location = "Room 101".to_string();
        let updated = admit_entry(std::slice::from_ref(&entry), &edit).unwrap();
        assert_eq!(updated.id, entry.id);
        assert_eq!(updated.location, "Room 101");
    }
}
