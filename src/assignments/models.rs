//! Assignment tracker data models and admission rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Priority of an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

/// A tracked assignment for some course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: Uuid,
    /// Unique across all assignments, case-insensitive
    pub title: String,
    pub course: String,
    pub due_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
}

/// Form input for a new or edited assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    pub course: String,
    pub due_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
}

impl AssignmentDraft {
    pub fn new(title: impl Into<String>, course: impl Into<String>, due_date: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: title.into(),
            course: course.into(),
            due_date,
            description: None,
            completed: false,
            priority: Priority::default(),
        }
    }

    /// Draft an edit of an existing assignment, identity preserved
    pub fn edit_of(assignment: &Assignment) -> Self {
        Self {
            id: Some(assignment.id),
            title: assignment.title.clone(),
            course: assignment.course.clone(),
            due_date: assignment.due_date,
            description: assignment.description.clone(),
            completed: assignment.completed,
            priority: assignment.priority,
        }
    }
}

/// Why an assignment draft was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("Title is required")]
    TitleRequired,

    #[error("Title must be unique")]
    DuplicateTitle,

    #[error("Course is required")]
    CourseRequired,
}

/// Validate a draft against the current assignment list and construct the
/// admitted assignment
///
/// Pure over the snapshot passed in; the uniqueness check excludes the
/// draft's own id so an edit may keep its title.
pub fn admit_assignment(
    existing: &[Assignment],
    draft: &AssignmentDraft,
) -> Result<Assignment, AssignmentError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(AssignmentError::TitleRequired);
    }

    let title_taken = existing.iter().any(|a| {
        a.title.eq_ignore_ascii_case(title) && draft.id != Some(a.id)
    });
    if title_taken {
        return Err(AssignmentError::DuplicateTitle);
    }

    let course = draft.course.trim();
    if course.is_empty() {
        return Err(AssignmentError::CourseRequired);
    }

    Ok(Assignment {
        id: draft.id.unwrap_or_else(Uuid::new_v4),
        title: title.to_string(),
        course: course.to_string(),
        due_date: draft.due_date,
        description: draft.description.clone(),
        completed: draft.completed,
        priority: draft.priority,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn due(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_admit_new_assignment() {
        let draft = AssignmentDraft::new("Problem set 1", "Algorithms", due(10));
        let admitted = admit_assignment(&[], &draft).unwrap();
        assert_eq!(admitted.title, "Problem set 1");
        assert_eq!(admitted.priority, Priority::Medium);
        assert!(!admitted.completed);
    }

    #[test]
    fn test_admit_requires_title_and_course() {
        let mut draft = AssignmentDraft::new("  ", "Algorithms", due(10));
        assert_eq!(admit_assignment(&[], &draft), Err(AssignmentError::TitleRequired));

        draft.title = "Problem set 1".to_string();
        draft.course = "".to_string();
        assert_eq!(admit_assignment(&[], &draft), Err(AssignmentError::CourseRequired));
    }

    #[test]
    fn test_admit_rejects_duplicate_title_case_insensitive() {
        let first = admit_assignment(
            &[],
            &AssignmentDraft::new("Problem set 1", "Algorithms", due(10)),
        )
        .unwrap();

        let draft = AssignmentDraft::new("PROBLEM SET 1", "Databases", due(12));
        assert_eq!(
            admit_assignment(std::slice::from_ref(&first), &draft),
            Err(AssignmentError::DuplicateTitle)
        );
    }

    #[test]
    fn test_edit_keeps_own_title() {
        let existing = admit_assignment(
            &[],
            &AssignmentDraft::new("Problem set 1", "Algorithms", due(10)),
        )
        .unwrap();

        let mut edit = AssignmentDraft::edit_of(&existing);
        edit.due_date = due(14);
        let admitted = admit_assignment(std::slice::from_ref(&existing), &edit).unwrap();
        assert_eq!(admitted.id, existing.id);
        assert_eq!(admitted.due_date, due(14));
    }
}
