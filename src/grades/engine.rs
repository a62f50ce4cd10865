//! Grade computation and component admission
//!
//! Pure functions over course snapshots: the storage layer applies whatever
//! these return, so no partial state is ever produced on a failed admission.
//!
//! The two grade computations intentionally normalize differently:
//! `weighted_grade` divides each term by 100, `gpa_band` divides once at the
//! end. Both degrade to 0 for a zero-weight course instead of failing.

use thiserror::Error;

use super::models::{Component, ComponentDraft, Course};

/// Why a candidate component was refused admission to a course
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("Component name is required")]
    NameRequired,

    #[error("Weight must be a positive number")]
    InvalidWeight,

    #[error("Score must be a number between 0 and 100")]
    InvalidScore,

    #[error("Component name must be unique within the course")]
    DuplicateName,

    #[error("Total weight of components cannot exceed 100%")]
    WeightOverflow,
}

/// Weighted percentage grade for a course
///
/// Unbounded above 100 if scores exceed 100; admission validates scores to
/// [0, 100] so that only happens for data written by other means.
pub fn weighted_grade(components: &[Component]) -> f64 {
    let mut total_weight = 0.0;
    let mut weighted_sum = 0.0;

    for component in components {
        let weight = component.weight;
        let score = component.score.unwrap_or(0.0);
        total_weight += weight;
        weighted_sum += (weight * score) / 100.0;
    }

    // A course with no weighted components has no meaningful average
    if total_weight == 0.0 {
        return 0.0;
    }
    (weighted_sum / total_weight) * 100.0
}

/// Discrete GPA band on a 10-point scale
///
/// Returns 0 for a zero-weight course, otherwise 5-10 via descending
/// thresholds. There is deliberately no 0-4 band: any non-empty weighted
/// set floors at 5.
pub fn gpa_band(components: &[Component]) -> u8 {
    let total_weight: f64 = components.iter().map(|c| c.weight).sum();
    let weighted_sum: f64 = components
        .iter()
        .map(|c| c.weight * c.score.unwrap_or(0.0))
        .sum();

    if total_weight == 0.0 {
        return 0;
    }

    let percentage = weighted_sum / total_weight;

    if percentage >= 90.0 {
        10
    } else if percentage >= 80.0 {
        9
    } else if percentage >= 70.0 {
        8
    } else if percentage >= 60.0 {
        7
    } else if percentage >= 50.0 {
        6
    } else {
        5
    }
}

/// Validate a candidate component against a course and construct the
/// admitted component
///
/// Checks run in order and stop at the first violation. On success the
/// returned component carries a fresh id for a new draft, or the draft's
/// own id for an edit, ready to replace/append into the course.
pub fn admit_component(
    course: &Course,
    draft: &ComponentDraft,
) -> Result<Component, AdmissionError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(AdmissionError::NameRequired);
    }

    let weight = match draft.weight.trim().parse::<f64>() {
        Ok(w) if w > 0.0 => w,
        _ => return Err(AdmissionError::InvalidWeight),
    };

    let score_raw = draft.score.trim();
    let score = if score_raw.is_empty() {
        None
    } else {
        match score_raw.parse::<f64>() {
            Ok(s) if (0.0..=100.0).contains(&s) => Some(s),
            _ => return Err(AdmissionError::InvalidScore),
        }
    };

    // Uniqueness and weight total both exclude the component being edited
    let name_taken = course.components.iter().any(|c| {
        c.name.eq_ignore_ascii_case(name) && draft.id != Some(c.id)
    });
    if name_taken {
        return Err(AdmissionError::DuplicateName);
    }

    let other_weight: f64 = course
        .components
        .iter()
        .filter(|c| draft.id != Some(c.id))
        .map(|c| c.weight)
        .sum();
    if other_weight + weight > 100.0 {
        return Err(AdmissionError::WeightOverflow);
    }

    Ok(Component {
        id: draft.id.unwrap_or_else(uuid::Uuid::new_v4),
        name: name.to_string(),
        weight,
        score,
    })
}
