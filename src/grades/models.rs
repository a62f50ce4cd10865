//! Data models for the grade book

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single graded item (exam, homework, ...) contributing a weighted
/// share to a course's final grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: Uuid,
    /// Unique within the owning course, case-insensitive
    pub name: String,
    /// Percentage point share, > 0
    pub weight: f64,
    /// Score in [0, 100]; treated as 0 in computations when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Component {
    pub fn new(name: String, weight: f64, score: Option<f64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            weight,
            score,
        }
    }
}

/// A course owning an ordered sequence of graded components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Course {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            components: Vec::new(),
        }
    }
}

/// Raw form input for a new or edited component
///
/// Weight and score arrive as the strings the user typed; numeric parsing
/// and rejection happen at admission, never inside the grade computations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDraft {
    /// Set when editing an existing component, `None` for a new one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub weight: String,
    /// Empty string means no score recorded yet
    #[serde(default)]
    pub score: String,
}

impl ComponentDraft {
    pub fn new(name: impl Into<String>, weight: impl Into<String>, score: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            weight: weight.into(),
            score: score.into(),
        }
    }

    /// Draft an edit of an existing component, identity preserved
    pub fn edit_of(component: &Component) -> Self {
        Self {
            id: Some(component.id),
            name: component.name.clone(),
            weight: component.weight.to_string(),
            score: component.score.map(|s| s.to_string()).unwrap_or_default(),
        }
    }
}
