//! Grade book for satchel
//!
//! This module provides:
//! - Course management (named collections of graded components)
//! - Component admission with weight/score/uniqueness validation
//! - Weighted grade and GPA band computation

pub mod engine;
pub mod models;
pub mod storage;

pub use engine::{admit_component, gpa_band, weighted_grade, AdmissionError};
pub use models::*;
pub use storage::{GradeBook, GradeBookError};
