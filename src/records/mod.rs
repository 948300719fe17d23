//! # Record Types
//!
//! Row shapes for the four tables this surface touches: codes, exercises,
//! cases, and lessons. Rows are only ever inserted and read, never updated
//! or deleted.

mod ids;

pub use ids::{access_code, record_id};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Table names in the external row store.
pub mod tables {
    pub const CODES: &str = "codes";
    pub const EXERCISES: &str = "exercises";
    pub const CASES: &str = "cases";
    pub const LESSONS: &str = "lessons";
}

/// Id prefixes per table.
pub mod prefixes {
    pub const EXERCISE: &str = "ex";
    pub const CASE: &str = "case";
    pub const LESSON: &str = "ls";
    /// Display prefix for exercise access codes.
    pub const EXERCISE_CODE: &str = "EX";
}

/// What a code points at.
///
/// Codes carry a `type` + `target_id` pair referencing either an exercise or
/// a lesson. Modeled as an enum so both variants are handled exhaustively
/// wherever a code is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeTarget {
    Exercise,
    Lesson,
}

impl CodeTarget {
    /// The table this target lives in.
    pub fn table(&self) -> &'static str {
        match self {
            CodeTarget::Exercise => tables::EXERCISES,
            CodeTarget::Lesson => tables::LESSONS,
        }
    }

    /// The wire value stored in the `type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeTarget::Exercise => "exercise",
            CodeTarget::Lesson => "lesson",
        }
    }
}

/// An access code row. The id is the shareable display string itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Code {
    pub id: String,
    #[serde(rename = "type")]
    pub target: CodeTarget,
    pub target_id: String,
    pub created_at: DateTime<Utc>,
}

impl Code {
    /// Mint a new code pointing at an exercise.
    pub fn for_exercise(target_id: impl Into<String>) -> Self {
        Self {
            id: access_code(prefixes::EXERCISE_CODE),
            target: CodeTarget::Exercise,
            target_id: target_id.into(),
            created_at: Utc::now(),
        }
    }
}

/// A scenario record, created together with exactly one exercise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    pub id: String,
    pub role: String,
    pub background: String,
    pub goals: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Case {
    pub fn new(role: impl Into<String>, background: impl Into<String>, goals: Option<String>) -> Self {
        Self {
            id: record_id(prefixes::CASE),
            role: role.into(),
            background: background.into(),
            goals,
            created_at: Utc::now(),
        }
    }
}

/// An exercise row.
///
/// The older content-creation path writes exercises without a case and with
/// `focus_area`/`lesson_id` columns instead; `extra` passes those through
/// unchanged on read paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub case_id: Option<String>,
    #[serde(default)]
    pub protocols: Vec<String>,
    #[serde(default)]
    pub toggles: Map<String, Value>,
    #[serde(default)]
    pub focus_hint: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A lesson row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl Lesson {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: record_id(prefixes::LESSON),
            title: title.into(),
            created_at: Utc::now(),
        }
    }
}
