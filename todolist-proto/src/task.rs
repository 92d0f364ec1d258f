//! The task record as exchanged with the task service.
//!
//! Field names are camelCase on the wire (`isCompleted`, `dueDate`, ...).
//! Missing `priority`/`category`/flag fields fall back to their defaults so
//! that a sparse server record still yields a fully populated [`Task`].

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque task identifier.
///
/// Services assign whatever string they like; locally created tasks get a
/// time-ordered UUID v7.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wraps an identifier received from elsewhere.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a fresh, time-ordered identifier (UUID v7).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl FromStr for TaskId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// Error returned when parsing an unknown enum name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Needs attention first.
    High,
    /// The default.
    #[default]
    Medium,
    /// Can wait.
    Low,
    /// No priority assigned.
    None,
}

impl Priority {
    /// All priorities, most urgent first.
    pub const ALL: [Self; 4] = [Self::High, Self::Medium, Self::Low, Self::None];

    /// Wire name of the priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "priority",
                value: s.to_string(),
                expected: "high, medium, low, none",
            })
    }
}

/// Task category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// The default category, and the one with its own filter bucket.
    #[default]
    Meeting,
    /// Reviews.
    Review,
    /// Marketing work.
    Marketing,
    /// Design projects.
    Design,
    /// Anything else.
    Other,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 5] = [
        Self::Meeting,
        Self::Review,
        Self::Marketing,
        Self::Design,
        Self::Other,
    ];

    /// Wire name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::Review => "review",
            Self::Marketing => "marketing",
            Self::Design => "design",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "category",
                value: s.to_string(),
                expected: "meeting, review, marketing, design, other",
            })
    }
}

/// A task as held by the store and sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, immutable once assigned.
    pub id: TaskId,
    /// Display title, never empty.
    pub text: String,
    /// Completion flag.
    #[serde(default)]
    pub is_completed: bool,
    /// Priority, `medium` when the record omits it.
    #[serde(default)]
    pub priority: Priority,
    /// Category, `meeting` when the record omits it.
    #[serde(default)]
    pub category: Category,
    /// Optional calendar due date.
    #[serde(
        default,
        with = "crate::wire::date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<NaiveDate>,
    /// Optional clock time, independent of `due_date`.
    #[serde(
        default,
        with = "crate::wire::time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_time: Option<NaiveTime>,
    /// Whether the task repeats.
    #[serde(default)]
    pub is_recurring: bool,
}

impl Task {
    /// Creates an open task with default priority and category.
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            is_completed: false,
            priority: Priority::default(),
            category: Category::default(),
            due_date: None,
            due_time: None,
            is_recurring: false,
        }
    }
}
