//! Request bodies for the create-task and update-task operations.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::task::{Category, Priority, Task};

/// Body of `POST /tasks`.
///
/// Only `text` is required; the service fills in the rest and assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Task title.
    pub text: String,
    /// Optional priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Optional category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Optional due date.
    #[serde(
        default,
        with = "crate::wire::date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<NaiveDate>,
    /// Optional due time.
    #[serde(
        default,
        with = "crate::wire::time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_time: Option<NaiveTime>,
    /// Optional recurring flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
}

/// Body of `PUT /tasks/{id}`: a partial update.
///
/// `None` leaves a field untouched. For the due date and time,
/// `Some(None)` clears the value and is sent as an explicit `null`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::option_option)]
pub struct TaskPatch {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// New completion flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    /// New priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// New category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// New due date, or `Some(None)` to clear it.
    #[serde(
        default,
        with = "crate::wire::date::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Option<NaiveDate>>,
    /// New due time, or `Some(None)` to clear it.
    #[serde(
        default,
        with = "crate::wire::time::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_time: Option<Option<NaiveTime>>,
    /// New recurring flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
}

impl TaskPatch {
    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the patch to a task in place.
    ///
    /// Text is stored trimmed. Callers are expected to have rejected a
    /// patch whose text trims to nothing.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(text) = &self.text {
            task.text = text.trim().to_string();
        }
        if let Some(is_completed) = self.is_completed {
            task.is_completed = is_completed;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(category) = self.category {
            task.category = category;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(due_time) = self.due_time {
            task.due_time = due_time;
        }
        if let Some(is_recurring) = self.is_recurring {
            task.is_recurring = is_recurring;
        }
    }
}
