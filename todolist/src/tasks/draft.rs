//! Task drafts and the single place where creation defaults are applied.

use chrono::{NaiveDate, NaiveTime};
use todolist_proto::request::CreateTaskRequest;
use todolist_proto::task::{Category, Priority, Task, TaskId};

/// What the user has typed into the composer so far.
///
/// Every field except `text` is optional; [`TaskDraft::resolve`] fills in
/// the defaults (priority `medium`, category `meeting`, not recurring).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Task title as typed (untrimmed).
    pub text: String,
    /// Chosen priority, if any.
    pub priority: Option<Priority>,
    /// Chosen category, if any.
    pub category: Option<Category>,
    /// Chosen due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Chosen due time, if any.
    pub due_time: Option<NaiveTime>,
    /// Recurring toggle, if touched.
    pub is_recurring: Option<bool>,
}

impl TaskDraft {
    /// Starts a draft with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the category.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Sets the due time.
    #[must_use]
    pub const fn with_due_time(mut self, time: NaiveTime) -> Self {
        self.due_time = Some(time);
        self
    }

    /// Sets the recurring flag.
    #[must_use]
    pub const fn recurring(mut self, is_recurring: bool) -> Self {
        self.is_recurring = Some(is_recurring);
        self
    }

    /// Applies defaults and validates the text.
    ///
    /// Returns `None` when the trimmed text is empty; such a draft must not
    /// produce a task.
    #[must_use]
    pub fn resolve(&self) -> Option<NewTask> {
        let text = self.text.trim();
        if text.is_empty() {
            return None;
        }
        Some(NewTask {
            text: text.to_string(),
            priority: self.priority.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            due_date: self.due_date,
            due_time: self.due_time,
            is_recurring: self.is_recurring.unwrap_or(false),
        })
    }
}

impl From<CreateTaskRequest> for TaskDraft {
    fn from(req: CreateTaskRequest) -> Self {
        Self {
            text: req.text,
            priority: req.priority,
            category: req.category,
            due_date: req.due_date,
            due_time: req.due_time,
            is_recurring: req.is_recurring,
        }
    }
}

/// A validated draft with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Trimmed, non-empty title.
    pub text: String,
    /// Resolved priority.
    pub priority: Priority,
    /// Resolved category.
    pub category: Category,
    /// Due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Due time, if any.
    pub due_time: Option<NaiveTime>,
    /// Resolved recurring flag.
    pub is_recurring: bool,
}

impl NewTask {
    /// Materializes the task under the given id, not yet completed.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            text: self.text,
            is_completed: false,
            priority: self.priority,
            category: self.category,
            due_date: self.due_date,
            due_time: self.due_time,
            is_recurring: self.is_recurring,
        }
    }

    /// Builds the create-task body, sending every resolved field explicitly.
    #[must_use]
    pub fn to_request(&self) -> CreateTaskRequest {
        CreateTaskRequest {
            text: self.text.clone(),
            priority: Some(self.priority),
            category: Some(self.category),
            due_date: self.due_date,
            due_time: self.due_time,
            is_recurring: Some(self.is_recurring),
        }
    }
}
