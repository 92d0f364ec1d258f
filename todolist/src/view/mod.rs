//! Transient presentation state and the view projection.
//!
//! [`ViewState`] holds what the user is looking at (the active filter, the
//! search text, the composer draft). It never owns tasks; [`project`] reads
//! the store's collection through it.

pub mod projection;

pub use projection::{BucketCounts, Projection, Visible, project};

use std::fmt;
use std::str::FromStr;

use todolist_proto::task::{Category, Task};

use crate::tasks::TaskDraft;

/// The bucket a filter restricts the list to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterKind {
    /// No constraint.
    #[default]
    All,
    /// Tasks not yet completed.
    Undone,
    /// Tasks in the meeting category.
    Meeting,
    /// Completed tasks.
    Consummation,
}

impl FilterKind {
    /// All filters in display order.
    pub const ALL: [Self; 4] = [Self::All, Self::Undone, Self::Meeting, Self::Consummation];

    /// Wire/CLI name of the filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Undone => "undone",
            Self::Meeting => "meeting",
            Self::Consummation => "consummation",
        }
    }

    /// Display name for the filter indicator.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Undone => "Undone",
            Self::Meeting => "Meetings",
            Self::Consummation => "Completed",
        }
    }

    /// Whether a task belongs to this filter's bucket.
    #[must_use]
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Undone => !task.is_completed,
            Self::Meeting => task.category == Category::Meeting,
            Self::Consummation => task.is_completed,
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a filter name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter {0:?} (expected all, undone, meeting or completed)")]
pub struct ParseFilterError(String);

impl FromStr for FilterKind {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "undone" => Ok(Self::Undone),
            "meeting" | "meetings" => Ok(Self::Meeting),
            "consummation" | "completed" | "done" => Ok(Self::Consummation),
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}

/// View-only state for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// At most one active filter; `None` means all.
    filter: Option<FilterKind>,
    /// Raw search text as typed.
    search: String,
    /// Draft being composed, present while the composer is open.
    composer: Option<TaskDraft>,
}

impl ViewState {
    /// Creates a view with no filter, no search and the composer closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the effective filter.
    #[must_use]
    pub fn active_filter(&self) -> FilterKind {
        self.filter.unwrap_or_default()
    }

    /// Selects a filter and returns the one now in effect.
    ///
    /// Selecting the active filter again clears it, and selecting
    /// [`FilterKind::All`] always clears.
    pub fn select_filter(&mut self, kind: FilterKind) -> FilterKind {
        self.filter = match (self.filter, kind) {
            (_, FilterKind::All) => None,
            (Some(active), _) if active == kind => None,
            _ => Some(kind),
        };
        self.active_filter()
    }

    /// Clears the filter back to all.
    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    /// Returns the search text as typed.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Replaces the search text.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Clears the search text.
    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Whether the composer is open.
    #[must_use]
    pub const fn is_composer_open(&self) -> bool {
        self.composer.is_some()
    }

    /// Opens the composer, keeping a draft already in progress.
    pub fn open_composer(&mut self) -> &mut TaskDraft {
        self.composer.get_or_insert_with(TaskDraft::default)
    }

    /// Closes the composer and discards its draft.
    pub fn close_composer(&mut self) {
        self.composer = None;
    }

    /// Returns the draft in progress, if the composer is open.
    #[must_use]
    pub const fn composer(&self) -> Option<&TaskDraft> {
        self.composer.as_ref()
    }

    /// Returns the draft in progress for editing.
    pub const fn composer_mut(&mut self) -> Option<&mut TaskDraft> {
        self.composer.as_mut()
    }

    /// Closes the composer and hands back its draft.
    pub const fn take_composer(&mut self) -> Option<TaskDraft> {
        self.composer.take()
    }

    /// Projects a collection through this view.
    #[must_use]
    pub fn project<'a>(&self, tasks: &'a [Task]) -> Projection<'a> {
        project(tasks, self.active_filter(), &self.search)
    }
}
