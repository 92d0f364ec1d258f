//! Pure projection from (collection, filter, search) to what is displayed.

use todolist_proto::task::{Category, Task};

use super::FilterKind;

/// Per-bucket badge counts, always over the whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketCounts {
    /// Tasks not completed.
    pub undone: usize,
    /// Tasks in the meeting category.
    pub meeting: usize,
    /// Tasks completed.
    pub completed: usize,
}

impl BucketCounts {
    /// Counts every bucket in one pass.
    #[must_use]
    pub fn tally(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut counts, task| {
            if task.is_completed {
                counts.completed += 1;
            } else {
                counts.undone += 1;
            }
            if task.category == Category::Meeting {
                counts.meeting += 1;
            }
            counts
        })
    }

    /// Count shown next to a filter, `None` for [`FilterKind::All`].
    #[must_use]
    pub const fn for_filter(self, kind: FilterKind) -> Option<usize> {
        match kind {
            FilterKind::All => None,
            FilterKind::Undone => Some(self.undone),
            FilterKind::Meeting => Some(self.meeting),
            FilterKind::Consummation => Some(self.completed),
        }
    }
}

/// The visible part of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visible<'a> {
    /// Tasks to show, in collection order. May be empty when a filter alone
    /// excludes everything.
    Tasks(Vec<&'a Task>),
    /// A non-empty search matched nothing.
    NoSearchResults {
        /// The trimmed search text.
        query: String,
    },
}

impl<'a> Visible<'a> {
    /// The tasks to show; empty for [`Visible::NoSearchResults`].
    #[must_use]
    pub fn tasks(&self) -> &[&'a Task] {
        match self {
            Self::Tasks(tasks) => tasks.as_slice(),
            Self::NoSearchResults { .. } => &[],
        }
    }

    /// Whether nothing is shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks().is_empty()
    }
}

/// Result of projecting a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<'a> {
    /// What to display.
    pub visible: Visible<'a>,
    /// Badge counts.
    pub counts: BucketCounts,
    /// The filter that was applied.
    pub filter: FilterKind,
}

/// Filters, then searches, keeping collection order.
///
/// The search is a case-insensitive substring match on the task text with a
/// trimmed query; an empty query matches everything.
#[must_use]
pub fn project<'a>(tasks: &'a [Task], filter: FilterKind, query: &str) -> Projection<'a> {
    let query = query.trim();
    let needle = query.to_lowercase();

    let visible = tasks
        .iter()
        .filter(|task| filter.matches(task))
        .filter(|task| needle.is_empty() || task.text.to_lowercase().contains(&needle))
        .collect::<Vec<_>>();

    let visible = if visible.is_empty() && !query.is_empty() {
        Visible::NoSearchResults {
            query: query.to_string(),
        }
    } else {
        Visible::Tasks(visible)
    };

    Projection {
        visible,
        counts: BucketCounts::tally(tasks),
        filter,
    }
}
