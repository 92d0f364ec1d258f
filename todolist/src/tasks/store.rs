//! Local task store: the canonical ordered collection for a session.

use std::collections::HashSet;

use todolist_proto::request::TaskPatch;
use todolist_proto::task::{Category, Priority, Task, TaskId};

use super::draft::TaskDraft;

/// Ordered task collection with purely local mutations.
///
/// Insertion order is display order. Mutations on an unknown id are silent
/// no-ops and return `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Creates a store holding the demo seed set.
    #[must_use]
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.load_seed();
        store
    }

    /// Replaces the whole collection with the demo seed set.
    pub fn load_seed(&mut self) {
        self.replace_all(seed_tasks());
    }

    /// Replaces the whole collection.
    ///
    /// Records with blank text are dropped, as is any record whose id was
    /// already seen earlier in `tasks`. Returns the number dropped.
    pub fn replace_all(&mut self, tasks: Vec<Task>) -> usize {
        let total = tasks.len();
        let mut seen = HashSet::with_capacity(total);
        let mut kept = Vec::with_capacity(total);
        for task in tasks {
            if task.text.trim().is_empty() {
                tracing::warn!(task_id = %task.id, "dropping task with blank text");
            } else if !seen.insert(task.id.clone()) {
                tracing::warn!(task_id = %task.id, "dropping task with duplicate id");
            } else {
                kept.push(task);
            }
        }
        self.tasks = kept;
        total - self.tasks.len()
    }

    /// Returns the tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == *id)
    }

    /// Number of tasks held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if the store holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Creates a task from a draft under a freshly generated id.
    ///
    /// Returns `None` and leaves the collection untouched when the draft's
    /// trimmed text is empty.
    pub fn create(&mut self, draft: &TaskDraft) -> Option<&Task> {
        let task = draft.resolve()?.into_task(TaskId::generate());
        tracing::debug!(task_id = %task.id, "created task locally");
        Some(self.append(task))
    }

    /// Flips the completion flag of a task.
    pub fn toggle_completion(&mut self, id: &TaskId) -> Option<&Task> {
        let task = self.get_mut(id)?;
        task.is_completed = !task.is_completed;
        Some(&*task)
    }

    /// Removes a task and returns it.
    pub fn delete(&mut self, id: &TaskId) -> Option<Task> {
        self.remove(id)
    }

    /// Applies a partial update to a task.
    ///
    /// A patch whose text trims to nothing is declined as a whole.
    pub fn update(&mut self, id: &TaskId, patch: &TaskPatch) -> Option<&Task> {
        if patch.text.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return None;
        }
        let task = self.get_mut(id)?;
        patch.apply_to(task);
        Some(&*task)
    }

    /// Appends a task at the end of the collection.
    pub fn append(&mut self, task: Task) -> &Task {
        self.tasks.push(task);
        let last = self.tasks.len() - 1;
        &self.tasks[last]
    }

    /// Stores a task under its id: replaces the record in place if the id is
    /// already held, appends it otherwise.
    pub fn upsert(&mut self, task: Task) -> &Task {
        match self.tasks.iter().position(|t| t.id == task.id) {
            Some(index) => {
                self.tasks[index] = task;
                &self.tasks[index]
            }
            None => self.append(task),
        }
    }

    /// Replaces the task with the same id, keeping its position.
    ///
    /// Returns `None` if no task carries that id.
    pub fn replace(&mut self, task: Task) -> Option<&Task> {
        let slot = self.get_mut(&task.id)?;
        *slot = task;
        Some(&*slot)
    }

    /// Removes a task, preserving the order of the rest.
    pub fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == *id)?;
        Some(self.tasks.remove(index))
    }

    fn get_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == *id)
    }
}

/// The fixed demo collection shown in offline mode.
fn seed_tasks() -> Vec<Task> {
    let mut review = Task::new(TaskId::new("3"), "Review the release checklist");
    review.category = Category::Review;
    review.priority = Priority::High;

    let mut launch = Task::new(TaskId::new("4"), "Draft the launch newsletter");
    launch.category = Category::Marketing;
    launch.priority = Priority::Low;
    launch.is_completed = true;

    let mut sketch = Task::new(TaskId::new("5"), "Sketch the settings screen");
    sketch.category = Category::Design;

    vec![
        Task::new(TaskId::new("1"), "Wake Up"),
        Task::new(TaskId::new("2"), "Wipe off the table"),
        review,
        launch,
        sketch,
    ]
}
