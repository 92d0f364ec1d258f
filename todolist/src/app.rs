//! Application session: one store and one view, wired together.

use todolist_proto::request::TaskPatch;
use todolist_proto::task::{Task, TaskId};

use crate::service::TaskService;
use crate::tasks::{RemoteStore, StoreError, TaskDraft};
use crate::view::{FilterKind, Projection, ViewState};

/// Main application state.
///
/// Owns the session's [`RemoteStore`] and [`ViewState`]. Presentation reads
/// through [`App::projection`] and mutates only through the methods here.
#[derive(Debug)]
pub struct App<S> {
    store: RemoteStore<S>,
    view: ViewState,
}

impl<S: TaskService> App<S> {
    /// Creates a session over the given service with an empty collection.
    pub fn new(service: S) -> Self {
        Self {
            store: RemoteStore::new(service),
            view: ViewState::new(),
        }
    }

    /// Creates a session and loads the service's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the initial load fails.
    pub async fn start(service: S) -> Result<Self, StoreError> {
        let mut app = Self::new(service);
        app.store.load().await?;
        Ok(app)
    }

    /// Returns the remote-backed store.
    pub const fn store(&self) -> &RemoteStore<S> {
        &self.store
    }

    /// Returns the tasks in display order.
    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    /// Returns the view state.
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    /// Returns what should be displayed right now.
    pub fn projection(&self) -> Projection<'_> {
        self.view.project(self.store.tasks())
    }

    /// Returns the effective filter.
    pub fn active_filter(&self) -> FilterKind {
        self.view.active_filter()
    }

    /// Selects a filter with toggle-off semantics.
    pub fn select_filter(&mut self, kind: FilterKind) -> FilterKind {
        self.view.select_filter(kind)
    }

    /// Returns the search text as typed.
    pub fn search(&self) -> &str {
        self.view.search()
    }

    /// Replaces the search text.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.view.set_search(query);
    }

    /// Clears the search text.
    pub fn clear_search(&mut self) {
        self.view.clear_search();
    }

    /// Opens the composer, keeping any draft already in progress.
    pub fn open_composer(&mut self) -> &mut TaskDraft {
        self.view.open_composer()
    }

    /// Returns the composer draft for editing, if open.
    pub const fn composer_mut(&mut self) -> Option<&mut TaskDraft> {
        self.view.composer_mut()
    }

    /// Closes the composer without saving.
    pub fn close_composer(&mut self) {
        self.view.close_composer();
    }

    /// Saves the composer draft as a new task.
    ///
    /// The composer closes only when a task was created; a blank draft or a
    /// failed call leaves it open with the draft intact. Returns `Ok(None)`
    /// when the composer is closed or the draft is blank.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the service call fails.
    pub async fn save_composer(&mut self) -> Result<Option<Task>, StoreError> {
        let Some(draft) = self.view.composer().cloned() else {
            return Ok(None);
        };
        let created = self.store.create(&draft).await?.cloned();
        if created.is_some() {
            self.view.close_composer();
        }
        Ok(created)
    }

    /// Reloads the whole collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the fetch fails; the collection is kept.
    pub async fn reload(&mut self) -> Result<usize, StoreError> {
        self.store.load().await
    }

    /// Creates a task directly from a draft.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the service call fails.
    pub async fn add(&mut self, draft: &TaskDraft) -> Result<Option<Task>, StoreError> {
        Ok(self.store.create(draft).await?.cloned())
    }

    /// Toggles a task's completion.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the service call fails.
    pub async fn toggle_completion(&mut self, id: &TaskId) -> Result<Task, StoreError> {
        self.store.toggle_completion(id).await
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the service call fails.
    pub async fn delete(&mut self, id: &TaskId) -> Result<(), StoreError> {
        self.store.delete(id).await
    }

    /// Applies a partial update to a task.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the service call fails.
    pub async fn update(
        &mut self,
        id: &TaskId,
        patch: &TaskPatch,
    ) -> Result<Option<Task>, StoreError> {
        self.store.update(id, patch).await
    }

    /// Re-fetches one task from the service.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the fetch fails.
    pub async fn refresh(&mut self, id: &TaskId) -> Result<Task, StoreError> {
        self.store.refresh(id).await
    }
}
