//! Remote-backed task store.
//!
//! Every mutation goes to the [`TaskService`] first; the local collection
//! only changes once the service has confirmed it, using the record the
//! service returned. A failed call leaves the collection exactly as it was.

use todolist_proto::request::TaskPatch;
use todolist_proto::task::{Task, TaskId};

use super::StoreError;
use super::draft::TaskDraft;
use super::store::TaskStore;
use crate::service::{ServiceError, TaskService};

/// A [`TaskStore`] kept in step with a task service.
///
/// Operations take `&mut self`, so at most one is in flight per store.
#[derive(Debug)]
pub struct RemoteStore<S> {
    store: TaskStore,
    service: S,
}

impl<S: TaskService> RemoteStore<S> {
    /// Creates an empty store over the given service.
    pub const fn new(service: S) -> Self {
        Self {
            store: TaskStore::new(),
            service,
        }
    }

    /// Returns the local collection.
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Returns the tasks in display order.
    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    /// Returns the underlying service.
    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Replaces the collection with the service's full task list.
    ///
    /// Records with blank text or an id seen earlier in the list are
    /// skipped. Returns the number of tasks loaded.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Service`] if the fetch fails; the collection is
    /// left unchanged.
    pub async fn load(&mut self) -> Result<usize, StoreError> {
        let tasks = self
            .service
            .fetch_all()
            .await
            .map_err(|e| failed("load", None, e))?;
        let dropped = self.store.replace_all(tasks);
        tracing::info!(
            count = self.store.len(),
            dropped,
            service = %self.service.kind(),
            "loaded tasks"
        );
        Ok(self.store.len())
    }

    /// Creates a task on the service and stores the returned record.
    ///
    /// The record is appended, unless the collection already holds its id,
    /// in which case it replaces that task in place.
    ///
    /// Returns `Ok(None)` without calling the service when the draft's
    /// trimmed text is empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Service`] if the service call fails; nothing is
    /// appended.
    pub async fn create(&mut self, draft: &TaskDraft) -> Result<Option<&Task>, StoreError> {
        let Some(new) = draft.resolve() else {
            return Ok(None);
        };
        let task = self
            .service
            .create(&new.to_request())
            .await
            .map_err(|e| failed("create", None, e))?;
        tracing::debug!(task_id = %task.id, "created task");
        Ok(Some(self.store.upsert(task)))
    }

    /// Toggles completion on the service and adopts the returned record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Service`] if the service call fails, including
    /// when the service does not know the task.
    pub async fn toggle_completion(&mut self, id: &TaskId) -> Result<Task, StoreError> {
        let task = self
            .service
            .toggle(id)
            .await
            .map_err(|e| failed("toggle", Some(id), e))?;
        self.store.replace(task.clone());
        Ok(task)
    }

    /// Deletes a task on the service, then locally.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Service`] if the service call fails; the task
    /// stays in the collection.
    pub async fn delete(&mut self, id: &TaskId) -> Result<(), StoreError> {
        self.service
            .delete(id)
            .await
            .map_err(|e| failed("delete", Some(id), e))?;
        self.store.remove(id);
        Ok(())
    }

    /// Applies a partial update on the service and adopts the result.
    ///
    /// Returns `Ok(None)` without calling the service when the patch's text
    /// trims to nothing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Service`] if the service call fails.
    pub async fn update(
        &mut self,
        id: &TaskId,
        patch: &TaskPatch,
    ) -> Result<Option<Task>, StoreError> {
        if patch.text.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Ok(None);
        }
        let task = self
            .service
            .update(id, patch)
            .await
            .map_err(|e| failed("update", Some(id), e))?;
        self.store.replace(task.clone());
        Ok(Some(task))
    }

    /// Re-fetches one task and adopts the service's record.
    ///
    /// A task the collection does not hold yet is appended.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Service`] if the fetch fails.
    pub async fn refresh(&mut self, id: &TaskId) -> Result<Task, StoreError> {
        let task = self
            .service
            .fetch(id)
            .await
            .map_err(|e| failed("refresh", Some(id), e))?;
        self.store.upsert(task.clone());
        Ok(task)
    }
}

fn failed(operation: &'static str, id: Option<&TaskId>, error: ServiceError) -> StoreError {
    match id {
        Some(id) => tracing::warn!(operation, task_id = %id, error = %error, "task service call failed"),
        None => tracing::warn!(operation, error = %error, "task service call failed"),
    }
    StoreError::Service(error)
}
