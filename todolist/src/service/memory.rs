//! In-process task service.
//!
//! Serves the offline demo mode and tests. State lives in a [`TaskStore`]
//! behind a `parking_lot` mutex that is never held across an `.await`.
//! Failures can be injected with [`MemoryTaskService::set_offline`] and
//! [`MemoryTaskService::reject_next`].

use parking_lot::Mutex;
use todolist_proto::request::{CreateTaskRequest, TaskPatch};
use todolist_proto::task::{Task, TaskId};

use super::{ServiceError, ServiceKind, TaskService};
use crate::tasks::{TaskDraft, TaskStore};

#[derive(Debug, Default)]
struct MemoryState {
    store: TaskStore,
    offline: bool,
    reject_next: Option<String>,
    calls: usize,
}

impl MemoryState {
    /// Counts the call and applies any injected failure.
    fn admit(&mut self) -> Result<(), ServiceError> {
        self.calls += 1;
        if self.offline {
            return Err(ServiceError::Unavailable);
        }
        if let Some(message) = self.reject_next.take() {
            return Err(ServiceError::Rejected {
                message,
                detail: None,
            });
        }
        Ok(())
    }
}

/// Task service holding its collection in memory.
#[derive(Debug, Default)]
pub struct MemoryTaskService {
    state: Mutex<MemoryState>,
}

impl MemoryTaskService {
    /// Creates an empty service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service pre-loaded with the demo seed set.
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_tasks(TaskStore::seeded().tasks().to_vec())
    }

    /// Creates a service holding the given tasks.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let service = Self::new();
        service.state.lock().store.replace_all(tasks);
        service
    }

    /// Makes every subsequent call fail with [`ServiceError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().offline = offline;
    }

    /// Makes the next call fail with [`ServiceError::Rejected`].
    pub fn reject_next(&self, message: impl Into<String>) {
        self.state.lock().reject_next = Some(message.into());
    }

    /// Number of calls received so far, failed ones included.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state.lock().calls
    }

    /// Snapshot of the service-side collection.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Task> {
        self.state.lock().store.tasks().to_vec()
    }
}

impl TaskService for MemoryTaskService {
    async fn fetch_all(&self) -> Result<Vec<Task>, ServiceError> {
        let mut state = self.state.lock();
        state.admit()?;
        Ok(state.store.tasks().to_vec())
    }

    async fn fetch(&self, id: &TaskId) -> Result<Task, ServiceError> {
        let mut state = self.state.lock();
        state.admit()?;
        state
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(id.clone()))
    }

    async fn create(&self, request: &CreateTaskRequest) -> Result<Task, ServiceError> {
        let mut state = self.state.lock();
        state.admit()?;
        let new = TaskDraft::from(request.clone())
            .resolve()
            .ok_or_else(|| ServiceError::Rejected {
                message: "Task text is required".to_string(),
                detail: None,
            })?;
        let task = new.into_task(TaskId::generate());
        Ok(state.store.append(task).clone())
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task, ServiceError> {
        let mut state = self.state.lock();
        state.admit()?;
        if state.store.get(id).is_none() {
            return Err(ServiceError::NotFound(id.clone()));
        }
        state
            .store
            .update(id, patch)
            .cloned()
            .ok_or_else(|| ServiceError::Rejected {
                message: "Task text cannot be empty".to_string(),
                detail: None,
            })
    }

    async fn delete(&self, id: &TaskId) -> Result<(), ServiceError> {
        let mut state = self.state.lock();
        state.admit()?;
        state
            .store
            .delete(id)
            .map(drop)
            .ok_or_else(|| ServiceError::NotFound(id.clone()))
    }

    async fn toggle(&self, id: &TaskId) -> Result<Task, ServiceError> {
        let mut state = self.state.lock();
        state.admit()?;
        state
            .store
            .toggle_completion(id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(id.clone()))
    }

    fn kind(&self) -> ServiceKind {
        ServiceKind::Memory
    }
}
