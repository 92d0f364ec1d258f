//! The session's task collection.
//!
//! [`TaskStore`] owns the ordered collection and applies mutations locally.
//! [`RemoteStore`] wraps one and reconciles it with a [`TaskService`], so
//! the collection only changes after the service confirms a mutation.
//!
//! [`TaskService`]: crate::service::TaskService

pub mod draft;
pub mod remote;
pub mod store;

pub use draft::{NewTask, TaskDraft};
pub use remote::RemoteStore;
pub use store::TaskStore;

use thiserror::Error;

use crate::service::ServiceError;

/// Errors surfaced by the remote-backed store.
///
/// Local operations never fail; they decline with `None` instead.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The task service call failed; the collection was left unchanged.
    #[error("task service call failed: {0}")]
    Service(#[from] ServiceError),
}

impl StoreError {
    /// Returns `true` if the service reported the task as unknown.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Service(ServiceError::NotFound(_)))
    }
}
