//! Task service abstraction.
//!
//! Defines the [`TaskService`] trait that every backend satisfies.
//! Concrete implementations:
//! - [`http::HttpTaskService`] - the remote REST task service
//! - [`memory::MemoryTaskService`] - in-process service for offline mode and tests

pub mod http;
pub mod memory;

use std::fmt;

use todolist_proto::codec::CodecError;
use todolist_proto::envelope::EnvelopeError;
use todolist_proto::request::{CreateTaskRequest, TaskPatch};
use todolist_proto::task::{Task, TaskId};

/// Describes which kind of service backs a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    /// Remote HTTP task service.
    Http,
    /// In-process memory service.
    Memory,
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => write!(f, "HTTP"),
            Self::Memory => write!(f, "offline"),
        }
    }
}

/// Errors that can occur during a task service call.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The request never produced a response (connect, timeout, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Method and path of the failed call.
        endpoint: String,
    },

    /// The envelope's `success` flag was false.
    #[error("service rejected the request: {message}")]
    Rejected {
        /// Message from the envelope.
        message: String,
        /// Optional error detail from the envelope.
        detail: Option<String>,
    },

    /// The service does not know the task.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A successful envelope carried no payload where one is required.
    #[error("{0} response carried no task")]
    MissingPayload(String),

    /// The response body could not be decoded.
    #[error("undecodable response: {0}")]
    Decode(#[from] CodecError),

    /// The service is unreachable.
    #[error("task service unavailable")]
    Unavailable,

    /// The base URL cannot carry task endpoints.
    #[error("unusable task API base URL {url}: {reason}")]
    InvalidBaseUrl {
        /// The configured base URL.
        url: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}

impl From<EnvelopeError> for ServiceError {
    fn from(err: EnvelopeError) -> Self {
        Self::Rejected {
            message: err.message,
            detail: err.detail,
        }
    }
}

/// Async task service: the six operations of the task REST API.
///
/// Every method is all-or-nothing: an `Err` means the service state must be
/// assumed unchanged as far as the caller is concerned.
pub trait TaskService: Send + Sync {
    /// Fetches the whole collection in service order.
    fn fetch_all(&self) -> impl std::future::Future<Output = Result<Vec<Task>, ServiceError>> + Send;

    /// Fetches one task by id.
    fn fetch(
        &self,
        id: &TaskId,
    ) -> impl std::future::Future<Output = Result<Task, ServiceError>> + Send;

    /// Creates a task; the service assigns the id.
    fn create(
        &self,
        request: &CreateTaskRequest,
    ) -> impl std::future::Future<Output = Result<Task, ServiceError>> + Send;

    /// Applies a partial update and returns the updated record.
    fn update(
        &self,
        id: &TaskId,
        patch: &TaskPatch,
    ) -> impl std::future::Future<Output = Result<Task, ServiceError>> + Send;

    /// Deletes a task.
    fn delete(&self, id: &TaskId)
    -> impl std::future::Future<Output = Result<(), ServiceError>> + Send;

    /// Flips the completion flag and returns the updated record.
    fn toggle(
        &self,
        id: &TaskId,
    ) -> impl std::future::Future<Output = Result<Task, ServiceError>> + Send;

    /// Returns the kind of this service.
    fn kind(&self) -> ServiceKind;
}
