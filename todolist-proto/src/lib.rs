//! Shared wire definitions for the todolist task service.
//!
//! Everything that crosses the HTTP boundary lives here: the task record,
//! request bodies, the response envelope, and the date/time codecs.

pub mod codec;
pub mod envelope;
pub mod request;
pub mod task;
pub mod wire;
