//! `todolist` - task store, view projection and task-service client.

pub mod app;
pub mod config;
pub mod service;
pub mod tasks;
pub mod view;
