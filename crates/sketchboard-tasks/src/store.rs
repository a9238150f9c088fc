//! Task persistence contract.

use crate::task::{NewTask, Task, TaskId, TaskPatch};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Task and leaderboard errors.
#[derive(Debug, Error)]
pub enum TaskStoreError {
    #[error("Task not found: {0}")]
    NotFound(TaskId),
    #[error("Task title cannot be empty")]
    EmptyTitle,
    #[error("Task title cannot be a column name: {0}")]
    ReservedTitle(String),
    #[error("Task title must be unique: {0}")]
    DuplicateTitle(String),
    #[error("Invalid task level: {0}")]
    InvalidLevel(u8),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for task operations.
pub type TaskResult<T> = Result<T, TaskStoreError>;

/// Boxed future returned by the async contracts.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Column headings a task title may not reuse.
pub const COLUMN_NAMES: [&str; 3] = ["Todo", "In Progress", "Done"];

/// Check a title against the board rules. `existing` yields the titles of
/// every other task.
pub fn validate_title<'a>(
    title: &str,
    mut existing: impl Iterator<Item = &'a str>,
) -> TaskResult<()> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TaskStoreError::EmptyTitle);
    }
    if COLUMN_NAMES.contains(&title) {
        return Err(TaskStoreError::ReservedTitle(title.to_string()));
    }
    if existing.any(|other| other.trim() == title) {
        return Err(TaskStoreError::DuplicateTitle(title.to_string()));
    }
    Ok(())
}

/// Trait for task storage backends.
pub trait TaskStore: Send + Sync {
    /// All tasks, oldest first.
    fn list(&self) -> BoxFuture<'_, TaskResult<Vec<Task>>>;

    /// Create a task with a fresh id.
    fn create(&self, task: NewTask) -> BoxFuture<'_, TaskResult<Task>>;

    /// Apply a partial update and return the updated task.
    fn update(&self, id: TaskId, patch: TaskPatch) -> BoxFuture<'_, TaskResult<Task>>;

    /// Delete a task.
    fn delete(&self, id: TaskId) -> BoxFuture<'_, TaskResult<()>>;
}
