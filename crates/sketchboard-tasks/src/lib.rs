//! Sketchboard Tasks Library
//!
//! The task board and contributor leaderboard that live next to the
//! whiteboard, expressed as async storage contracts with in-memory
//! implementations.

mod leaderboard;
mod memory;
mod store;
mod task;

pub use leaderboard::{Contributor, Leaderboard, MemoryLeaderboard};
pub use memory::MemoryTaskStore;
pub use store::{BoxFuture, COLUMN_NAMES, TaskResult, TaskStore, TaskStoreError, validate_title};
pub use task::{NewTask, Priority, Task, TaskId, TaskLevel, TaskPatch, TaskStatus};
