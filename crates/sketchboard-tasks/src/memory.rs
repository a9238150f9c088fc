//! In-memory task store.

use crate::store::{BoxFuture, TaskResult, TaskStore, TaskStoreError, validate_title};
use crate::task::{NewTask, Task, TaskId, TaskPatch};
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl MemoryTaskStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> TaskStoreError {
    TaskStoreError::Other(format!("Lock error: {e}"))
}

impl TaskStore for MemoryTaskStore {
    fn list(&self) -> BoxFuture<'_, TaskResult<Vec<Task>>> {
        Box::pin(async move {
            let tasks = self.tasks.read().map_err(lock_error)?;
            Ok(tasks.clone())
        })
    }

    fn create(&self, task: NewTask) -> BoxFuture<'_, TaskResult<Task>> {
        Box::pin(async move {
            let mut tasks = self.tasks.write().map_err(lock_error)?;
            validate_title(&task.title, tasks.iter().map(|t| t.title.as_str()))?;
            let task = task.into_task();
            log::debug!("created task {} ({})", task.id, task.title);
            tasks.push(task.clone());
            Ok(task)
        })
    }

    fn update(&self, id: TaskId, patch: TaskPatch) -> BoxFuture<'_, TaskResult<Task>> {
        Box::pin(async move {
            let mut tasks = self.tasks.write().map_err(lock_error)?;
            if let Some(title) = &patch.title {
                let others = tasks.iter().filter(|t| t.id != id).map(|t| t.title.as_str());
                validate_title(title, others)?;
            }
            let task = tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or(TaskStoreError::NotFound(id))?;
            patch.apply(task);
            Ok(task.clone())
        })
    }

    fn delete(&self, id: TaskId) -> BoxFuture<'_, TaskResult<()>> {
        Box::pin(async move {
            let mut tasks = self.tasks.write().map_err(lock_error)?;
            let index = tasks
                .iter()
                .position(|t| t.id == id)
                .ok_or(TaskStoreError::NotFound(id))?;
            tasks.remove(index);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, TaskStatus};
    use pollster::block_on;

    #[test]
    fn test_create_and_list() {
        let store = MemoryTaskStore::new();
        let a = block_on(store.create(NewTask::new("a"))).unwrap();
        let b = block_on(store.create(NewTask::new("b").with_priority(Priority::High))).unwrap();

        let tasks = block_on(store.list()).unwrap();
        assert_eq!(tasks, vec![a, b]);
    }

    #[test]
    fn test_create_rejects_bad_titles() {
        let store = MemoryTaskStore::new();
        block_on(store.create(NewTask::new("a"))).unwrap();
        assert!(matches!(
            block_on(store.create(NewTask::new(" a"))),
            Err(TaskStoreError::DuplicateTitle(_))
        ));
        assert!(matches!(
            block_on(store.create(NewTask::new("In Progress"))),
            Err(TaskStoreError::ReservedTitle(_))
        ));
        assert_eq!(block_on(store.list()).unwrap().len(), 1);
    }

    #[test]
    fn test_create_trims_title() {
        let store = MemoryTaskStore::new();
        let task = block_on(store.create(NewTask::new(" a "))).unwrap();
        assert_eq!(task.title, "a");
        assert_eq!(block_on(store.list()).unwrap()[0].title, "a");
    }

    #[test]
    fn test_update() {
        let store = MemoryTaskStore::new();
        let task = block_on(store.create(NewTask::new("a"))).unwrap();
        let patch = TaskPatch {
            status: Some(TaskStatus::Done),
            title: Some("a".to_string()),
            ..TaskPatch::default()
        };
        let updated = block_on(store.update(task.id, patch)).unwrap();
        assert_eq!(updated.status, TaskStatus::Done);
        assert_eq!(updated.id, task.id);
    }

    #[test]
    fn test_missing_task() {
        let store = MemoryTaskStore::new();
        let id = uuid::Uuid::now_v7();
        assert!(matches!(
            block_on(store.update(id, TaskPatch::default())),
            Err(TaskStoreError::NotFound(_))
        ));
        assert!(matches!(block_on(store.delete(id)), Err(TaskStoreError::NotFound(_))));
    }

    #[test]
    fn test_delete() {
        let store = MemoryTaskStore::new();
        let task = block_on(store.create(NewTask::new("a"))).unwrap();
        block_on(store.delete(task.id)).unwrap();
        assert!(block_on(store.list()).unwrap().is_empty());
    }
}
