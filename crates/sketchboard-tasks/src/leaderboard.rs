//! Contributor leaderboard.

use crate::store::{BoxFuture, TaskResult, TaskStore, TaskStoreError};
use crate::task::{TaskId, TaskLevel, TaskPatch};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Points and completed-task counts for one contributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    pub username: String,
    pub points: u32,
    pub level1_tasks: u32,
    pub level2_tasks: u32,
    pub level3_tasks: u32,
}

impl Contributor {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            points: 0,
            level1_tasks: 0,
            level2_tasks: 0,
            level3_tasks: 0,
        }
    }

    /// Credit one completed task of `level`.
    pub fn credit(&mut self, level: TaskLevel) {
        self.points += level.points();
        match level {
            TaskLevel::One => self.level1_tasks += 1,
            TaskLevel::Two => self.level2_tasks += 1,
            TaskLevel::Three => self.level3_tasks += 1,
        }
    }
}

/// Trait for leaderboard backends.
pub trait Leaderboard: Send + Sync {
    /// Contributors, highest points first.
    fn list(&self) -> BoxFuture<'_, TaskResult<Vec<Contributor>>>;

    /// Credit `contributor` for finishing `task_id` at `level`, creating the
    /// contributor on first use, and stamp the task with who did it.
    fn award_points(
        &self,
        contributor: &str,
        level: TaskLevel,
        task_id: TaskId,
    ) -> BoxFuture<'_, TaskResult<Contributor>>;
}

/// Leaderboard kept in memory, stamping tasks through a [`TaskStore`].
pub struct MemoryLeaderboard {
    contributors: RwLock<HashMap<String, Contributor>>,
    tasks: Arc<dyn TaskStore>,
}

impl MemoryLeaderboard {
    pub fn new(tasks: Arc<dyn TaskStore>) -> Self {
        Self {
            contributors: RwLock::new(HashMap::new()),
            tasks,
        }
    }

    /// Like [`Leaderboard::award_points`] but takes the level as sent over
    /// the wire; anything other than 1, 2 or 3 is rejected.
    pub async fn award_points_raw(
        &self,
        contributor: &str,
        level: u8,
        task_id: TaskId,
    ) -> TaskResult<Contributor> {
        let level = TaskLevel::try_from(level)?;
        self.award_points(contributor, level, task_id).await
    }
}

fn lock_error(e: impl std::fmt::Display) -> TaskStoreError {
    TaskStoreError::Other(format!("Lock error: {e}"))
}

impl Leaderboard for MemoryLeaderboard {
    fn list(&self) -> BoxFuture<'_, TaskResult<Vec<Contributor>>> {
        Box::pin(async move {
            let contributors = self.contributors.read().map_err(lock_error)?;
            let mut list: Vec<Contributor> = contributors.values().cloned().collect();
            list.sort_by(|a, b| {
                b.points
                    .cmp(&a.points)
                    .then_with(|| a.username.cmp(&b.username))
            });
            Ok(list)
        })
    }

    fn award_points(
        &self,
        contributor: &str,
        level: TaskLevel,
        task_id: TaskId,
    ) -> BoxFuture<'_, TaskResult<Contributor>> {
        let username = contributor.to_string();
        Box::pin(async move {
            // Stamp first so a store failure leaves the points untouched.
            let patch = TaskPatch {
                contributor: Some(username.clone()),
                task_level: Some(level),
                ..TaskPatch::default()
            };
            match self.tasks.update(task_id, patch).await {
                Ok(_) => {}
                Err(TaskStoreError::NotFound(id)) => {
                    log::warn!("awarding points for unknown task {id}");
                }
                Err(err) => return Err(err),
            }

            let mut contributors = self.contributors.write().map_err(lock_error)?;
            let entry = contributors
                .entry(username.clone())
                .or_insert_with(|| Contributor::new(username));
            entry.credit(level);
            log::info!(
                "{} earned {} points (total {})",
                entry.username,
                level.points(),
                entry.points
            );
            Ok(entry.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryTaskStore;
    use crate::task::NewTask;
    use pollster::block_on;

    fn setup() -> (Arc<MemoryTaskStore>, MemoryLeaderboard) {
        let store = Arc::new(MemoryTaskStore::new());
        let board = MemoryLeaderboard::new(store.clone());
        (store, board)
    }

    #[test]
    fn test_points_per_level() {
        let (store, board) = setup();
        let task = block_on(store.create(NewTask::new("t"))).unwrap();

        block_on(board.award_points("ana", TaskLevel::One, task.id)).unwrap();
        block_on(board.award_points("ana", TaskLevel::Two, task.id)).unwrap();
        let ana = block_on(board.award_points("ana", TaskLevel::Three, task.id)).unwrap();

        assert_eq!(ana.points, 18);
        assert_eq!((ana.level1_tasks, ana.level2_tasks, ana.level3_tasks), (1, 1, 1));
    }

    #[test]
    fn test_task_is_stamped() {
        let (store, board) = setup();
        let task = block_on(store.create(NewTask::new("t"))).unwrap();
        block_on(board.award_points("bo", TaskLevel::Three, task.id)).unwrap();

        let stored = block_on(store.list()).unwrap().remove(0);
        assert_eq!(stored.contributor, "bo");
        assert_eq!(stored.task_level, TaskLevel::Three);
    }

    #[test]
    fn test_list_sorted_by_points() {
        let (_store, board) = setup();
        let id = uuid::Uuid::now_v7();
        block_on(board.award_points("low", TaskLevel::One, id)).unwrap();
        block_on(board.award_points("high", TaskLevel::Three, id)).unwrap();
        block_on(board.award_points("mid", TaskLevel::Two, id)).unwrap();

        let names: Vec<String> = block_on(board.list())
            .unwrap()
            .into_iter()
            .map(|c| c.username)
            .collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_missing_task_still_awards() {
        let (store, board) = setup();
        let contributor =
            block_on(board.award_points("cy", TaskLevel::Two, uuid::Uuid::now_v7())).unwrap();
        assert_eq!(contributor.points, 5);
        assert!(block_on(store.list()).unwrap().is_empty());
    }

    struct BrokenStore;

    impl TaskStore for BrokenStore {
        fn list(&self) -> BoxFuture<'_, TaskResult<Vec<crate::task::Task>>> {
            Box::pin(async { Ok(Vec::new()) })
        }

        fn create(&self, _task: NewTask) -> BoxFuture<'_, TaskResult<crate::task::Task>> {
            Box::pin(async { Err(TaskStoreError::Other("offline".to_string())) })
        }

        fn update(
            &self,
            _id: TaskId,
            _patch: TaskPatch,
        ) -> BoxFuture<'_, TaskResult<crate::task::Task>> {
            Box::pin(async { Err(TaskStoreError::Other("offline".to_string())) })
        }

        fn delete(&self, _id: TaskId) -> BoxFuture<'_, TaskResult<()>> {
            Box::pin(async { Err(TaskStoreError::Other("offline".to_string())) })
        }
    }

    #[test]
    fn test_store_failure_awards_nothing() {
        let board = MemoryLeaderboard::new(Arc::new(BrokenStore));
        let result = block_on(board.award_points("eve", TaskLevel::Three, uuid::Uuid::now_v7()));
        assert!(matches!(result, Err(TaskStoreError::Other(_))));
        assert!(block_on(board.list()).unwrap().is_empty());
    }

    #[test]
    fn test_raw_level_validation() {
        let (_store, board) = setup();
        let id = uuid::Uuid::now_v7();
        assert!(matches!(
            block_on(board.award_points_raw("dee", 7, id)),
            Err(TaskStoreError::InvalidLevel(7))
        ));
        assert!(block_on(board.list()).unwrap().is_empty());
        let dee = block_on(board.award_points_raw("dee", 1, id)).unwrap();
        assert_eq!(dee.points, 2);
    }
}
