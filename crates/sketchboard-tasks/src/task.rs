//! Task records.

use crate::store::TaskStoreError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for tasks.
pub type TaskId = Uuid;

/// Board column a task sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Difficulty of a task; decides how many points completing it is worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskLevel {
    #[default]
    One,
    Two,
    Three,
}

impl TaskLevel {
    /// Leaderboard points awarded for a task of this level.
    pub fn points(self) -> u32 {
        match self {
            TaskLevel::One => 2,
            TaskLevel::Two => 5,
            TaskLevel::Three => 11,
        }
    }
}

impl TryFrom<u8> for TaskLevel {
    type Error = TaskStoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TaskLevel::One),
            2 => Ok(TaskLevel::Two),
            3 => Ok(TaskLevel::Three),
            other => Err(TaskStoreError::InvalidLevel(other)),
        }
    }
}

impl From<TaskLevel> for u8 {
    fn from(level: TaskLevel) -> Self {
        match level {
            TaskLevel::One => 1,
            TaskLevel::Two => 2,
            TaskLevel::Three => 3,
        }
    }
}

fn unassigned() -> String {
    "Unassigned".to_string()
}

/// A stored task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub status: TaskStatus,
    pub description: String,
    pub assigned_user: String,
    pub priority: Priority,
    /// Who got credit for the task; empty until points are awarded.
    pub contributor: String,
    pub task_level: TaskLevel,
}

/// Fields accepted when creating a task. Everything but the title has a
/// default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default = "unassigned")]
    pub assigned_user: String,
    #[serde(default)]
    pub priority: Priority,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: TaskStatus::default(),
            description: String::new(),
            assigned_user: unassigned(),
            priority: Priority::default(),
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_assigned_user(mut self, user: impl Into<String>) -> Self {
        self.assigned_user = user.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Materialize with a fresh id.
    pub(crate) fn into_task(self) -> Task {
        Task {
            id: Uuid::now_v7(),
            title: self.title.trim().to_string(),
            status: self.status,
            description: self.description,
            assigned_user: self.assigned_user,
            priority: self.priority,
            contributor: String::new(),
            task_level: TaskLevel::default(),
        }
    }
}

/// Partial update: only the fields that are `Some` change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    pub description: Option<String>,
    pub assigned_user: Option<String>,
    pub priority: Option<Priority>,
    pub contributor: Option<String>,
    pub task_level: Option<TaskLevel>,
}

impl TaskPatch {
    pub(crate) fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title.trim().to_string();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(user) = self.assigned_user {
            task.assigned_user = user;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(contributor) = self.contributor {
            task.contributor = contributor;
        }
        if let Some(level) = self.task_level {
            task.task_level = level;
        }
    }
}
