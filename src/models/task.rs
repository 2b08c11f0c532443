use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::forms::{TaskInput, TaskUpdate};
use super::user::User;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    New,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub owner: Uuid,  // owning account id, set at creation, immutable
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn from_input(input: TaskInput, owner: &User) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or_default(),
            owner: owner.id,
            created_at: Utc::now(),
        }
    }

    /// Apply a partial update; fields left unset keep their value.
    pub fn apply(&mut self, patch: TaskUpdate) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Optional owner/status narrowing for task listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    pub owner: Option<Uuid>,
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    pub page: u32,
    pub size: u32,
}

#[derive(Serialize, Debug)]
pub struct TaskPage {
    pub items: Vec<Task>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> User {
        User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            first_name: "Alice".to_string(),
            last_name: None,
            password_hash: "digest".to_string(),
        }
    }

    #[test]
    fn status_uses_the_human_readable_wire_strings() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            r#""In Progress""#
        );
        let parsed: TaskStatus = serde_json::from_str(r#""In Progress""#).unwrap();
        assert_eq!(parsed, TaskStatus::InProgress);
        assert!(serde_json::from_str::<TaskStatus>(r#""invalid-value""#).is_err());
    }

    #[test]
    fn new_task_defaults_to_new_status_and_belongs_to_its_creator() {
        let owner = owner();
        let task = Task::from_input(
            TaskInput {
                title: "Buy milk".to_string(),
                description: None,
                status: None,
            },
            &owner,
        );
        assert_eq!(task.status, TaskStatus::New);
        assert_eq!(task.owner, owner.id);
    }

    #[test]
    fn partial_update_leaves_unset_fields_alone() {
        let owner = owner();
        let mut task = Task::from_input(
            TaskInput {
                title: "Buy milk".to_string(),
                description: Some("two liters".to_string()),
                status: None,
            },
            &owner,
        );

        task.apply(TaskUpdate {
            title: None,
            description: None,
            status: Some(TaskStatus::Completed),
        });

        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description.as_deref(), Some("two liters"));
        assert_eq!(task.status, TaskStatus::Completed);
    }
}
