use crate::errors::{AppError, AppResult};
use crate::models::{Task, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOp {
    Read,
    Update,
    Delete,
}

/// Decide whether `account` may perform `op` on the looked-up task.
///
/// Absence wins over ownership: an unresolved id is `NotFound` no matter who
/// asks. An existing task owned by someone else is `Forbidden`, for reads as
/// well as mutations. Returns the task itself on success so callers can keep
/// working with it.
pub fn authorize_task_access(task: Option<Task>, account: &User, op: TaskOp) -> AppResult<Task> {
    let task = task.ok_or(AppError::NotFound)?;

    if task.owner != account.id {
        let action = match op {
            TaskOp::Read => "view",
            TaskOp::Update => "update",
            TaskOp::Delete => "delete",
        };
        return Err(AppError::Forbidden(format!(
            "Can't {} other user's tasks",
            action
        )));
    }

    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use chrono::Utc;
    use uuid::Uuid;

    fn account(username: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            first_name: "Test".to_string(),
            last_name: None,
            password_hash: "digest".to_string(),
        }
    }

    fn task_owned_by(owner: &User) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "Buy milk".to_string(),
            description: None,
            status: TaskStatus::New,
            owner: owner.id,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn owner_may_read_update_and_delete() {
        let alice = account("alice");
        let task = task_owned_by(&alice);

        for op in [TaskOp::Read, TaskOp::Update, TaskOp::Delete] {
            let decided = authorize_task_access(Some(task.clone()), &alice, op).unwrap();
            assert_eq!(decided.id, task.id);
        }
    }

    #[test]
    fn foreign_task_is_forbidden_for_every_op() {
        let alice = account("alice");
        let bob = account("bob");
        let task = task_owned_by(&alice);

        for op in [TaskOp::Read, TaskOp::Update, TaskOp::Delete] {
            let result = authorize_task_access(Some(task.clone()), &bob, op);
            assert!(matches!(result, Err(AppError::Forbidden(_))));
        }
    }

    #[test]
    fn missing_task_is_not_found_regardless_of_caller() {
        let alice = account("alice");
        let result = authorize_task_access(None, &alice, TaskOp::Update);
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[test]
    fn forbidden_message_names_the_operation() {
        let alice = account("alice");
        let bob = account("bob");
        let task = task_owned_by(&alice);

        match authorize_task_access(Some(task), &bob, TaskOp::Delete) {
            Err(AppError::Forbidden(msg)) => {
                assert_eq!(msg, "Can't delete other user's tasks")
            }
            other => panic!("expected Forbidden, got {:?}", other.map(|t| t.id)),
        }
    }
}
