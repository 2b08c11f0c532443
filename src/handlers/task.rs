use axum::{
    extract::{Path, Query, State},
    response::Json,
    Extension,
};
use uuid::Uuid;

use crate::auth::{authorize_task_access, TaskOp};
use crate::errors::AppResult;
use crate::models::{
    MessageResponse, PageParams, Task, TaskFilter, TaskInput, TaskListParams, TaskPage, TaskUpdate,
    User,
};
use crate::AppState;

#[axum::debug_handler]
pub async fn create_task(
    State(state): State<AppState>,
    Extension(current_user): Extension<User>,
    Json(input): Json<TaskInput>,
) -> AppResult<Json<MessageResponse>> {
    let task = state.tasks.create(input, &current_user).await?;
    tracing::info!("User {} created task {}", current_user.username, task.id);

    Ok(Json(MessageResponse {
        message: format!("Task '{}' created!", task.title),
    }))
}

/// Page through the caller's own tasks, optionally narrowed by status.
#[axum::debug_handler]
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(current_user): Extension<User>,
    Query(params): Query<TaskListParams>,
) -> AppResult<Json<TaskPage>> {
    let filter = TaskFilter {
        owner: Some(current_user.id),
        status: params.status,
    };
    let page = PageParams {
        page: params.page.max(1),
        size: params.page_size.clamp(1, 100),
    };

    Ok(Json(state.tasks.filtered_page(filter, page).await?))
}

#[axum::debug_handler]
pub async fn get_task(
    State(state): State<AppState>,
    Extension(current_user): Extension<User>,
    Path(task_id): Path<Uuid>,
) -> AppResult<Json<Task>> {
    let task = state.tasks.get(task_id).await?;
    let task = authorize_task_access(task, &current_user, TaskOp::Read)?;
    Ok(Json(task))
}

#[axum::debug_handler]
pub async fn update_task(
    State(state): State<AppState>,
    Extension(current_user): Extension<User>,
    Path(task_id): Path<Uuid>,
    Json(patch): Json<TaskUpdate>,
) -> AppResult<Json<MessageResponse>> {
    let task = state.tasks.get(task_id).await?;
    let task = authorize_task_access(task, &current_user, TaskOp::Update)?;

    let updated = state.tasks.update(&task, patch).await?;
    tracing::info!("User {} updated task {}", current_user.username, updated.id);

    Ok(Json(MessageResponse {
        message: format!("Task '{}' updated successfully", updated.title),
    }))
}

#[axum::debug_handler]
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(current_user): Extension<User>,
    Path(task_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    let task = state.tasks.get(task_id).await?;
    let task = authorize_task_access(task, &current_user, TaskOp::Delete)?;

    state.tasks.delete(&task).await?;
    tracing::info!("User {} deleted task {}", current_user.username, task.id);

    Ok(Json(MessageResponse {
        message: format!("Task '{}' deleted successfully", task.title),
    }))
}
