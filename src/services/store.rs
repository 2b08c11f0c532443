use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::{NewUser, PageParams, Task, TaskFilter, TaskInput, TaskPage, TaskUpdate, User};

/// Account directory. `create` is the authoritative uniqueness check: a
/// duplicate username fails with `DuplicateUser` even when two registrations
/// race past the caller's pre-check.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// All accounts, ordered by username.
    async fn list_all(&self) -> AppResult<Vec<User>>;

    async fn create(&self, draft: NewUser) -> AppResult<User>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<Option<Task>>;

    async fn create(&self, draft: TaskInput, owner: &User) -> AppResult<Task>;

    async fn update(&self, task: &Task, patch: TaskUpdate) -> AppResult<Task>;

    async fn delete(&self, task: &Task) -> AppResult<()>;

    /// One page of tasks matching the filter, newest first.
    async fn filtered_page(&self, filter: TaskFilter, page: PageParams) -> AppResult<TaskPage>;
}

/// Filter, order and slice a candidate set into a page. Shared by store
/// implementations so they agree on ordering and totals.
pub fn page_of(mut tasks: Vec<Task>, filter: TaskFilter, page: PageParams) -> TaskPage {
    if let Some(owner) = filter.owner {
        tasks.retain(|t| t.owner == owner);
    }
    if let Some(status) = filter.status {
        tasks.retain(|t| t.status == status);
    }

    // Newest first; id breaks created_at ties so order stays stable
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

    let total = tasks.len() as u64;
    let start = (page.page.saturating_sub(1) as usize).saturating_mul(page.size as usize);
    let items = tasks
        .into_iter()
        .skip(start)
        .take(page.size as usize)
        .collect();

    TaskPage {
        items,
        total,
        page: page.page,
        size: page.size,
    }
}
