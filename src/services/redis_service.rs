use redis::{AsyncCommands, Client};
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{NewUser, PageParams, Task, TaskFilter, TaskInput, TaskPage, TaskUpdate, User};
use crate::services::store::{page_of, TaskStore, UserStore};

pub struct RedisService {
    client: Arc<Client>,
}

impl RedisService {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn user_key(username: &str) -> String {
        format!("user:{}", username)
    }

    fn task_key(id: Uuid) -> String {
        format!("task:{}", id)
    }

    fn owner_index_key(owner: Uuid) -> String {
        format!("user_tasks:{}", owner)
    }
}

fn encode<T: Serialize>(record: &T) -> AppResult<String> {
    serde_json::to_string(record).map_err(|e| {
        AppError::from(redis::RedisError::from((
            redis::ErrorKind::TypeError,
            "Failed to encode record",
            e.to_string(),
        )))
    })
}

fn decode<T: DeserializeOwned>(payload: &str) -> AppResult<T> {
    serde_json::from_str(payload).map_err(|e| {
        AppError::from(redis::RedisError::from((
            redis::ErrorKind::TypeError,
            "Failed to parse record",
            e.to_string(),
        )))
    })
}

#[async_trait]
impl UserStore for RedisService {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let mut conn = self.client.get_async_connection().await?;
        let payload: Option<String> = conn.get(Self::user_key(username)).await?;
        payload.as_deref().map(decode).transpose()
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        let mut conn = self.client.get_async_connection().await?;
        let usernames: Vec<String> = conn.smembers("users:index").await?;

        let mut users: Vec<User> = Vec::with_capacity(usernames.len());
        for username in usernames {
            let payload: Option<String> = conn.get(Self::user_key(&username)).await?;
            match payload {
                Some(payload) => users.push(decode(&payload)?),
                None => tracing::warn!("Indexed user {} has no record", username),
            }
        }

        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn create(&self, draft: NewUser) -> AppResult<User> {
        let user = User {
            id: Uuid::new_v4(),
            username: draft.username,
            first_name: draft.first_name,
            last_name: draft.last_name,
            password_hash: draft.password_hash,
        };

        let mut conn = self.client.get_async_connection().await?;

        // SET NX is the atomic uniqueness backstop: whichever of two racing
        // registrations lands second sees the key taken.
        let created: bool = conn.set_nx(Self::user_key(&user.username), encode(&user)?).await?;
        if !created {
            return Err(AppError::DuplicateUser);
        }

        let _: () = conn.sadd("users:index", &user.username).await?;
        Ok(user)
    }
}

#[async_trait]
impl TaskStore for RedisService {
    async fn get(&self, id: Uuid) -> AppResult<Option<Task>> {
        let mut conn = self.client.get_async_connection().await?;
        let payload: Option<String> = conn.get(Self::task_key(id)).await?;
        payload.as_deref().map(decode).transpose()
    }

    async fn create(&self, draft: TaskInput, owner: &User) -> AppResult<Task> {
        let task = Task::from_input(draft, owner);

        let mut conn = self.client.get_async_connection().await?;
        let _: () = conn.set(Self::task_key(task.id), encode(&task)?).await?;
        let _: () = conn.sadd("tasks:index", task.id.to_string()).await?;
        let _: () = conn
            .sadd(Self::owner_index_key(task.owner), task.id.to_string())
            .await?;

        Ok(task)
    }

    async fn update(&self, task: &Task, patch: TaskUpdate) -> AppResult<Task> {
        let mut updated = task.clone();
        updated.apply(patch);

        let mut conn = self.client.get_async_connection().await?;
        let _: () = conn.set(Self::task_key(updated.id), encode(&updated)?).await?;

        Ok(updated)
    }

    async fn delete(&self, task: &Task) -> AppResult<()> {
        let mut conn = self.client.get_async_connection().await?;
        let _: () = conn.del(Self::task_key(task.id)).await?;
        let _: () = conn.srem("tasks:index", task.id.to_string()).await?;
        let _: () = conn
            .srem(Self::owner_index_key(task.owner), task.id.to_string())
            .await?;
        Ok(())
    }

    async fn filtered_page(&self, filter: TaskFilter, page: PageParams) -> AppResult<TaskPage> {
        let mut conn = self.client.get_async_connection().await?;

        // Owner-scoped listings read the per-owner index set instead of
        // scanning every task.
        let ids: Vec<String> = match filter.owner {
            Some(owner) => conn.smembers(Self::owner_index_key(owner)).await?,
            None => conn.smembers("tasks:index").await?,
        };

        let mut tasks = Vec::with_capacity(ids.len());
        for id in ids {
            let payload: Option<String> = conn.get(format!("task:{}", id)).await?;
            match payload {
                Some(payload) => tasks.push(decode(&payload)?),
                None => tracing::warn!("Indexed task {} has no record", id),
            }
        }

        Ok(page_of(tasks, filter, page))
    }
}

impl Clone for RedisService {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}
