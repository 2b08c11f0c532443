mod auth;
mod task;
mod user;

pub use auth::{login, signup};
pub use task::{create_task, delete_task, get_task, list_tasks, update_task};
pub use user::list_users;
