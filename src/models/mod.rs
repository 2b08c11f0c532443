mod user;
mod forms;
mod task;

pub use user::{NewUser, User};
pub use forms::{
    LoginRequest, MessageResponse, RegisterRequest, TaskInput, TaskListParams, TaskUpdate,
    TokenResponse, UserOut,
};
pub use task::{PageParams, Task, TaskFilter, TaskPage, TaskStatus};
