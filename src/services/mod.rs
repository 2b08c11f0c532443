mod redis_service;
pub mod store;

pub use redis_service::RedisService;
pub use store::{TaskStore, UserStore};
