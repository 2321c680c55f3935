mod hashmap_member_store;
mod hashmap_project_store;
mod hashmap_record_store;
mod hashmap_session_store;
mod hashmap_task_store;
mod postgres_member_store;
mod postgres_project_store;
mod postgres_record_store;
mod postgres_task_store;
mod redis_session_store;

pub use hashmap_member_store::*;
pub use hashmap_project_store::*;
pub use hashmap_record_store::*;
pub use hashmap_session_store::*;
pub use hashmap_task_store::*;
pub use postgres_member_store::*;
pub use postgres_project_store::*;
pub use postgres_record_store::*;
pub use postgres_task_store::*;
pub use redis_session_store::*;
