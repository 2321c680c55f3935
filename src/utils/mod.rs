pub mod auth;
pub mod constants;
pub mod notify;
pub mod tracing;
