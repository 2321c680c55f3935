pub mod members;
pub mod projects;
pub mod records;
pub mod tasks;
