mod delete_project;
mod get_project;
mod get_projects;
mod new_project;
mod project_record;
mod update_project;

pub use delete_project::*;
pub use get_project::*;
pub use get_projects::*;
pub use new_project::*;
pub use project_record::*;
pub use update_project::*;
