use crate::domain::{MemberId, ProjectId};

/// Where a view asks the front-end to go next.
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    Home { refresh: bool },
    Projects,
}

impl Navigation {
    pub fn path(&self) -> &'static str {
        match self {
            Navigation::Home { .. } => "/",
            Navigation::Projects => "/projects",
        }
    }
}

pub fn project_path(id: &ProjectId) -> String {
    format!("/projects/{id}")
}

pub fn member_path(id: &MemberId) -> String {
    format!("/team/{id}")
}
