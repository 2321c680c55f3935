use super::{
    Member, MemberId, Password, Project, ProjectId, Record, SessionToken,
    Task, TaskId, Username,
};
use color_eyre::eyre::Report;
use thiserror::Error;

#[async_trait::async_trait]
pub trait MemberStore {
    async fn add_member(&mut self, member: Member)
        -> Result<(), MemberStoreError>;
    async fn get_member(
        &self,
        id: &MemberId,
    ) -> Result<Member, MemberStoreError>;
    async fn get_member_by_username(
        &self,
        username: &Username,
    ) -> Result<Member, MemberStoreError>;
    /// Every member, in the order they joined.
    async fn get_members(&self) -> Result<Vec<Member>, MemberStoreError>;
    /// Exact, case-sensitive match, ignoring `excluding`.
    async fn username_taken(
        &self,
        username: &Username,
        excluding: Option<&MemberId>,
    ) -> Result<bool, MemberStoreError>;
    async fn update_member(
        &mut self,
        member: Member,
    ) -> Result<(), MemberStoreError>;
    async fn delete_member(
        &mut self,
        id: &MemberId,
    ) -> Result<Member, MemberStoreError>;
    /// The member holding `username`, provided `password` matches.
    async fn validate_member(
        &self,
        username: &Username,
        password: &Password,
    ) -> Result<Member, MemberStoreError>;
}

#[derive(Debug, Error)]
pub enum MemberStoreError {
    #[error("Username already in use")]
    UsernameTaken,
    #[error("Member not found")]
    MemberNotFound,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for MemberStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UsernameTaken, Self::UsernameTaken)
                | (Self::MemberNotFound, Self::MemberNotFound)
                | (Self::InvalidCredentials, Self::InvalidCredentials)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait ProjectStore {
    async fn add_project(
        &mut self,
        project: Project,
    ) -> Result<(), ProjectStoreError>;
    async fn get_project(
        &self,
        id: &ProjectId,
    ) -> Result<Project, ProjectStoreError>;
    /// Every project, oldest first.
    async fn get_projects(&self) -> Result<Vec<Project>, ProjectStoreError>;
    async fn update_project(
        &mut self,
        project: Project,
    ) -> Result<(), ProjectStoreError>;
    async fn delete_project(
        &mut self,
        id: &ProjectId,
    ) -> Result<Project, ProjectStoreError>;
    /// Projects led by `member` or whose whole team is `member`.
    async fn get_projects_relying_on(
        &self,
        member: &MemberId,
    ) -> Result<Vec<Project>, ProjectStoreError>;
}

#[derive(Debug, Error)]
pub enum ProjectStoreError {
    #[error("Project ID exists")]
    ProjectIDExists,
    #[error("Project not found")]
    ProjectNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for ProjectStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::ProjectIDExists, Self::ProjectIDExists)
                | (Self::ProjectNotFound, Self::ProjectNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait TaskStore {
    async fn add_task(&mut self, task: Task) -> Result<(), TaskStoreError>;
    async fn get_task(&self, id: &TaskId) -> Result<Task, TaskStoreError>;
    /// Every task, oldest first, optionally limited to one project.
    async fn get_tasks(
        &self,
        project: Option<&ProjectId>,
    ) -> Result<Vec<Task>, TaskStoreError>;
    async fn update_task(&mut self, task: Task) -> Result<(), TaskStoreError>;
    async fn delete_task(&mut self, id: &TaskId)
        -> Result<Task, TaskStoreError>;
    async fn delete_tasks_for_project(
        &mut self,
        project: &ProjectId,
    ) -> Result<(), TaskStoreError>;
    /// Tasks created by `member` or whose only assignee is `member`.
    async fn get_tasks_relying_on(
        &self,
        member: &MemberId,
    ) -> Result<Vec<Task>, TaskStoreError>;
}

#[derive(Debug, Error)]
pub enum TaskStoreError {
    #[error("Task ID exists")]
    TaskIDExists,
    #[error("Task not found")]
    TaskNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for TaskStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::TaskIDExists, Self::TaskIDExists)
                | (Self::TaskNotFound, Self::TaskNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait SessionStore {
    async fn add_session(
        &mut self,
        token: SessionToken,
        member: MemberId,
    ) -> Result<(), SessionStoreError>;
    async fn get_session(
        &self,
        token: &SessionToken,
    ) -> Result<MemberId, SessionStoreError>;
    async fn remove_session(
        &mut self,
        token: &SessionToken,
    ) -> Result<(), SessionStoreError>;
    async fn remove_sessions_for_member(
        &mut self,
        member: &MemberId,
    ) -> Result<(), SessionStoreError>;
}

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session not found")]
    SessionNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for SessionStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::SessionNotFound, Self::SessionNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Storage for the generic CRUD record types.
#[async_trait::async_trait]
pub trait RecordStore<R: Record> {
    async fn list(&self) -> Result<Vec<R>, RecordStoreError>;
    async fn get(&self, id: &R::Id) -> Result<R, RecordStoreError>;
    async fn add(&mut self, record: R) -> Result<(), RecordStoreError>;
    async fn replace(&mut self, record: R) -> Result<(), RecordStoreError>;
    async fn delete(&mut self, id: &R::Id) -> Result<R, RecordStoreError>;
}

#[derive(Debug, Error)]
pub enum RecordStoreError {
    #[error("Record ID exists")]
    RecordIDExists,
    #[error("Record not found")]
    RecordNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for RecordStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::RecordIDExists, Self::RecordIDExists)
                | (Self::RecordNotFound, Self::RecordNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
