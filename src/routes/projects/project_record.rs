use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        APIError, Priority, Project, ProjectFields, ProjectId, ProjectName,
        ProjectStoreError, Status, ValidationError, ValidationErrors,
    },
    routes::members::{MemberDirectory, MemberSummary},
};

pub const PROJECT_NOT_FOUND_MESSAGE: &str = "Project not found";

/// A project as sent to clients, with lead and team populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    #[serde(rename = "_id")]
    pub id: ProjectId,
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub status: Status,
    pub priority: Priority,
    pub lead: MemberSummary,
    pub team: Vec<MemberSummary>,
    pub slack_channel_id: Option<String>,
}

impl ProjectRecord {
    pub fn populate(
        project: &Project,
        members: &MemberDirectory,
    ) -> Result<Self, APIError> {
        Ok(Self {
            id: project.id,
            name: project.name.as_ref().to_owned(),
            date_created: project.date_created,
            status: project.status,
            priority: project.priority,
            lead: members.required(&project.lead)?,
            team: members.present(&project.team),
            slack_channel_id: project.slack_channel_id.clone(),
        })
    }
}

/// Body of project create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub name: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub lead: Option<String>,
    pub team: Option<Vec<String>>,
}

impl ProjectRequest {
    /// Runs the field rules; lead and team must name existing members.
    pub fn into_fields(
        self,
        members: &MemberDirectory,
    ) -> Result<ProjectFields, ValidationErrors> {
        let name = ProjectName::parse(self.name);
        let status = Status::parse(self.status);
        let priority = Priority::parse(self.priority);
        let lead = self
            .lead
            .ok_or_else(|| invalid_value("Lead"))
            .and_then(|raw| {
                members.resolve(&raw).ok_or_else(|| {
                    ValidationError::new(
                        "Lead must be an existing member".to_owned(),
                    )
                })
            });
        let team = self
            .team
            .ok_or_else(|| invalid_value("Team"))
            .and_then(|raw| {
                members.resolve_all(&raw).ok_or_else(|| {
                    ValidationError::new(
                        "Team members must be existing members".to_owned(),
                    )
                })
            });

        match (name, status, priority, lead, team) {
            (Ok(name), Ok(status), Ok(priority), Ok(lead), Ok(team)) => {
                Ok(ProjectFields {
                    name,
                    status,
                    priority,
                    lead,
                    team,
                })
            }
            (name, status, priority, lead, team) => {
                Err(ValidationErrors::collect([
                    name.as_ref().err(),
                    status.as_ref().err(),
                    priority.as_ref().err(),
                    lead.as_ref().err(),
                    team.as_ref().err(),
                ]))
            }
        }
    }
}

pub fn invalid_value(field: &str) -> ValidationError {
    ValidationError::new(format!("Invalid value for {field}"))
}

pub fn project_store_error(e: ProjectStoreError) -> APIError {
    match e {
        ProjectStoreError::ProjectNotFound => {
            APIError::not_found(PROJECT_NOT_FOUND_MESSAGE)
        }
        e => APIError::UnexpectedError(eyre!(e)),
    }
}

pub fn parse_project_id(raw: &str) -> Result<ProjectId, APIError> {
    ProjectId::parse(raw)
        .map_err(|_| APIError::not_found(PROJECT_NOT_FOUND_MESSAGE))
}
