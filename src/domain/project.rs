use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    validation::{escape_html, required_text, TextField, MAX_TEXT_CHARACTERS},
    MemberId, MemberSet, Priority, ProjectId, Status, ValidationError,
};

const PROJECT_NAME: TextField =
    TextField::new("Name", "Project name", Some(MAX_TEXT_CHARACTERS));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(raw: Option<String>) -> Result<Self, ValidationError> {
        let name = required_text(raw, &PROJECT_NAME)?;
        Ok(Self(escape_html(&name)))
    }

    pub fn from_stored(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<String> for ProjectName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

/// Everything a create or update request may set on a project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectFields {
    pub name: ProjectName,
    pub status: Status,
    pub priority: Priority,
    pub lead: MemberId,
    pub team: MemberSet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub name: ProjectName,
    pub date_created: DateTime<Utc>,
    pub status: Status,
    pub priority: Priority,
    pub lead: MemberId,
    pub team: MemberSet,
    pub slack_channel_id: Option<String>,
}

impl Project {
    pub fn new(fields: ProjectFields) -> Self {
        Self {
            id: ProjectId::default(),
            name: fields.name,
            date_created: Utc::now(),
            status: fields.status,
            priority: fields.priority,
            lead: fields.lead,
            team: fields.team,
            slack_channel_id: None,
        }
    }

    /// Replaces the editable fields; creation date and channel are kept.
    pub fn apply(&mut self, fields: ProjectFields) {
        self.name = fields.name;
        self.status = fields.status;
        self.priority = fields.priority;
        self.lead = fields.lead;
        self.team = fields.team;
    }

    /// True when removing `member` would leave this project without a lead
    /// or without any team.
    pub fn relies_solely_on(&self, member: &MemberId) -> bool {
        self.lead == *member || self.team.is_sole(member)
    }
}
