use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    validation::{escape_html, required_text, TextField, MAX_TEXT_CHARACTERS},
    MemberId, MemberSet, Priority, ProjectId, SprintId, Status, TaskId,
    ValidationError,
};

const TITLE: TextField =
    TextField::new("Title", "Task title", Some(MAX_TEXT_CHARACTERS));
const DESCRIPTION: TextField =
    TextField::new("Description", "Task description", None);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    pub fn parse(raw: Option<String>) -> Result<Self, ValidationError> {
        let title = required_text(raw, &TITLE)?;
        Ok(Self(escape_html(&title)))
    }

    pub fn from_stored(title: String) -> Self {
        Self(title)
    }
}

impl AsRef<String> for TaskTitle {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    pub fn parse(raw: Option<String>) -> Result<Self, ValidationError> {
        let description = required_text(raw, &DESCRIPTION)?;
        Ok(Self(escape_html(&description)))
    }

    pub fn from_stored(description: String) -> Self {
        Self(description)
    }
}

impl AsRef<String> for TaskDescription {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

/// Everything a create or update request may set on a task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFields {
    pub title: TaskTitle,
    pub description: TaskDescription,
    pub project: ProjectId,
    pub status: Status,
    pub priority: Priority,
    pub sprint: Option<SprintId>,
    pub assignees: MemberSet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: TaskTitle,
    pub description: TaskDescription,
    pub project: ProjectId,
    pub date_created: DateTime<Utc>,
    pub created_by: MemberId,
    pub status: Status,
    pub priority: Priority,
    pub sprint: Option<SprintId>,
    pub assignees: MemberSet,
}

impl Task {
    pub fn new(fields: TaskFields, created_by: MemberId) -> Self {
        Self {
            id: TaskId::default(),
            title: fields.title,
            description: fields.description,
            project: fields.project,
            date_created: Utc::now(),
            created_by,
            status: fields.status,
            priority: fields.priority,
            sprint: fields.sprint,
            assignees: fields.assignees,
        }
    }

    pub fn apply(&mut self, fields: TaskFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.project = fields.project;
        self.status = fields.status;
        self.priority = fields.priority;
        self.sprint = fields.sprint;
        self.assignees = fields.assignees;
    }

    /// True when removing `member` would leave this task without its
    /// creator or without any assignee.
    pub fn relies_solely_on(&self, member: &MemberId) -> bool {
        self.created_by == *member || self.assignees.is_sole(member)
    }
}
