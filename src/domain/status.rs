use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    validation::{one_of, TextField},
    ValidationError,
};

const STATUS: TextField = TextField::new("Status", "Status", None);
const PRIORITY: TextField = TextField::new("Priority", "Priority", None);

/// Workflow state shared by projects and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Complete,
    Closed,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Open,
        Status::InProgress,
        Status::Complete,
        Status::Closed,
    ];

    pub fn parse(raw: Option<String>) -> Result<Self, ValidationError> {
        let allowed = Self::ALL.map(|s| s.as_str());
        let value = one_of(raw, &STATUS, &allowed)?;
        Self::try_from(value.as_str())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::InProgress => "In Progress",
            Status::Complete => "Complete",
            Status::Closed => "Closed",
        }
    }

    /// Sort position, earliest stage first.
    pub fn rank(&self) -> u8 {
        match self {
            Status::Open => 0,
            Status::InProgress => 1,
            Status::Complete => 2,
            Status::Closed => 3,
        }
    }
}

impl TryFrom<&str> for Status {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| STATUS.invalid_value())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] =
        [Priority::High, Priority::Medium, Priority::Low];

    pub fn parse(raw: Option<String>) -> Result<Self, ValidationError> {
        let allowed = Self::ALL.map(|p| p.as_str());
        let value = one_of(raw, &PRIORITY, &allowed)?;
        Self::try_from(value.as_str())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Sort position, least urgent first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == value)
            .ok_or_else(|| PRIORITY.invalid_value())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
