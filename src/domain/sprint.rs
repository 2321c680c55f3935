use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    validation::{escape_html, required_text, TextField, MAX_TEXT_CHARACTERS},
    ProjectId, Record, SprintId, ValidationError, ValidationErrors,
};

const SPRINT_NAME: TextField =
    TextField::new("Name", "Sprint name", Some(MAX_TEXT_CHARACTERS));
const PROJECT: TextField = TextField::new("Project", "Project", None);
const START_DATE: TextField = TextField::new("Start Date", "Start date", None);
const END_DATE: TextField = TextField::new("End Date", "End date", None);

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    #[serde(rename = "_id")]
    pub id: SprintId,
    pub name: String,
    pub project: ProjectId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintInput {
    pub name: Option<String>,
    pub project: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl Record for Sprint {
    type Id = SprintId;
    type Input = SprintInput;

    const COLLECTION: &'static str = "sprints";
    const DISPLAY_NAME: &'static str = "Sprint";

    fn id(&self) -> SprintId {
        self.id
    }

    fn parse_id(raw: &str) -> Result<SprintId, ValidationError> {
        SprintId::parse(raw)
    }

    fn from_input(
        id: SprintId,
        input: SprintInput,
    ) -> Result<Self, ValidationErrors> {
        let name = required_text(input.name, &SPRINT_NAME)
            .map(|name| escape_html(&name));
        let project = input
            .project
            .as_deref()
            .and_then(|raw| Uuid::try_parse(raw.trim()).ok())
            .map(ProjectId::new)
            .ok_or_else(|| PROJECT.invalid_value());
        let start_date = parse_date(input.start_date, &START_DATE);
        let end_date = parse_date(input.end_date, &END_DATE).and_then(|end| {
            match &start_date {
                Ok(start) if end < *start => Err(ValidationError::new(
                    "End date cannot be before start date".to_owned(),
                )),
                _ => Ok(end),
            }
        });

        match (name, project, start_date, end_date) {
            (Ok(name), Ok(project), Ok(start_date), Ok(end_date)) => {
                Ok(Sprint {
                    id,
                    name,
                    project,
                    start_date,
                    end_date,
                })
            }
            (name, project, start_date, end_date) => {
                Err(ValidationErrors::collect([
                    name.as_ref().err(),
                    project.as_ref().err(),
                    start_date.as_ref().err(),
                    end_date.as_ref().err(),
                ]))
            }
        }
    }
}

fn parse_date(
    raw: Option<String>,
    field: &TextField,
) -> Result<NaiveDate, ValidationError> {
    raw.as_deref()
        .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok())
        .ok_or_else(|| field.invalid_value())
}
