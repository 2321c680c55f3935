use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use crate::{
    domain::{Priority, Status},
    routes::projects::ProjectRecord,
};

use super::{
    member_path, project_path, ApiClient, Credentials, FetchSlot,
};

pub const PAGE_SIZES: [usize; 5] = [5, 10, 25, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const EMPTY_LABEL: &str = "No projects to display";
const DATE_FORMAT: &str = "%a, %b %-d, %Y";
const NO_CHANNEL: &str = "N/A";

/// Known statuses in workflow order; anything else sorts last.
pub fn compare_status(a: &str, b: &str) -> Ordering {
    let rank = |s: &str| Status::try_from(s).map(|s| s.rank()).unwrap_or(u8::MAX);
    rank(a).cmp(&rank(b))
}

/// Low before Medium before High; anything else sorts last.
pub fn compare_priority(a: &str, b: &str) -> Ordering {
    let rank =
        |p: &str| Priority::try_from(p).map(|p| p.rank()).unwrap_or(u8::MAX);
    rank(a).cmp(&rank(b))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortColumn {
    Name,
    Status,
    Priority,
    DateCreated,
    Lead,
    SlackChannel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One grid row, formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRow {
    pub name: String,
    pub link: String,
    pub status: String,
    pub priority: String,
    pub created: DateTime<Utc>,
    pub date_created: String,
    pub lead_name: String,
    pub lead_link: String,
    pub slack_channel: String,
}

impl From<&ProjectRecord> for ProjectRow {
    fn from(project: &ProjectRecord) -> Self {
        Self {
            name: project.name.clone(),
            link: project_path(&project.id),
            status: project.status.as_str().to_owned(),
            priority: project.priority.as_str().to_owned(),
            created: project.date_created,
            date_created: project.date_created.format(DATE_FORMAT).to_string(),
            lead_name: project.lead.full_name(),
            lead_link: member_path(&project.lead.id),
            slack_channel: project
                .slack_channel_id
                .clone()
                .unwrap_or_else(|| NO_CHANNEL.to_owned()),
        }
    }
}

impl ProjectRow {
    fn compare(&self, other: &Self, column: SortColumn) -> Ordering {
        match column {
            SortColumn::Name => self.name.cmp(&other.name),
            SortColumn::Status => compare_status(&self.status, &other.status),
            SortColumn::Priority => {
                compare_priority(&self.priority, &other.priority)
            }
            SortColumn::DateCreated => self.created.cmp(&other.created),
            SortColumn::Lead => self.lead_name.cmp(&other.lead_name),
            SortColumn::SlackChannel => {
                self.slack_channel.cmp(&other.slack_channel)
            }
        }
    }
}

/// The project grid: sortable by any column and paginated.
#[derive(Debug)]
pub struct ProjectList {
    pub projects: FetchSlot<Vec<ProjectRecord>>,
    sort: Option<(SortColumn, SortDirection)>,
    page_size: usize,
    page: usize,
    error: Option<String>,
}

impl Default for ProjectList {
    fn default() -> Self {
        Self {
            projects: FetchSlot::default(),
            sort: None,
            page_size: DEFAULT_PAGE_SIZE,
            page: 0,
            error: None,
        }
    }
}

impl ProjectList {
    #[tracing::instrument(name = "Refreshing project list", skip_all)]
    pub async fn refresh(&mut self, client: &ApiClient, credentials: &Credentials) {
        if !self.projects.needs_fetch() {
            return;
        }

        match client.get_projects(credentials).await {
            Ok(projects) => {
                self.projects.fill(projects);
                self.error = None;
                self.page = self.page.min(self.page_count().saturating_sub(1));
            }
            Err(e) => self.error = Some(e.summary()),
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn sort_by(&mut self, column: SortColumn, direction: SortDirection) {
        self.sort = Some((column, direction));
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Switches to one of [`PAGE_SIZES`] and returns to the first page.
    /// Other sizes are ignored.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if !PAGE_SIZES.contains(&size) {
            return false;
        }
        self.page_size = size;
        self.page = 0;
        true
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.page_count().saturating_sub(1));
    }

    pub fn page_count(&self) -> usize {
        let total = self.projects.value().map_or(0, Vec::len);
        total.div_ceil(self.page_size).max(1)
    }

    /// Shown instead of the grid when there is nothing to list.
    pub fn empty_label(&self) -> Option<&'static str> {
        match self.projects.value() {
            Some(projects) if projects.is_empty() => Some(EMPTY_LABEL),
            _ => None,
        }
    }

    /// Rows of the current page in the current sort order.
    pub fn rows(&self) -> Vec<ProjectRow> {
        let Some(projects) = self.projects.value() else {
            return vec![];
        };

        let mut rows: Vec<ProjectRow> =
            projects.iter().map(ProjectRow::from).collect();
        if let Some((column, direction)) = self.sort {
            rows.sort_by(|a, b| {
                let ordering = a.compare(b, column);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        rows.into_iter()
            .skip(self.page * self.page_size)
            .take(self.page_size)
            .collect()
    }
}
