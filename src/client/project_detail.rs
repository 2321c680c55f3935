use crate::{
    domain::{MemberId, MemberSet, Priority, ProjectId, Status},
    routes::{
        members::MemberRecord,
        projects::{ProjectRecord, ProjectRequest},
    },
};

use super::{ApiClient, ClientError, Credentials, FetchSlot, Navigation};

/// Team membership being edited. Adding and removing return new values.
pub type TeamSelection = MemberSet;

/// The first roster member, in roster order, not already on the team.
pub fn next_candidate(
    roster: &[MemberRecord],
    team: &TeamSelection,
) -> Option<MemberId> {
    roster.iter().map(|m| m.id).find(|id| !team.contains(id))
}

/// Editable snapshot of a project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectForm {
    pub name: String,
    pub status: Status,
    pub priority: Priority,
    pub lead: MemberId,
    pub team: TeamSelection,
    /// Member picked in the add dropdown, if any.
    pub selected: Option<MemberId>,
}

impl From<&ProjectRecord> for ProjectForm {
    fn from(project: &ProjectRecord) -> Self {
        Self {
            name: project.name.clone(),
            status: project.status,
            priority: project.priority,
            lead: project.lead.id,
            team: project.team.iter().map(|m| m.id).collect(),
            selected: None,
        }
    }
}

impl ProjectForm {
    /// The selected member while they can still be added, otherwise the
    /// first roster member off the team.
    pub fn candidate(&self, roster: &[MemberRecord]) -> Option<MemberId> {
        self.selected
            .filter(|id| {
                !self.team.contains(id) && roster.iter().any(|m| m.id == *id)
            })
            .or_else(|| next_candidate(roster, &self.team))
    }

    /// The wire shape: lead and team as plain ids.
    pub fn to_request(&self) -> ProjectRequest {
        ProjectRequest {
            name: Some(self.name.clone()),
            status: Some(self.status.as_str().to_owned()),
            priority: Some(self.priority.as_str().to_owned()),
            lead: Some(self.lead.to_string()),
            team: Some(self.team.iter().map(|id| id.to_string()).collect()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    View,
    Edit(ProjectForm),
}

/// Project detail page: shows a project and lets admins edit or delete it.
#[derive(Debug)]
pub struct ProjectDetailView {
    project_id: ProjectId,
    pub project: FetchSlot<ProjectRecord>,
    pub roster: FetchSlot<Vec<MemberRecord>>,
    mode: Mode,
    form_errors: Vec<String>,
    page_error: Option<String>,
}

impl ProjectDetailView {
    pub fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            project: FetchSlot::default(),
            roster: FetchSlot::default(),
            mode: Mode::View,
            form_errors: vec![],
            page_error: None,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn form_errors(&self) -> &[String] {
        &self.form_errors
    }

    pub fn page_error(&self) -> Option<&str> {
        self.page_error.as_deref()
    }

    /// Fetches whichever slots are empty or stale.
    #[tracing::instrument(name = "Refreshing project detail", skip_all)]
    pub async fn refresh(&mut self, client: &ApiClient, credentials: &Credentials) {
        if self.project.needs_fetch() {
            match client.get_project(credentials, &self.project_id).await {
                Ok(project) => self.project.fill(project),
                Err(e) => self.page_error = Some(e.summary()),
            }
        }

        if self.roster.needs_fetch() {
            match client.get_members(credentials).await {
                Ok(members) => self.roster.fill(members),
                Err(e) => self.page_error = Some(e.summary()),
            }
        }
    }

    /// Enters edit mode with a snapshot of the loaded project.
    pub fn begin_edit(&mut self) -> bool {
        let Some(project) = self.project.value() else {
            return false;
        };
        self.form_errors.clear();
        self.mode = Mode::Edit(ProjectForm::from(project));
        true
    }

    pub fn cancel_edit(&mut self) {
        self.form_errors.clear();
        self.mode = Mode::View;
    }

    pub fn form_mut(&mut self) -> Option<&mut ProjectForm> {
        match &mut self.mode {
            Mode::Edit(form) => Some(form),
            Mode::View => None,
        }
    }

    /// The member the add button would add; `None` disables it.
    pub fn candidate(&self) -> Option<MemberId> {
        let Mode::Edit(form) = &self.mode else {
            return None;
        };
        form.candidate(self.roster.value()?)
    }

    /// Picks who the add button adds. Only roster members off the team
    /// can be picked.
    pub fn select_candidate(&mut self, member: MemberId) -> bool {
        let on_roster = self
            .roster
            .value()
            .is_some_and(|roster| roster.iter().any(|m| m.id == member));

        match self.form_mut() {
            Some(form) if on_roster && !form.team.contains(&member) => {
                form.selected = Some(member);
                true
            }
            _ => false,
        }
    }

    pub fn add_candidate(&mut self) {
        let Some(candidate) = self.candidate() else {
            return;
        };
        if let Some(form) = self.form_mut() {
            form.team = form.team.with(candidate);
            form.selected = None;
        }
    }

    pub fn remove_member(&mut self, member: &MemberId) {
        if let Some(form) = self.form_mut() {
            form.team = form.team.without(member);
            form.selected = None;
        }
    }

    /// Saves the form. Rejections stay on the form; anything else is a
    /// page error.
    #[tracing::instrument(name = "Submitting project form", skip_all)]
    pub async fn submit(&mut self, client: &ApiClient, credentials: &Credentials) {
        let Mode::Edit(form) = &self.mode else {
            return;
        };

        let request = form.to_request();
        let outcome = client
            .update_project(credentials, &self.project_id, &request)
            .await;

        match outcome {
            Ok(_) => {
                self.project.mark_stale();
                self.roster.mark_stale();
                self.form_errors.clear();
                self.mode = Mode::View;
            }
            Err(e) => self.record_failure(e),
        }
    }

    #[tracing::instrument(name = "Deleting project", skip_all)]
    pub async fn delete(
        &mut self,
        client: &ApiClient,
        credentials: &Credentials,
    ) -> Option<Navigation> {
        match client.delete_project(credentials, &self.project_id).await {
            Ok(_) => Some(Navigation::Projects),
            Err(e) => {
                self.page_error = Some(e.summary());
                None
            }
        }
    }

    fn record_failure(&mut self, e: ClientError) {
        if e.is_client_error() {
            self.form_errors = e.messages();
        } else {
            self.page_error = Some(e.summary());
        }
    }
}
