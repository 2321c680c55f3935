use color_eyre::eyre::eyre;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::domain::{
    MemberId, Priority, Project, ProjectId, ProjectName, ProjectStore,
    ProjectStoreError, Status,
};

const PROJECT_COLUMNS: &str =
    "id, name, date_created, status, priority, lead_id, team, slack_channel_id";

pub struct PostgresProjectStore {
    pool: PgPool,
}

impl PostgresProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn project_from_row(row: &PgRow) -> Result<Project, ProjectStoreError> {
    let unexpected =
        |e: sqlx::Error| ProjectStoreError::UnexpectedError(eyre!(e));

    let status: String = row.try_get("status").map_err(unexpected)?;
    let priority: String = row.try_get("priority").map_err(unexpected)?;
    let team: Vec<Uuid> = row.try_get("team").map_err(unexpected)?;

    Ok(Project {
        id: ProjectId::new(row.try_get("id").map_err(unexpected)?),
        name: ProjectName::from_stored(
            row.try_get("name").map_err(unexpected)?,
        ),
        date_created: row.try_get("date_created").map_err(unexpected)?,
        status: Status::try_from(status.as_str())
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?,
        priority: Priority::try_from(priority.as_str())
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?,
        lead: MemberId::new(row.try_get("lead_id").map_err(unexpected)?),
        team: team.into_iter().map(MemberId::new).collect(),
        slack_channel_id: row
            .try_get("slack_channel_id")
            .map_err(unexpected)?,
    })
}

fn team_ids(project: &Project) -> Vec<Uuid> {
    project.team.iter().map(|m| *m.as_ref()).collect()
}

#[async_trait::async_trait]
impl ProjectStore for PostgresProjectStore {
    #[tracing::instrument(name = "Adding project to PostgreSQL", skip_all)]
    async fn add_project(
        &mut self,
        project: Project,
    ) -> Result<(), ProjectStoreError> {
        sqlx::query(
            r#"
            INSERT INTO projects (id, name, date_created, status, priority, lead_id, team, slack_channel_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(project.id.as_ref())
        .bind(project.name.as_ref())
        .bind(project.date_created)
        .bind(project.status.as_str())
        .bind(project.priority.as_str())
        .bind(project.lead.as_ref())
        .bind(team_ids(&project))
        .bind(project.slack_channel_id.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ProjectStoreError::ProjectIDExists
            }
            err => ProjectStoreError::UnexpectedError(eyre!(err)),
        })?;
        Ok(())
    }

    #[tracing::instrument(name = "Getting project from PostgreSQL", skip_all)]
    async fn get_project(
        &self,
        id: &ProjectId,
    ) -> Result<Project, ProjectStoreError> {
        let row = sqlx::query(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ProjectStoreError::ProjectNotFound,
            err => ProjectStoreError::UnexpectedError(eyre!(err)),
        })?;

        project_from_row(&row)
    }

    #[tracing::instrument(
        name = "Getting project list from PostgreSQL",
        skip_all
    )]
    async fn get_projects(&self) -> Result<Vec<Project>, ProjectStoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY date_created, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        rows.iter().map(project_from_row).collect()
    }

    #[tracing::instrument(name = "Updating project in PostgreSQL", skip_all)]
    async fn update_project(
        &mut self,
        project: Project,
    ) -> Result<(), ProjectStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET name = $2, status = $3, priority = $4, lead_id = $5, team = $6,
                slack_channel_id = $7
            WHERE id = $1
            "#,
        )
        .bind(project.id.as_ref())
        .bind(project.name.as_ref())
        .bind(project.status.as_str())
        .bind(project.priority.as_str())
        .bind(project.lead.as_ref())
        .bind(team_ids(&project))
        .bind(project.slack_channel_id.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::ProjectNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Deleting project from PostgreSQL", skip_all)]
    async fn delete_project(
        &mut self,
        id: &ProjectId,
    ) -> Result<Project, ProjectStoreError> {
        let row = sqlx::query(&format!(
            "DELETE FROM projects WHERE id = $1 RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?
        .ok_or(ProjectStoreError::ProjectNotFound)?;

        project_from_row(&row)
    }

    #[tracing::instrument(
        name = "Finding projects relying on member in PostgreSQL",
        skip_all
    )]
    async fn get_projects_relying_on(
        &self,
        member: &MemberId,
    ) -> Result<Vec<Project>, ProjectStoreError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {PROJECT_COLUMNS} FROM projects
            WHERE lead_id = $1 OR team = ARRAY[$1]::UUID[]
            ORDER BY date_created, id
            "#
        ))
        .bind(member.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        rows.iter().map(project_from_row).collect()
    }
}
