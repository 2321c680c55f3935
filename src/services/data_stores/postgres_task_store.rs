use color_eyre::eyre::eyre;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::domain::{
    MemberId, Priority, ProjectId, SprintId, Status, Task, TaskDescription,
    TaskId, TaskStore, TaskStoreError, TaskTitle,
};

const TASK_COLUMNS: &str = "id, title, description, project_id, date_created, created_by, status, priority, sprint_id, assignees";

pub struct PostgresTaskStore {
    pool: PgPool,
}

impl PostgresTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn task_from_row(row: &PgRow) -> Result<Task, TaskStoreError> {
    let unexpected =
        |e: sqlx::Error| TaskStoreError::UnexpectedError(eyre!(e));

    let status: String = row.try_get("status").map_err(unexpected)?;
    let priority: String = row.try_get("priority").map_err(unexpected)?;
    let sprint: Option<Uuid> = row.try_get("sprint_id").map_err(unexpected)?;
    let assignees: Vec<Uuid> = row.try_get("assignees").map_err(unexpected)?;

    Ok(Task {
        id: TaskId::new(row.try_get("id").map_err(unexpected)?),
        title: TaskTitle::from_stored(
            row.try_get("title").map_err(unexpected)?,
        ),
        description: TaskDescription::from_stored(
            row.try_get("description").map_err(unexpected)?,
        ),
        project: ProjectId::new(row.try_get("project_id").map_err(unexpected)?),
        date_created: row.try_get("date_created").map_err(unexpected)?,
        created_by: MemberId::new(
            row.try_get("created_by").map_err(unexpected)?,
        ),
        status: Status::try_from(status.as_str())
            .map_err(|e| TaskStoreError::UnexpectedError(eyre!(e)))?,
        priority: Priority::try_from(priority.as_str())
            .map_err(|e| TaskStoreError::UnexpectedError(eyre!(e)))?,
        sprint: sprint.map(SprintId::new),
        assignees: assignees.into_iter().map(MemberId::new).collect(),
    })
}

fn assignee_ids(task: &Task) -> Vec<Uuid> {
    task.assignees.iter().map(|m| *m.as_ref()).collect()
}

#[async_trait::async_trait]
impl TaskStore for PostgresTaskStore {
    #[tracing::instrument(name = "Adding task to PostgreSQL", skip_all)]
    async fn add_task(&mut self, task: Task) -> Result<(), TaskStoreError> {
        sqlx::query(
            r#"
            INSERT INTO tasks (id, title, description, project_id, date_created, created_by, status, priority, sprint_id, assignees)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(task.id.as_ref())
        .bind(task.title.as_ref())
        .bind(task.description.as_ref())
        .bind(task.project.as_ref())
        .bind(task.date_created)
        .bind(task.created_by.as_ref())
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .bind(task.sprint.map(|s| *s.as_ref()))
        .bind(assignee_ids(&task))
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                TaskStoreError::TaskIDExists
            }
            err => TaskStoreError::UnexpectedError(eyre!(err)),
        })?;
        Ok(())
    }

    #[tracing::instrument(name = "Getting task from PostgreSQL", skip_all)]
    async fn get_task(&self, id: &TaskId) -> Result<Task, TaskStoreError> {
        let row = sqlx::query(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => TaskStoreError::TaskNotFound,
            err => TaskStoreError::UnexpectedError(eyre!(err)),
        })?;

        task_from_row(&row)
    }

    #[tracing::instrument(name = "Getting tasks from PostgreSQL", skip_all)]
    async fn get_tasks(
        &self,
        project: Option<&ProjectId>,
    ) -> Result<Vec<Task>, TaskStoreError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {TASK_COLUMNS} FROM tasks
            WHERE $1::UUID IS NULL OR project_id = $1
            ORDER BY date_created, id
            "#
        ))
        .bind(project.map(|p| *p.as_ref()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TaskStoreError::UnexpectedError(eyre!(e)))?;

        rows.iter().map(task_from_row).collect()
    }

    #[tracing::instrument(name = "Updating task in PostgreSQL", skip_all)]
    async fn update_task(&mut self, task: Task) -> Result<(), TaskStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $2, description = $3, project_id = $4, status = $5,
                priority = $6, sprint_id = $7, assignees = $8
            WHERE id = $1
            "#,
        )
        .bind(task.id.as_ref())
        .bind(task.title.as_ref())
        .bind(task.description.as_ref())
        .bind(task.project.as_ref())
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .bind(task.sprint.map(|s| *s.as_ref()))
        .bind(assignee_ids(&task))
        .execute(&self.pool)
        .await
        .map_err(|e| TaskStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(TaskStoreError::TaskNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Deleting task from PostgreSQL", skip_all)]
    async fn delete_task(
        &mut self,
        id: &TaskId,
    ) -> Result<Task, TaskStoreError> {
        let row = sqlx::query(&format!(
            "DELETE FROM tasks WHERE id = $1 RETURNING {TASK_COLUMNS}"
        ))
        .bind(id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TaskStoreError::UnexpectedError(eyre!(e)))?
        .ok_or(TaskStoreError::TaskNotFound)?;

        task_from_row(&row)
    }

    #[tracing::instrument(
        name = "Deleting all tasks for project in PostgreSQL",
        skip_all
    )]
    async fn delete_tasks_for_project(
        &mut self,
        project: &ProjectId,
    ) -> Result<(), TaskStoreError> {
        sqlx::query("DELETE FROM tasks WHERE project_id = $1")
            .bind(project.as_ref())
            .execute(&self.pool)
            .await
            .map_err(|e| TaskStoreError::UnexpectedError(eyre!(e)))?;

        Ok(())
    }

    #[tracing::instrument(
        name = "Finding tasks relying on member in PostgreSQL",
        skip_all
    )]
    async fn get_tasks_relying_on(
        &self,
        member: &MemberId,
    ) -> Result<Vec<Task>, TaskStoreError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {TASK_COLUMNS} FROM tasks
            WHERE created_by = $1 OR assignees = ARRAY[$1]::UUID[]
            ORDER BY date_created, id
            "#
        ))
        .bind(member.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TaskStoreError::UnexpectedError(eyre!(e)))?;

        rows.iter().map(task_from_row).collect()
    }
}
