use color_eyre::eyre::eyre;
use secrecy::{ExposeSecret, Secret};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::domain::{
    Member, MemberId, MemberPasswordHash, MemberStore, MemberStoreError,
    Password, PersonName, Privilege, Role, Username,
};

const MEMBER_COLUMNS: &str = "id, first_name, last_name, date_joined, role, privilege, username, password_hash";

pub struct PostgresMemberStore {
    pool: PgPool,
}

impl PostgresMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn member_from_row(row: &PgRow) -> Result<Member, MemberStoreError> {
    let unexpected =
        |e: sqlx::Error| MemberStoreError::UnexpectedError(eyre!(e));

    let privilege: String = row.try_get("privilege").map_err(unexpected)?;
    let password_hash: String =
        row.try_get("password_hash").map_err(unexpected)?;

    Ok(Member {
        id: MemberId::new(row.try_get::<Uuid, _>("id").map_err(unexpected)?),
        first_name: PersonName::from_stored(
            row.try_get("first_name").map_err(unexpected)?,
        ),
        last_name: PersonName::from_stored(
            row.try_get("last_name").map_err(unexpected)?,
        ),
        date_joined: row.try_get("date_joined").map_err(unexpected)?,
        role: Role::from_stored(row.try_get("role").map_err(unexpected)?),
        privilege: Privilege::try_from(privilege.as_str())
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?,
        username: Username::from_stored(
            row.try_get("username").map_err(unexpected)?,
        ),
        hash: MemberPasswordHash::parse(Secret::new(password_hash))
            .map_err(MemberStoreError::UnexpectedError)?,
    })
}

#[async_trait::async_trait]
impl MemberStore for PostgresMemberStore {
    #[tracing::instrument(name = "Adding member to PostgreSQL", skip_all)]
    async fn add_member(
        &mut self,
        member: Member,
    ) -> Result<(), MemberStoreError> {
        sqlx::query(
            r#"
            INSERT INTO members (id, first_name, last_name, date_joined, role, privilege, username, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(member.id.as_ref())
        .bind(member.first_name.as_ref())
        .bind(member.last_name.as_ref())
        .bind(member.date_joined)
        .bind(member.role.as_ref())
        .bind(member.privilege.as_str())
        .bind(member.username.as_ref())
        .bind(member.hash.as_ref().expose_secret())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                MemberStoreError::UsernameTaken
            }
            err => MemberStoreError::UnexpectedError(eyre!(err)),
        })?;
        Ok(())
    }

    #[tracing::instrument(name = "Retrieving member from PostgreSQL", skip_all)]
    async fn get_member(
        &self,
        id: &MemberId,
    ) -> Result<Member, MemberStoreError> {
        let row = sqlx::query(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1"
        ))
        .bind(id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => MemberStoreError::MemberNotFound,
            err => MemberStoreError::UnexpectedError(eyre!(err)),
        })?;

        member_from_row(&row)
    }

    #[tracing::instrument(
        name = "Retrieving member by username from PostgreSQL",
        skip_all
    )]
    async fn get_member_by_username(
        &self,
        username: &Username,
    ) -> Result<Member, MemberStoreError> {
        let row = sqlx::query(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE username = $1"
        ))
        .bind(username.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => MemberStoreError::MemberNotFound,
            err => MemberStoreError::UnexpectedError(eyre!(err)),
        })?;

        member_from_row(&row)
    }

    #[tracing::instrument(name = "Listing members from PostgreSQL", skip_all)]
    async fn get_members(&self) -> Result<Vec<Member>, MemberStoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY date_joined, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        rows.iter().map(member_from_row).collect()
    }

    #[tracing::instrument(
        name = "Checking username uniqueness in PostgreSQL",
        skip_all
    )]
    async fn username_taken(
        &self,
        username: &Username,
        excluding: Option<&MemberId>,
    ) -> Result<bool, MemberStoreError> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM members
                WHERE username = $1 AND ($2::UUID IS NULL OR id <> $2)
            ) AS taken
            "#,
        )
        .bind(username.as_ref())
        .bind(excluding.map(|id| *id.as_ref()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        row.try_get("taken")
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(name = "Updating member in PostgreSQL", skip_all)]
    async fn update_member(
        &mut self,
        member: Member,
    ) -> Result<(), MemberStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE members
            SET first_name = $2, last_name = $3, role = $4, privilege = $5,
                username = $6, password_hash = $7
            WHERE id = $1
            "#,
        )
        .bind(member.id.as_ref())
        .bind(member.first_name.as_ref())
        .bind(member.last_name.as_ref())
        .bind(member.role.as_ref())
        .bind(member.privilege.as_str())
        .bind(member.username.as_ref())
        .bind(member.hash.as_ref().expose_secret())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                MemberStoreError::UsernameTaken
            }
            err => MemberStoreError::UnexpectedError(eyre!(err)),
        })?;

        if result.rows_affected() == 0 {
            return Err(MemberStoreError::MemberNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Deleting member from PostgreSQL", skip_all)]
    async fn delete_member(
        &mut self,
        id: &MemberId,
    ) -> Result<Member, MemberStoreError> {
        let row = sqlx::query(&format!(
            "DELETE FROM members WHERE id = $1 RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?
        .ok_or(MemberStoreError::MemberNotFound)?;

        member_from_row(&row)
    }

    #[tracing::instrument(
        name = "Validating member credentials in PostgreSQL",
        skip_all
    )]
    async fn validate_member(
        &self,
        username: &Username,
        password: &Password,
    ) -> Result<Member, MemberStoreError> {
        let member = self.get_member_by_username(username).await?;
        member
            .hash
            .verify(password.as_ref())
            .await
            .map_err(|_| MemberStoreError::InvalidCredentials)?;
        Ok(member)
    }
}
