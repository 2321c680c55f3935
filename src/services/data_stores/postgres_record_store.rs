use color_eyre::eyre::eyre;
use sqlx::{types::Json, PgPool, Row};
use std::marker::PhantomData;

use crate::domain::{Record, RecordStore, RecordStoreError};

/// Keeps every record type in the shared `records` table, namespaced by
/// [`Record::COLLECTION`], with the serialized record as a JSONB body.
pub struct PostgresRecordStore<R: Record> {
    pool: PgPool,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> PostgresRecordStore<R> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }
}

fn body_from_row<R: Record>(
    row: &sqlx::postgres::PgRow,
) -> Result<R, RecordStoreError> {
    row.try_get::<Json<R>, _>("body")
        .map(|Json(record)| record)
        .map_err(|e| RecordStoreError::UnexpectedError(eyre!(e)))
}

#[async_trait::async_trait]
impl<R: Record> RecordStore<R> for PostgresRecordStore<R> {
    #[tracing::instrument(name = "Listing records from PostgreSQL", skip_all)]
    async fn list(&self) -> Result<Vec<R>, RecordStoreError> {
        let rows = sqlx::query(
            "SELECT body FROM records WHERE collection = $1 ORDER BY created_at, id",
        )
        .bind(R::COLLECTION)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RecordStoreError::UnexpectedError(eyre!(e)))?;

        rows.iter().map(body_from_row::<R>).collect()
    }

    #[tracing::instrument(name = "Getting record from PostgreSQL", skip_all)]
    async fn get(&self, id: &R::Id) -> Result<R, RecordStoreError> {
        let row = sqlx::query(
            "SELECT body FROM records WHERE collection = $1 AND id = $2",
        )
        .bind(R::COLLECTION)
        .bind(id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => RecordStoreError::RecordNotFound,
            err => RecordStoreError::UnexpectedError(eyre!(err)),
        })?;

        body_from_row::<R>(&row)
    }

    #[tracing::instrument(name = "Adding record to PostgreSQL", skip_all)]
    async fn add(&mut self, record: R) -> Result<(), RecordStoreError> {
        sqlx::query(
            "INSERT INTO records (collection, id, body) VALUES ($1, $2, $3)",
        )
        .bind(R::COLLECTION)
        .bind(*record.id().as_ref())
        .bind(Json(record))
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RecordStoreError::RecordIDExists
            }
            err => RecordStoreError::UnexpectedError(eyre!(err)),
        })?;
        Ok(())
    }

    #[tracing::instrument(name = "Replacing record in PostgreSQL", skip_all)]
    async fn replace(&mut self, record: R) -> Result<(), RecordStoreError> {
        let result = sqlx::query(
            "UPDATE records SET body = $3 WHERE collection = $1 AND id = $2",
        )
        .bind(R::COLLECTION)
        .bind(*record.id().as_ref())
        .bind(Json(record))
        .execute(&self.pool)
        .await
        .map_err(|e| RecordStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(RecordStoreError::RecordNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Deleting record from PostgreSQL", skip_all)]
    async fn delete(&mut self, id: &R::Id) -> Result<R, RecordStoreError> {
        let row = sqlx::query(
            "DELETE FROM records WHERE collection = $1 AND id = $2 RETURNING body",
        )
        .bind(R::COLLECTION)
        .bind(id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RecordStoreError::UnexpectedError(eyre!(e)))?
        .ok_or(RecordStoreError::RecordNotFound)?;

        body_from_row::<R>(&row)
    }
}
