use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqlitePool;

use super::{PlayerStore, StoreError};
use crate::models::{PlayerFields, PlayerId, PlayerRecord};

#[derive(Debug, Clone)]
pub struct SqlitePlayerStore {
    pool: SqlitePool,
}

impl SqlitePlayerStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// The UNIQUE (first_name, last_name, birth_date) constraint rejects a write
fn map_write_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::DuplicateKey,
        other => StoreError::Database(other),
    }
}

#[async_trait]
impl PlayerStore for SqlitePlayerStore {
    async fn fetch_all(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        let records = sqlx::query_as::<_, PlayerRecord>(
            r#"SELECT identifier, first_name, last_name, birth_date, points FROM players"#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn fetch_by_id(&self, id: PlayerId) -> Result<Option<PlayerRecord>, StoreError> {
        let record = sqlx::query_as::<_, PlayerRecord>(
            r#"SELECT identifier, first_name, last_name, birth_date, points
               FROM players
               WHERE identifier = ?"#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn exists_by_name_and_birth_date(
        &self,
        first_name: &str,
        last_name: &str,
        birth_date: NaiveDate,
    ) -> Result<bool, StoreError> {
        let matches: i64 = sqlx::query_scalar(
            r#"SELECT EXISTS(
                   SELECT 1 FROM players
                   WHERE first_name = ? AND last_name = ? AND birth_date = ?
               )"#
        )
        .bind(first_name)
        .bind(last_name)
        .bind(birth_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(matches > 0)
    }

    async fn insert(&self, record: PlayerRecord) -> Result<PlayerRecord, StoreError> {
        sqlx::query(
            r#"INSERT INTO players (identifier, first_name, last_name, birth_date, points)
               VALUES (?, ?, ?, ?, ?)"#
        )
        .bind(record.identifier)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(record.birth_date)
        .bind(record.points)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(record)
    }

    async fn update(
        &self,
        id: PlayerId,
        fields: PlayerFields,
    ) -> Result<Option<PlayerRecord>, StoreError> {
        let result = sqlx::query(
            r#"UPDATE players
               SET first_name = ?, last_name = ?, birth_date = ?, points = ?
               WHERE identifier = ?"#
        )
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(fields.birth_date)
        .bind(fields.points)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(PlayerRecord::new(id, fields)))
    }

    async fn delete_by_id(&self, id: PlayerId) -> Result<bool, StoreError> {
        let result = sqlx::query(r#"DELETE FROM players WHERE identifier = ?"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
