use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqlitePool;

use crate::models::{PlayerFields, PlayerId, PlayerRecord};

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryPlayerStore;
pub use sqlite::SqlitePlayerStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    /// Another record already holds this first name, last name and birth date
    #[error("Duplicate player name and birth date")]
    DuplicateKey,
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Durable storage of player records, keyed by identifier
#[async_trait]
pub trait PlayerStore: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<PlayerRecord>, StoreError>;

    async fn fetch_by_id(&self, id: PlayerId) -> Result<Option<PlayerRecord>, StoreError>;

    async fn exists_by_name_and_birth_date(
        &self,
        first_name: &str,
        last_name: &str,
        birth_date: NaiveDate,
    ) -> Result<bool, StoreError>;

    /// Fails with `StoreError::DuplicateKey` when the uniqueness key is taken
    async fn insert(&self, record: PlayerRecord) -> Result<PlayerRecord, StoreError>;

    /// Returns `None` when no record has this identifier. Fails with
    /// `StoreError::DuplicateKey` when another record holds the new uniqueness key.
    async fn update(
        &self,
        id: PlayerId,
        fields: PlayerFields,
    ) -> Result<Option<PlayerRecord>, StoreError>;

    /// Returns `false` when no record has this identifier
    async fn delete_by_id(&self, id: PlayerId) -> Result<bool, StoreError>;
}

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS players (
               identifier BLOB PRIMARY KEY NOT NULL,
               first_name TEXT NOT NULL,
               last_name TEXT NOT NULL,
               birth_date TEXT NOT NULL,
               points INTEGER NOT NULL,
               UNIQUE (first_name, last_name, birth_date)
           )"#
    )
    .execute(pool)
    .await?;

    Ok(())
}
