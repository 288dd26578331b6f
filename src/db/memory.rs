use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::{PlayerStore, StoreError};
use crate::models::{PlayerFields, PlayerId, PlayerRecord};

/// Process-local player store. Records are lost when the store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryPlayerStore {
    records: RwLock<HashMap<PlayerId, PlayerRecord>>,
}

impl InMemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = PlayerRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.identifier, record))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }
}

// Same rule as the UNIQUE constraint of the SQLite schema.
fn key_taken(
    records: &HashMap<PlayerId, PlayerRecord>,
    candidate: &PlayerRecord,
    ignore: Option<PlayerId>,
) -> bool {
    records.values().any(|record| {
        Some(record.identifier) != ignore
            && record.has_name_and_birth_date(
                &candidate.first_name,
                &candidate.last_name,
                candidate.birth_date,
            )
    })
}

#[async_trait]
impl PlayerStore for InMemoryPlayerStore {
    async fn fetch_all(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn fetch_by_id(&self, id: PlayerId) -> Result<Option<PlayerRecord>, StoreError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn exists_by_name_and_birth_date(
        &self,
        first_name: &str,
        last_name: &str,
        birth_date: NaiveDate,
    ) -> Result<bool, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .any(|record| record.has_name_and_birth_date(first_name, last_name, birth_date)))
    }

    async fn insert(&self, record: PlayerRecord) -> Result<PlayerRecord, StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.identifier) {
            return Err(StoreError::Backend(format!(
                "duplicate identifier {}",
                record.identifier
            )));
        }
        if key_taken(&records, &record, None) {
            return Err(StoreError::DuplicateKey);
        }
        records.insert(record.identifier, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: PlayerId,
        fields: PlayerFields,
    ) -> Result<Option<PlayerRecord>, StoreError> {
        let mut records = self.records.write().await;
        if !records.contains_key(&id) {
            return Ok(None);
        }
        let updated = PlayerRecord::new(id, fields);
        if key_taken(&records, &updated, Some(id)) {
            return Err(StoreError::DuplicateKey);
        }
        records.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: PlayerId) -> Result<bool, StoreError> {
        Ok(self.records.write().await.remove(&id).is_some())
    }
}
