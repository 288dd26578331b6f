use std::sync::Arc;

use chrono::NaiveDate;

use crate::db::{PlayerStore, StoreError};
use crate::models::{Player, PlayerFields, PlayerId, PlayerRecord, PlayerToCreate, PlayerToUpdate};
use crate::rank::rank_players;

#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Player with identifier {0} could not be found.")]
    NotFound(PlayerId),

    #[error(
        "Player with first name {first_name}, last name {last_name} \
         and birth date {birth_date} already exists."
    )]
    AlreadyExists {
        first_name: String,
        last_name: String,
        birth_date: NaiveDate,
    },

    #[error(transparent)]
    Storage(#[from] StoreError),
}

pub type PlayerResult<T> = Result<T, PlayerError>;

impl PlayerError {
    fn already_exists(fields: &PlayerFields) -> Self {
        PlayerError::AlreadyExists {
            first_name: fields.first_name.clone(),
            last_name: fields.last_name.clone(),
            birth_date: fields.birth_date,
        }
    }

    /// A write rejected by the store's uniqueness key is reported like the
    /// existence check would have reported it.
    fn from_write(err: StoreError, fields: &PlayerFields) -> Self {
        match err {
            StoreError::DuplicateKey => {
                tracing::warn!(
                    "Store rejected {} {} born {}: key already taken",
                    fields.first_name,
                    fields.last_name,
                    fields.birth_date
                );
                Self::already_exists(fields)
            }
            other => other.into(),
        }
    }
}

/// Business rules for tennis players. Ranks are derived from the full set of
/// stored players on every read and are never written back.
#[derive(Clone)]
pub struct PlayerService {
    store: Arc<dyn PlayerStore>,
}

impl PlayerService {
    pub fn new(store: Arc<dyn PlayerStore>) -> Self {
        Self { store }
    }

    pub async fn get_all_players(&self) -> PlayerResult<Vec<Player>> {
        let records = self.store.fetch_all().await?;
        tracing::debug!("Ranking {} players", records.len());
        Ok(rank_players(records))
    }

    pub async fn get_by_identifier(&self, id: PlayerId) -> PlayerResult<Player> {
        if self.store.fetch_by_id(id).await?.is_none() {
            tracing::debug!("Player {} not found", id);
            return Err(PlayerError::NotFound(id));
        }

        self.get_all_players()
            .await?
            .into_iter()
            .find(|player| player.identifier == id)
            // deleted between the two reads
            .ok_or(PlayerError::NotFound(id))
    }

    pub async fn create(&self, player: PlayerToCreate) -> PlayerResult<Player> {
        let fields = PlayerFields::from(player);
        if self
            .store
            .exists_by_name_and_birth_date(&fields.first_name, &fields.last_name, fields.birth_date)
            .await?
        {
            tracing::warn!(
                "Rejected duplicate player {} {} born {}",
                fields.first_name,
                fields.last_name,
                fields.birth_date
            );
            return Err(PlayerError::already_exists(&fields));
        }

        let record = PlayerRecord::new(PlayerId::new(), fields.clone());
        let created = self
            .store
            .insert(record)
            .await
            .map_err(|err| PlayerError::from_write(err, &fields))?;
        tracing::info!(
            "Created player {} ({} {})",
            created.identifier,
            created.first_name,
            created.last_name
        );

        self.get_by_identifier(created.identifier).await
    }

    pub async fn update(&self, player: PlayerToUpdate) -> PlayerResult<Player> {
        let id = player.identifier;
        let Some(existing) = self.store.fetch_by_id(id).await? else {
            tracing::warn!("Cannot update unknown player {}", id);
            return Err(PlayerError::NotFound(id));
        };

        let fields = player.fields();
        let (first_name, last_name, birth_date) =
            (&fields.first_name, &fields.last_name, fields.birth_date);
        let renamed = !existing.has_name_and_birth_date(first_name, last_name, birth_date);
        if renamed
            && self
                .store
                .exists_by_name_and_birth_date(first_name, last_name, birth_date)
                .await?
        {
            tracing::warn!(
                "Cannot update player {}: {} {} born {} is already taken",
                id,
                fields.first_name,
                fields.last_name,
                fields.birth_date
            );
            return Err(PlayerError::already_exists(&fields));
        }

        self.store
            .update(id, fields.clone())
            .await
            .map_err(|err| PlayerError::from_write(err, &fields))?
            .ok_or(PlayerError::NotFound(id))?;
        tracing::info!("Updated player {}", id);

        self.get_by_identifier(id).await
    }

    pub async fn delete(&self, id: PlayerId) -> PlayerResult<()> {
        if !self.store.delete_by_id(id).await? {
            tracing::warn!("Cannot delete unknown player {}", id);
            return Err(PlayerError::NotFound(id));
        }

        tracing::info!("Deleted player {}", id);
        Ok(())
    }
}
