use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Opaque player identifier, generated when the player is created.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct PlayerId(pub uuid::Uuid);

impl PlayerId {
    pub fn new() -> Self {
        PlayerId(uuid::Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

/// Points paired with the position they earn among all stored players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rank {
    pub position: u32,
    pub points: i32,
}

/// Player as returned to API callers, with its rank computed at read time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub identifier: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub rank: Rank,
}

/// Row from the players table. Positions are never stored.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PlayerRecord {
    pub identifier: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub points: i32,
}

impl PlayerRecord {
    pub fn new(identifier: PlayerId, fields: PlayerFields) -> Self {
        Self {
            identifier,
            first_name: fields.first_name,
            last_name: fields.last_name,
            birth_date: fields.birth_date,
            points: fields.points,
        }
    }

    pub fn with_position(self, position: u32) -> Player {
        Player {
            identifier: self.identifier,
            first_name: self.first_name,
            last_name: self.last_name,
            birth_date: self.birth_date,
            rank: Rank {
                position,
                points: self.points,
            },
        }
    }

    pub fn has_name_and_birth_date(
        &self,
        first_name: &str,
        last_name: &str,
        birth_date: NaiveDate,
    ) -> bool {
        self.first_name == first_name
            && self.last_name == last_name
            && self.birth_date == birth_date
    }
}

/// Mutable attributes of a stored player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerFields {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub points: i32,
}

/// Request body for creating a player
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlayerToCreate {
    #[validate(custom(function = "not_blank"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"))]
    pub last_name: String,
    #[validate(custom(function = "not_in_future"))]
    pub birth_date: NaiveDate,
    pub points: i32,
}

impl From<PlayerToCreate> for PlayerFields {
    fn from(player: PlayerToCreate) -> Self {
        PlayerFields {
            first_name: player.first_name,
            last_name: player.last_name,
            birth_date: player.birth_date,
            points: player.points,
        }
    }
}

/// Request body for updating a player. The identifier selects the player and is never changed.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlayerToUpdate {
    pub identifier: PlayerId,
    #[validate(custom(function = "not_blank"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"))]
    pub last_name: String,
    #[validate(custom(function = "not_in_future"))]
    pub birth_date: NaiveDate,
    pub points: i32,
}

impl PlayerToUpdate {
    pub fn fields(&self) -> PlayerFields {
        PlayerFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            birth_date: self.birth_date,
            points: self.points,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

fn not_in_future(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date > chrono::Local::now().date_naive() {
        return Err(
            ValidationError::new("future_date").with_message("must not be in the future".into())
        );
    }
    Ok(())
}

/// Error body rendered by the API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
