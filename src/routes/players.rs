use axum::{
    extract::{Path, State},
    response::Json,
};
use validator::Validate;

use crate::error::ApiError;
use crate::models::{Player, PlayerId, PlayerToCreate, PlayerToUpdate};
use crate::service::PlayerService;

// GET /players - List all players by rank
pub async fn list_players(
    State(service): State<PlayerService>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = service.get_all_players().await?;

    Ok(Json(players))
}

// GET /players/{identifier} - Get player by identifier
pub async fn get_player(
    State(service): State<PlayerService>,
    Path(identifier): Path<PlayerId>,
) -> Result<Json<Player>, ApiError> {
    let player = service.get_by_identifier(identifier).await?;

    Ok(Json(player))
}

// POST /players - Create a player
pub async fn create_player(
    State(service): State<PlayerService>,
    Json(payload): Json<PlayerToCreate>,
) -> Result<Json<Player>, ApiError> {
    payload.validate()?;
    let player = service.create(payload).await?;

    Ok(Json(player))
}

// PUT /players - Update the player named by the body's identifier
pub async fn update_player(
    State(service): State<PlayerService>,
    Json(payload): Json<PlayerToUpdate>,
) -> Result<Json<Player>, ApiError> {
    payload.validate()?;
    let player = service.update(payload).await?;

    Ok(Json(player))
}

// DELETE /players/{identifier} - Delete a player
pub async fn delete_player(
    State(service): State<PlayerService>,
    Path(identifier): Path<PlayerId>,
) -> Result<(), ApiError> {
    service.delete(identifier).await?;

    Ok(())
}
