// Character handlers
// Read-only catalog endpoints for characters

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use super::parse_id;
use crate::{
    error::ApiError,
    models::{CharacterDetail, FavoriteTarget},
    repository::SharedRepository,
};

/// List all characters
/// GET /characters
pub async fn get_all_characters(
    State(repo): State<SharedRepository>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Fetching all characters");

    let characters = repo.list_characters().await?;

    info!("Retrieved {} characters", characters.len());
    Ok((StatusCode::OK, Json(characters)))
}

/// Get a character together with every favorite pointing at it
/// GET /characters/:id
pub async fn get_character_by_id(
    State(repo): State<SharedRepository>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Fetching character with id: {}", raw_id);

    let character_id = parse_id(&raw_id, "Character")?;

    let character = repo
        .get_character(character_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Character"))?;

    let favorites = repo
        .favorites_for_target(FavoriteTarget::Character(character_id))
        .await?;

    Ok((StatusCode::OK, Json(CharacterDetail { character, favorites })))
}
