// Favorite handlers
// Add and remove catalog favorites for the current user

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::info;

use super::parse_id;
use crate::{
    error::ApiError,
    models::{FavoriteKind, CURRENT_USER_ID},
    repository::SharedRepository,
};

/// Links the current user to the catalog entity `kind`/`id` once it is
/// known to exist.
async fn add_favorite(
    repo: SharedRepository,
    kind: FavoriteKind,
    raw_id: String,
) -> Result<impl IntoResponse, ApiError> {
    info!("Adding {} {} to favorites of user {}", kind, raw_id, CURRENT_USER_ID);

    let id = parse_id(&raw_id, kind.entity_name())?;
    let target = kind.target(id);
    if !repo.target_exists(target).await? {
        return Err(ApiError::not_found(kind.entity_name()));
    }

    let favorite = repo.add_favorite(CURRENT_USER_ID, target).await?;

    info!("Successfully created favorite with id: {}", favorite.id);
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// Removes the oldest matching favorite of the current user.
async fn delete_favorite(
    repo: SharedRepository,
    kind: FavoriteKind,
    raw_id: String,
) -> Result<impl IntoResponse, ApiError> {
    info!("Removing {} {} from favorites of user {}", kind, raw_id, CURRENT_USER_ID);

    let id = parse_id(&raw_id, kind.favorite_name())?;

    if !repo.delete_first_favorite(CURRENT_USER_ID, kind.target(id)).await? {
        return Err(ApiError::not_found(kind.favorite_name()));
    }

    Ok((StatusCode::OK, Json(json!({ "message": kind.deleted_message() }))))
}

/// POST /favorite/planet/:id
pub async fn add_planet_favorite(
    State(repo): State<SharedRepository>,
    Path(planet_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    add_favorite(repo, FavoriteKind::Planet, planet_id).await
}

/// POST /favorite/character/:id
pub async fn add_character_favorite(
    State(repo): State<SharedRepository>,
    Path(character_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    add_favorite(repo, FavoriteKind::Character, character_id).await
}

/// POST /favorite/vehicle/:id
pub async fn add_vehicle_favorite(
    State(repo): State<SharedRepository>,
    Path(vehicle_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    add_favorite(repo, FavoriteKind::Vehicle, vehicle_id).await
}

/// DELETE /favorite/planet/:id
pub async fn delete_planet_favorite(
    State(repo): State<SharedRepository>,
    Path(planet_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    delete_favorite(repo, FavoriteKind::Planet, planet_id).await
}

/// DELETE /favorite/character/:id
pub async fn delete_character_favorite(
    State(repo): State<SharedRepository>,
    Path(character_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    delete_favorite(repo, FavoriteKind::Character, character_id).await
}

/// DELETE /favorite/vehicle/:id
pub async fn delete_vehicle_favorite(
    State(repo): State<SharedRepository>,
    Path(vehicle_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    delete_favorite(repo, FavoriteKind::Vehicle, vehicle_id).await
}
