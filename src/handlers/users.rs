// User handlers
// HTTP handlers for users and the current user's favorites

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::info;

use crate::{
    error::ApiError,
    models::CURRENT_USER_ID,
    repository::SharedRepository,
};

/// Get all users
/// GET /users
pub async fn get_all_users(
    State(repo): State<SharedRepository>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Fetching all users");

    let users = repo.list_users().await?;

    info!("Retrieved {} users", users.len());
    Ok((StatusCode::OK, Json(users)))
}

/// Get the favorites of the current user
/// GET /users/favorites
pub async fn get_user_favorites(
    State(repo): State<SharedRepository>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Fetching favorites for user {}", CURRENT_USER_ID);

    if repo.get_user(CURRENT_USER_ID).await?.is_none() {
        return Err(ApiError::not_found("User"));
    }

    let favorites = repo.favorites_for_user(CURRENT_USER_ID).await?;

    info!("Retrieved {} favorites", favorites.len());
    Ok((StatusCode::OK, Json(favorites)))
}
