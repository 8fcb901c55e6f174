// Planet handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use super::parse_id;
use crate::{error::ApiError, repository::SharedRepository};

/// GET /planets
pub async fn get_all_planets(
    State(repo): State<SharedRepository>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Fetching all planets");

    let planets = repo.list_planets().await?;

    info!("Retrieved {} planets", planets.len());
    Ok((StatusCode::OK, Json(planets)))
}

/// GET /planets/:id
pub async fn get_planet_by_id(
    State(repo): State<SharedRepository>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Fetching planet with id: {}", raw_id);

    let planet_id = parse_id(&raw_id, "Planet")?;

    let planet = repo
        .get_planet(planet_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Planet"))?;

    Ok((StatusCode::OK, Json(planet)))
}
