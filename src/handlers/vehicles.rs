use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use super::parse_id;
use crate::{error::ApiError, repository::SharedRepository};

/// GET /vehicles
pub async fn get_all_vehicles(
    State(repo): State<SharedRepository>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Fetching all vehicles");

    let vehicles = repo.list_vehicles().await?;

    Ok((StatusCode::OK, Json(vehicles)))
}

/// GET /vehicles/:id
pub async fn get_vehicle_by_id(
    State(repo): State<SharedRepository>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Fetching vehicle with id: {}", raw_id);

    let vehicle_id = parse_id(&raw_id, "Vehicle")?;

    let vehicle = repo
        .get_vehicle(vehicle_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Vehicle"))?;

    Ok((StatusCode::OK, Json(vehicle)))
}
