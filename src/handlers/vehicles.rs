// src/handlers/vehicles.rs
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use super::{current_vehicles, AppState};
use crate::models::{Vehicle, VehicleKind};
use crate::services::catalog::{find_vehicle, group_by_segment, vehicles_of_kind, SegmentGroup};

#[derive(Debug, Deserialize)]
pub struct VehicleListQuery {
    pub kind: Option<VehicleKind>,
}

#[derive(Serialize)]
struct VehicleListResponse {
    kind: Option<VehicleKind>,
    count: usize,
    groups: Vec<SegmentGroup>,
}

pub async fn list_vehicles(query: VehicleListQuery, state: Arc<AppState>) -> Result<Json, Rejection> {
    info!("Handling request to list vehicles (kind: {:?})", query.kind);

    let vehicles = current_vehicles(&state).await?;
    let selected: Vec<&Vehicle> = match query.kind {
        Some(kind) => vehicles_of_kind(&vehicles, kind),
        None => vehicles.iter().collect(),
    };

    Ok(warp::reply::json(&VehicleListResponse {
        kind: query.kind,
        count: selected.len(),
        groups: group_by_segment(&selected),
    }))
}

pub async fn get_vehicle(id: String, state: Arc<AppState>) -> Result<Json, Rejection> {
    info!("Handling request to get vehicle {}", id);

    let vehicles = current_vehicles(&state).await?;
    match find_vehicle(&vehicles, &id) {
        Some(vehicle) => Ok(warp::reply::json(vehicle)),
        None => Err(warp::reject::custom(ApiError::not_found(format!("No vehicle with id {}", id)))),
    }
}
