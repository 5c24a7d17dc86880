// src/handlers/cost.rs
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use super::{current_vehicles, validate_period, validate_price, AppState};
use crate::models::{OwnershipMode, Vehicle, VehicleKind};
use crate::services::catalog::find_vehicle;
use crate::services::cost_model::{compute_total, default_mode, CostInputs, CostOutcome, DisplayBreakdown};
use crate::services::currency::Currency;

#[derive(Debug, Deserialize)]
pub struct CostQuery {
    pub vehicle_id: Option<String>,
    pub kind: Option<VehicleKind>,
    pub period: Option<u32>,
    pub mode: Option<OwnershipMode>,
    pub currency: Option<Currency>,
    pub electricity_price: Option<f64>,
    pub fuel_price: Option<f64>,
}

#[derive(Serialize)]
pub(crate) struct CostResponse {
    pub outcome: CostOutcome,
    pub display: Option<DisplayBreakdown>,
}

impl CostResponse {
    pub(crate) fn new(outcome: CostOutcome, currency: Currency) -> Self {
        let display = outcome.breakdown().map(|b| b.render(currency));
        CostResponse { outcome, display }
    }
}

/// Look up the selected vehicle and settle which side it is costed as.
/// An empty id counts as nothing selected.
pub(crate) fn resolve_side<'a>(
    vehicles: &'a [Vehicle],
    vehicle_id: Option<&str>,
    requested: Option<VehicleKind>,
) -> Result<(Option<&'a Vehicle>, VehicleKind), Rejection> {
    let vehicle_id = vehicle_id.map(str::trim).filter(|id| !id.is_empty());

    let Some(id) = vehicle_id else {
        let kind = requested.ok_or_else(|| {
            warp::reject::custom(ApiError::bad_request("kind is required when no vehicle is selected"))
        })?;
        return Ok((None, kind));
    };

    let vehicle = find_vehicle(vehicles, id)
        .ok_or_else(|| warp::reject::custom(ApiError::not_found(format!("No vehicle with id {}", id))))?;

    let kind = match (requested, vehicle.kind()) {
        (Some(requested), Some(actual)) if requested != actual => {
            return Err(warp::reject::custom(ApiError::bad_request(format!(
                "vehicle {} is an {}, not an {}",
                id,
                actual.label(),
                requested.label()
            ))));
        }
        (Some(kind), _) | (None, Some(kind)) => kind,
        (None, None) => {
            return Err(warp::reject::custom(ApiError::bad_request(format!(
                "vehicle {} has no fuel type; pass kind explicitly",
                id
            ))));
        }
    };

    Ok((Some(vehicle), kind))
}

pub async fn get_cost(query: CostQuery, state: Arc<AppState>) -> Result<Json, Rejection> {
    info!("Handling cost request: {:?}", query);

    let period_months = validate_period(&state, query.period)?;
    let electricity_price = validate_price("electricity_price", query.electricity_price)?;
    let fuel_price = validate_price("fuel_price", query.fuel_price)?;
    let currency = query.currency.unwrap_or(state.cost.base_currency);

    let vehicles = current_vehicles(&state).await?;
    let (vehicle, kind) = resolve_side(&vehicles, query.vehicle_id.as_deref(), query.kind)?;

    let inputs = CostInputs {
        period_months,
        mode: query.mode.unwrap_or_else(|| default_mode(kind)),
        electricity_price,
        fuel_price,
        currency,
    };
    let outcome = compute_total(vehicle, kind, &inputs, &state.cost);
    debug!("Cost outcome: {:?}", outcome);

    Ok(warp::reply::json(&CostResponse::new(outcome, currency)))
}
