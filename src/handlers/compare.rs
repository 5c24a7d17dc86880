// src/handlers/compare.rs
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};
use warp::reply::Json;
use warp::Rejection;

use super::cost::{resolve_side, CostResponse};
use super::{current_vehicles, validate_period, validate_price, AppState};
use crate::models::{OwnershipMode, VehicleKind};
use crate::services::cost_model::{compare, compute_total, default_mode, CostInputs};
use crate::services::currency::{convert, format_amount, Currency};

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub ev: Option<String>,
    pub ice: Option<String>,
    pub period: Option<u32>,
    pub ev_mode: Option<OwnershipMode>,
    pub ice_mode: Option<OwnershipMode>,
    pub currency: Option<Currency>,
    pub electricity_price: Option<f64>,
    pub fuel_price: Option<f64>,
}

#[derive(Serialize)]
struct CompareResponse {
    period_months: u32,
    currency: Currency,
    ev: CostResponse,
    ice: CostResponse,
    ice_minus_ev: Option<f64>,
    ice_minus_ev_text: Option<String>,
}

pub async fn get_comparison(query: CompareQuery, state: Arc<AppState>) -> Result<Json, Rejection> {
    info!("Handling comparison request: {:?}", query);

    let period_months = validate_period(&state, query.period)?;
    let electricity_price = validate_price("electricity_price", query.electricity_price)?;
    let fuel_price = validate_price("fuel_price", query.fuel_price)?;
    let currency = query.currency.unwrap_or(state.cost.base_currency);

    let vehicles = current_vehicles(&state).await?;
    let (ev_vehicle, _) = resolve_side(&vehicles, query.ev.as_deref(), Some(VehicleKind::Ev))?;
    let (ice_vehicle, _) = resolve_side(&vehicles, query.ice.as_deref(), Some(VehicleKind::Ice))?;

    let inputs_for = |mode: Option<OwnershipMode>, kind: VehicleKind| CostInputs {
        period_months,
        mode: mode.unwrap_or_else(|| default_mode(kind)),
        electricity_price,
        fuel_price,
        currency,
    };
    let ev = compute_total(ev_vehicle, VehicleKind::Ev, &inputs_for(query.ev_mode, VehicleKind::Ev), &state.cost);
    let ice = compute_total(ice_vehicle, VehicleKind::Ice, &inputs_for(query.ice_mode, VehicleKind::Ice), &state.cost);

    let comparison = compare(ev, ice);
    let ice_minus_ev = comparison
        .ice_minus_ev
        .map(|diff| convert(diff, state.cost.base_currency, currency));

    Ok(warp::reply::json(&CompareResponse {
        period_months,
        currency,
        ev: CostResponse::new(comparison.ev, currency),
        ice: CostResponse::new(comparison.ice, currency),
        ice_minus_ev,
        ice_minus_ev_text: ice_minus_ev.map(|diff| format_amount(diff, currency, 0)),
    }))
}
