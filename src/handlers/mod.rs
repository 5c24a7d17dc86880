// src/handlers/mod.rs
pub mod compare;
pub mod cost;
pub mod currency;
pub mod error;
pub mod vehicles;

use std::sync::Arc;

use log::error;
use warp::Rejection;

use crate::config::CostConfig;
use crate::models::Vehicle;
use crate::services::catalog::CatalogStore;
use error::ApiError;

pub struct AppState {
    pub catalog: CatalogStore,
    pub cost: CostConfig,
}

pub(crate) async fn current_vehicles(state: &AppState) -> Result<Arc<Vec<Vehicle>>, Rejection> {
    state.catalog.vehicles().await.map_err(|e| {
        error!("Failed to load vehicle catalog: {:#}", e);
        warp::reject::custom(ApiError::catalog_unavailable("Vehicle catalog is unavailable"))
    })
}

pub(crate) fn validate_period(state: &AppState, period: Option<u32>) -> Result<u32, Rejection> {
    let period = period.unwrap_or(state.cost.default_period_months);
    if state.cost.is_allowed_period(period) {
        Ok(period)
    } else {
        Err(warp::reject::custom(ApiError::bad_request(format!(
            "period must be one of {:?} months",
            state.cost.allowed_periods_months
        ))))
    }
}

pub(crate) fn validate_price(name: &str, price: Option<f64>) -> Result<Option<f64>, Rejection> {
    match price {
        Some(p) if !p.is_finite() || p < 0.0 => Err(warp::reject::custom(ApiError::bad_request(
            format!("{} must be a non-negative number", name),
        ))),
        other => Ok(other),
    }
}
