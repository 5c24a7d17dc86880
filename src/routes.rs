// src/routes.rs
use std::convert::Infallible;
use std::sync::Arc;

use log::{info, warn};
use warp::http::StatusCode;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::compare::{get_comparison, CompareQuery};
use crate::handlers::cost::{get_cost, CostQuery};
use crate::handlers::currency::{convert_amount, list_currencies, ConvertQuery};
use crate::handlers::error::ApiError;
use crate::handlers::vehicles::{get_vehicle, list_vehicles, VehicleListQuery};
use crate::handlers::AppState;

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message: String;

    if err.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        message = api_error.message.clone();
    } else if let Some(invalid) = err.find::<warp::reject::InvalidQuery>() {
        warn!("Rejected query: {}", invalid);
        code = StatusCode::BAD_REQUEST;
        message = invalid.to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else {
        warn!("Unhandled rejection: {:?}", err);
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(state: Arc<AppState>) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let state_filter = warp::any().map(move || state.clone());

    let vehicles_route = warp::path!("api" / "v1" / "vehicles")
        .and(warp::get())
        .and(warp::query::<VehicleListQuery>())
        .and(state_filter.clone())
        .and_then(list_vehicles);

    let vehicle_route = warp::path!("api" / "v1" / "vehicles" / String)
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_vehicle);

    let cost_route = warp::path!("api" / "v1" / "cost")
        .and(warp::get())
        .and(warp::query::<CostQuery>())
        .and(state_filter.clone())
        .and_then(get_cost);

    let compare_route = warp::path!("api" / "v1" / "compare")
        .and(warp::get())
        .and(warp::query::<CompareQuery>())
        .and(state_filter.clone())
        .and_then(get_comparison);

    let currencies_route = warp::path!("api" / "v1" / "currencies")
        .and(warp::get())
        .and_then(list_currencies);

    let convert_route = warp::path!("api" / "v1" / "convert")
        .and(warp::get())
        .and(warp::query::<ConvertQuery>())
        .and_then(convert_amount);

    info!("All routes configured successfully.");

    vehicles_route
        .or(vehicle_route)
        .or(cost_route)
        .or(compare_route)
        .or(currencies_route)
        .or(convert_route)
        .recover(handle_rejection)
}
