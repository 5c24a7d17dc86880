// src/handlers/currency.rs
use serde::{Deserialize, Serialize};
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::services::currency::{convert, format_amount, Currency, ALL_CURRENCIES};

#[derive(Serialize)]
struct CurrencyInfo {
    code: Currency,
    symbol: &'static str,
    name: &'static str,
}

pub async fn list_currencies() -> Result<Json, Rejection> {
    let currencies: Vec<CurrencyInfo> = ALL_CURRENCIES
        .iter()
        .map(|&c| CurrencyInfo {
            code: c,
            symbol: c.symbol(),
            name: c.name(),
        })
        .collect();
    Ok(warp::reply::json(&currencies))
}

#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    pub amount: f64,
    pub from: Currency,
    pub to: Currency,
    pub decimals: Option<u8>,
}

#[derive(Serialize)]
struct ConvertResponse {
    amount: f64,
    from: Currency,
    to: Currency,
    converted: f64,
    text: String,
}

pub async fn convert_amount(query: ConvertQuery) -> Result<Json, Rejection> {
    if !query.amount.is_finite() {
        return Err(warp::reject::custom(ApiError::bad_request("amount must be a finite number")));
    }
    let decimals = match query.decimals.unwrap_or(2) {
        0 => 0,
        2 => 2,
        _ => return Err(warp::reject::custom(ApiError::bad_request("decimals must be 0 or 2"))),
    };

    let converted = convert(query.amount, query.from, query.to);
    Ok(warp::reply::json(&ConvertResponse {
        amount: query.amount,
        from: query.from,
        to: query.to,
        converted,
        text: format_amount(converted, query.to, decimals),
    }))
}
