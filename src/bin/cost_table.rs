// src/bin/cost_table.rs
//! Prints the total cost of every catalog vehicle for each allowed period.
//! `CURRENCY`, `ELECTRICITY_PRICE` and `FUEL_PRICE` override the defaults.
use std::env;

use ev_cost::config::AppConfig;
use ev_cost::services::catalog::CatalogStore;
use ev_cost::services::cost_model::{compute_total, default_mode, CostInputs, CostOutcome};
use ev_cost::services::currency::Currency;
use ev_cost::BoxError;
use log::{info, warn};
use env_logger;
use dotenv::dotenv;

fn price_from_env(name: &str) -> Result<Option<f64>, BoxError> {
    match env::var(name) {
        Ok(value) => Ok(Some(value.parse::<f64>()?)),
        Err(_) => Ok(None),
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env()?;
    let currency = match env::var("CURRENCY") {
        Ok(code) => code.parse::<Currency>()?,
        Err(_) => config.cost.base_currency,
    };
    let electricity_price = price_from_env("ELECTRICITY_PRICE")?;
    let fuel_price = price_from_env("FUEL_PRICE")?;

    let store = CatalogStore::new(config.catalog.clone(), config.catalog_stale_secs);
    let vehicles = store.vehicles().await?;
    info!("Costing {} vehicles in {}", vehicles.len(), currency);

    print!("{:<40} {:<4}", "Vehicle", "Kind");
    for period in &config.cost.allowed_periods_months {
        print!(" {:>14}", format!("{} months", period));
    }
    println!();

    for vehicle in vehicles.iter() {
        let Some(kind) = vehicle.kind() else {
            warn!("Skipping {} without a fuel type", vehicle.display_name());
            continue;
        };

        print!("{:<40} {:<4}", vehicle.display_name(), kind.label());
        for &period_months in &config.cost.allowed_periods_months {
            let inputs = CostInputs {
                period_months,
                mode: default_mode(kind),
                electricity_price,
                fuel_price,
                currency,
            };
            let cell = match compute_total(Some(vehicle), kind, &inputs, &config.cost) {
                CostOutcome::Computed(breakdown) => breakdown.render(currency).total_text,
                CostOutcome::Unsupported { .. } => "not supported".to_string(),
                CostOutcome::NoSelection { .. } => "-".to_string(),
            };
            print!(" {:>14}", cell);
        }
        println!();
    }

    Ok(())
}
