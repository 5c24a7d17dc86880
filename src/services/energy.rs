// src/services/energy.rs
use crate::config::CostConfig;
use crate::models::{Vehicle, VehicleKind};
use crate::services::currency::Currency;
use crate::services::round_half_up;

fn usable_efficiency(efficiency: Option<f64>) -> Option<f64> {
    efficiency.filter(|e| e.is_finite() && *e > 0.0)
}

/// Whole-unit monthly electricity spend. Zero without an efficiency rating.
pub fn monthly_electricity_cost(
    efficiency_mpkwh: Option<f64>,
    price_per_kwh: f64,
    config: &CostConfig,
) -> f64 {
    let Some(efficiency) = usable_efficiency(efficiency_mpkwh) else {
        return 0.0;
    };
    let kwh_per_year = config.annual_distance_miles / efficiency;
    round_half_up(kwh_per_year * price_per_kwh / 12.0)
}

/// USD prices are already per gallon; other currencies price per litre.
pub fn price_per_gallon(unit_price: f64, currency: Currency, config: &CostConfig) -> f64 {
    if currency.prices_fuel_per_gallon() {
        unit_price
    } else {
        unit_price * config.litres_per_gallon
    }
}

/// Whole-unit monthly fuel spend. Zero without an efficiency rating.
pub fn monthly_fuel_cost(
    efficiency_mpg: Option<f64>,
    unit_price: f64,
    currency: Currency,
    config: &CostConfig,
) -> f64 {
    let Some(efficiency) = usable_efficiency(efficiency_mpg) else {
        return 0.0;
    };
    let gallons_per_year = config.annual_distance_miles / efficiency;
    round_half_up(gallons_per_year * price_per_gallon(unit_price, currency, config) / 12.0)
}

pub fn monthly_energy_cost(
    vehicle: &Vehicle,
    kind: VehicleKind,
    unit_price: f64,
    currency: Currency,
    config: &CostConfig,
) -> f64 {
    match kind {
        VehicleKind::Ev => monthly_electricity_cost(vehicle.efficiency_mpkwh, unit_price, config),
        VehicleKind::Ice => monthly_fuel_cost(vehicle.efficiency_mpg, unit_price, currency, config),
    }
}
