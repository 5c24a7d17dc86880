// src/services/cost_model.rs
//! Turns one vehicle plus the user's inputs into a cost breakdown.
//!
//! Everything here works in the catalog's base currency. Conversion to the
//! display currency happens once, in [`CostBreakdown::render`].

use serde::Serialize;

use crate::config::CostConfig;
use crate::models::{OwnershipMode, Vehicle, VehicleKind};
use crate::services::currency::{convert, format_amount, Currency};
use crate::services::depreciation::{band_drop_label, resale_value};
use crate::services::energy::monthly_energy_cost;
use crate::services::round_half_up;

/// Values the user controls. Prices are per unit in `currency`; `None` picks the
/// configured default for that currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostInputs {
    pub period_months: u32,
    pub mode: OwnershipMode,
    pub electricity_price: Option<f64>,
    pub fuel_price: Option<f64>,
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub label: &'static str,
    pub monthly: f64,
    pub period_total: f64,
}

impl LineItem {
    fn new(label: &'static str, monthly: f64, period_months: u32) -> Self {
        LineItem {
            label,
            monthly,
            period_total: monthly * period_months as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub kind: VehicleKind,
    pub mode: OwnershipMode,
    pub period_months: u32,
    pub currency: Currency,
    pub line_items: Vec<LineItem>,
    pub purchase_price: Option<f64>,
    pub resale_value: Option<f64>,
    pub depreciation: Option<f64>,
    pub depreciation_band: Option<String>,
    pub total: f64,
}

/// Result of a cost request. "Nothing selected" and "not supported" are kept
/// apart from a computed zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CostOutcome {
    Computed(CostBreakdown),
    NoSelection { kind: VehicleKind },
    Unsupported { kind: VehicleKind, mode: OwnershipMode },
}

impl CostOutcome {
    pub fn breakdown(&self) -> Option<&CostBreakdown> {
        match self {
            CostOutcome::Computed(breakdown) => Some(breakdown),
            _ => None,
        }
    }

    pub fn total(&self) -> Option<f64> {
        self.breakdown().map(|b| b.total)
    }
}

/// Leasing an EV and buying an ICE car are the only modelled combinations.
pub fn is_supported(kind: VehicleKind, mode: OwnershipMode) -> bool {
    matches!(
        (kind, mode),
        (VehicleKind::Ev, OwnershipMode::Lease) | (VehicleKind::Ice, OwnershipMode::Buy)
    )
}

/// The supported mode for each side.
pub fn default_mode(kind: VehicleKind) -> OwnershipMode {
    match kind {
        VehicleKind::Ev => OwnershipMode::Lease,
        VehicleKind::Ice => OwnershipMode::Buy,
    }
}

pub fn monthly_maintenance(vehicle: &Vehicle) -> f64 {
    match vehicle.annual_maintenance {
        Some(annual) if annual != 0.0 => round_half_up(annual / 12.0),
        _ => 0.0,
    }
}

pub fn compute_total(
    vehicle: Option<&Vehicle>,
    kind: VehicleKind,
    inputs: &CostInputs,
    config: &CostConfig,
) -> CostOutcome {
    let Some(vehicle) = vehicle else {
        return CostOutcome::NoSelection { kind };
    };
    if !is_supported(kind, inputs.mode) {
        return CostOutcome::Unsupported {
            kind,
            mode: inputs.mode,
        };
    }

    let months = inputs.period_months as f64;
    let entered_price = match kind {
        VehicleKind::Ev => inputs
            .electricity_price
            .unwrap_or_else(|| config.electricity_prices.for_currency(inputs.currency)),
        VehicleKind::Ice => inputs
            .fuel_price
            .unwrap_or_else(|| config.fuel_prices.for_currency(inputs.currency)),
    };
    // The unit (litre or gallon) still follows the entered currency.
    let base_price = convert(entered_price, inputs.currency, config.base_currency);
    let energy_monthly = monthly_energy_cost(vehicle, kind, base_price, inputs.currency, config);
    let maintenance_monthly = monthly_maintenance(vehicle);

    let breakdown = match kind {
        VehicleKind::Ev => {
            let lease_monthly = vehicle.lease_monthly.unwrap_or(0.0);
            CostBreakdown {
                vehicle_id: vehicle.id.clone(),
                vehicle_name: vehicle.display_name(),
                kind,
                mode: inputs.mode,
                period_months: inputs.period_months,
                currency: config.base_currency,
                line_items: vec![
                    LineItem::new("Lease", lease_monthly, inputs.period_months),
                    LineItem::new("Electricity", energy_monthly, inputs.period_months),
                    LineItem::new("Maintenance", maintenance_monthly, inputs.period_months),
                ],
                purchase_price: None,
                resale_value: None,
                depreciation: None,
                depreciation_band: None,
                total: lease_monthly * months + maintenance_monthly * months + energy_monthly * months,
            }
        }
        VehicleKind::Ice => {
            let purchase = vehicle.purchase_price;
            let resale = resale_value(purchase, vehicle.band(), months / 12.0);
            let depreciation = purchase - resale;
            CostBreakdown {
                vehicle_id: vehicle.id.clone(),
                vehicle_name: vehicle.display_name(),
                kind,
                mode: inputs.mode,
                period_months: inputs.period_months,
                currency: config.base_currency,
                line_items: vec![
                    LineItem::new("Fuel", energy_monthly, inputs.period_months),
                    LineItem::new("Maintenance", maintenance_monthly, inputs.period_months),
                ],
                purchase_price: Some(purchase),
                resale_value: Some(resale),
                depreciation: Some(depreciation),
                depreciation_band: vehicle.depreciation_band.clone(),
                total: depreciation + energy_monthly * months + maintenance_monthly * months,
            }
        }
    };

    CostOutcome::Computed(breakdown)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayLineItem {
    pub label: &'static str,
    pub monthly: f64,
    pub period_total: f64,
    pub monthly_text: String,
    pub period_total_text: String,
}

/// A breakdown converted into the display currency, with formatted text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayBreakdown {
    pub currency: Currency,
    pub period_years: f64,
    pub line_items: Vec<DisplayLineItem>,
    pub purchase_price_text: Option<String>,
    pub resale_value_text: Option<String>,
    pub depreciation_text: Option<String>,
    pub band_text: Option<String>,
    pub total: f64,
    pub total_text: String,
    pub summary_label: &'static str,
}

impl CostBreakdown {
    pub fn render(&self, currency: Currency) -> DisplayBreakdown {
        let to_display = |amount: f64| convert(amount, self.currency, currency);
        let text = |amount: f64| format_amount(to_display(amount), currency, 0);

        let line_items = self
            .line_items
            .iter()
            .map(|item| DisplayLineItem {
                label: item.label,
                monthly: to_display(item.monthly),
                period_total: to_display(item.period_total),
                monthly_text: text(item.monthly),
                period_total_text: text(item.period_total),
            })
            .collect();

        let band_text = match self.kind {
            VehicleKind::Ice => {
                let band = self
                    .depreciation_band
                    .as_deref()
                    .map(str::trim)
                    .filter(|band| !band.is_empty())
                    .unwrap_or("unknown");
                Some(match band_drop_label(self.depreciation_band.as_deref()) {
                    Some(drop) => format!("{} {}", band, drop),
                    None => band.to_string(),
                })
            }
            VehicleKind::Ev => None,
        };

        DisplayBreakdown {
            currency,
            period_years: self.period_months as f64 / 12.0,
            line_items,
            purchase_price_text: self.purchase_price.map(&text),
            resale_value_text: self.resale_value.map(&text),
            depreciation_text: self.depreciation.map(&text),
            band_text,
            total: to_display(self.total),
            total_text: text(self.total),
            summary_label: match self.kind {
                VehicleKind::Ev => "(Lease + Electricity + Maintenance)",
                VehicleKind::Ice => "(Depreciation + Fuel + Maintenance)",
            },
        }
    }
}

/// Both sides of the page. `ice_minus_ev` is positive when the EV is cheaper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub ev: CostOutcome,
    pub ice: CostOutcome,
    pub ice_minus_ev: Option<f64>,
}

pub fn compare(ev: CostOutcome, ice: CostOutcome) -> Comparison {
    let ice_minus_ev = match (ev.total(), ice.total()) {
        (Some(ev_total), Some(ice_total)) => Some(ice_total - ev_total),
        _ => None,
    };
    Comparison { ev, ice, ice_minus_ev }
}
