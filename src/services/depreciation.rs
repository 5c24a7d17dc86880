// src/services/depreciation.rs
use crate::models::DepreciationBand;
use crate::services::round_half_up;

/// Fraction of the purchase price left after three years.
pub fn retention_rate_at_3yr(band: DepreciationBand) -> f64 {
    match band {
        DepreciationBand::High => 0.60,
        DepreciationBand::Low => 0.775,
    }
}

/// Value(t) = price * rate3^(t/3), rounded to whole currency units.
pub fn resale_value(purchase_price: f64, band: DepreciationBand, years: f64) -> f64 {
    let retention = retention_rate_at_3yr(band).powf(years / 3.0);
    round_half_up(purchase_price * retention)
}

/// Label shown next to the band. Only an explicit band gets one.
pub fn band_drop_label(raw_band: Option<&str>) -> Option<&'static str> {
    let band = raw_band?.trim();
    if band.eq_ignore_ascii_case("high") {
        Some("(40% drop)")
    } else if band.eq_ignore_ascii_case("low") {
        Some("(22.5% drop)")
    } else {
        None
    }
}
