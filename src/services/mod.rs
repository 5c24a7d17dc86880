// src/services/mod.rs
pub mod catalog;
pub mod cost_model;
pub mod currency;
pub mod depreciation;
pub mod energy;

/// Nearest whole unit, ties toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
