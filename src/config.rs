// src/config.rs
use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use log::{info, warn};

use crate::services::currency::Currency;

/// Miles driven per year in every running-cost figure.
pub const ANNUAL_DISTANCE_MILES: f64 = 10_000.0;
/// Litres in one UK (imperial) gallon.
pub const LITRES_PER_GALLON: f64 = 4.54609;
pub const ALLOWED_PERIODS_MONTHS: [u32; 3] = [24, 36, 48];
pub const DEFAULT_PERIOD_MONTHS: u32 = 36;

const DEFAULT_PORT: u16 = 3030;
const DEFAULT_VEHICLE_TABLE: &str = "vehicle-data";
const DEFAULT_CATALOG_STALE_SECS: i64 = 300;

/// One default unit price per supported currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultPrices {
    pub gbp: f64,
    pub eur: f64,
    pub usd: f64,
}

impl DefaultPrices {
    pub fn for_currency(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Gbp => self.gbp,
            Currency::Eur => self.eur,
            Currency::Usd => self.usd,
        }
    }
}

/// Constants feeding the cost model. `Default` carries the production values.
#[derive(Debug, Clone)]
pub struct CostConfig {
    pub annual_distance_miles: f64,
    pub litres_per_gallon: f64,
    /// Currency every catalog amount is denominated in.
    pub base_currency: Currency,
    pub allowed_periods_months: Vec<u32>,
    pub default_period_months: u32,
    /// Per kWh.
    pub electricity_prices: DefaultPrices,
    /// Per litre, except USD which is per gallon.
    pub fuel_prices: DefaultPrices,
}

impl Default for CostConfig {
    fn default() -> Self {
        CostConfig {
            annual_distance_miles: ANNUAL_DISTANCE_MILES,
            litres_per_gallon: LITRES_PER_GALLON,
            base_currency: Currency::Gbp,
            allowed_periods_months: ALLOWED_PERIODS_MONTHS.to_vec(),
            default_period_months: DEFAULT_PERIOD_MONTHS,
            electricity_prices: DefaultPrices { gbp: 0.30, eur: 0.35, usd: 0.17 },
            fuel_prices: DefaultPrices { gbp: 1.45, eur: 1.75, usd: 3.50 },
        }
    }
}

impl CostConfig {
    pub fn is_allowed_period(&self, months: u32) -> bool {
        self.allowed_periods_months.contains(&months)
    }
}

/// Where the vehicle catalog comes from.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    Supabase {
        url: String,
        anon_key: String,
        table: String,
    },
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub catalog: CatalogSource,
    pub catalog_stale_secs: i64,
    pub cost: CostConfig,
}

impl AppConfig {
    /// Reads process configuration. Call `dotenv().ok()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("PORT must be a number, got {:?}", value))?,
            Err(_) => {
                warn!("$PORT not set, defaulting to {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        let catalog = catalog_source_from_env()?;

        let catalog_stale_secs = match env::var("CATALOG_STALE_SECS") {
            Ok(value) => value
                .parse::<i64>()
                .with_context(|| format!("CATALOG_STALE_SECS must be a number, got {:?}", value))?,
            Err(_) => DEFAULT_CATALOG_STALE_SECS,
        };

        let mut cost = CostConfig::default();
        if let Ok(value) = env::var("ANNUAL_MILES") {
            cost.annual_distance_miles = value
                .parse::<f64>()
                .with_context(|| format!("ANNUAL_MILES must be a number, got {:?}", value))?;
            info!("Annual distance overridden to {} miles", cost.annual_distance_miles);
        }

        Ok(AppConfig {
            port,
            catalog,
            catalog_stale_secs,
            cost,
        })
    }
}

fn catalog_source_from_env() -> Result<CatalogSource> {
    if let Ok(path) = env::var("CATALOG_FILE") {
        info!("Using local catalog file {}", path);
        return Ok(CatalogSource::File(PathBuf::from(path)));
    }

    let url = env::var("SUPABASE_URL")
        .map_err(|_| anyhow!("either CATALOG_FILE or SUPABASE_URL must be set"))?;
    let anon_key = env::var("SUPABASE_ANON_KEY").context("SUPABASE_ANON_KEY must be set")?;
    let table = env::var("VEHICLE_TABLE").unwrap_or_else(|_| DEFAULT_VEHICLE_TABLE.to_string());

    info!("Using Supabase catalog table {} at {}", table, url);
    Ok(CatalogSource::Supabase {
        url: url.trim_end_matches('/').to_string(),
        anon_key,
        table,
    })
}
