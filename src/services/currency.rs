// src/services/currency.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[serde(alias = "gbp", alias = "Gbp")]
    Gbp,
    #[serde(alias = "eur", alias = "Eur")]
    Eur,
    #[serde(alias = "usd", alias = "Usd")]
    Usd,
}

pub const ALL_CURRENCIES: [Currency; 3] = [Currency::Gbp, Currency::Eur, Currency::Usd];

// Fixed table, rows are `from`, columns are `to` in GBP, EUR, USD order.
// Rates are deliberately not reciprocal.
const EXCHANGE_RATES: [[f64; 3]; 3] = [
    [1.0, 1.17, 1.27],
    [0.85, 1.0, 1.08],
    [0.79, 0.92, 1.0],
];

impl Currency {
    fn index(self) -> usize {
        match self {
            Currency::Gbp => 0,
            Currency::Eur => 1,
            Currency::Usd => 2,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Currency::Gbp => "GBP",
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Gbp => "£",
            Currency::Eur => "€",
            Currency::Usd => "$",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Currency::Gbp => "British Pound",
            Currency::Eur => "Euro",
            Currency::Usd => "US Dollar",
        }
    }

    /// Fuel is priced per gallon in USD and per litre everywhere else.
    pub fn prices_fuel_per_gallon(self) -> bool {
        self == Currency::Usd
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GBP" => Ok(Currency::Gbp),
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            other => Err(format!("unsupported currency: {}", other)),
        }
    }
}

pub fn exchange_rate(from: Currency, to: Currency) -> f64 {
    EXCHANGE_RATES[from.index()][to.index()]
}

/// Same-currency conversion returns `amount` untouched.
pub fn convert(amount: f64, from: Currency, to: Currency) -> f64 {
    if from == to {
        return amount;
    }
    amount * exchange_rate(from, to)
}

/// en-US style money text, e.g. `£14,328` or `-€1,234.50`.
/// Only 0 and 2 fraction digits are used by callers; anything above 2 is clamped.
pub fn format_amount(amount: f64, currency: Currency, fraction_digits: u8) -> String {
    let digits = fraction_digits.min(2) as u32;
    let scale = 10u64.pow(digits);
    let scaled = (amount.abs() * scale as f64).round() as u64;
    let whole = scaled / scale;
    let fraction = scaled % scale;

    let mut text = String::new();
    if amount < 0.0 && scaled != 0 {
        text.push('-');
    }
    text.push_str(currency.symbol());
    text.push_str(&group_thousands(whole));
    if digits > 0 {
        text.push_str(&format!(".{:0width$}", fraction, width = digits as usize));
    }
    text
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
