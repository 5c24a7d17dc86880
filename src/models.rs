// src/models.rs
use serde::{Deserialize, Deserializer, Serialize};

/// Which side of the comparison a vehicle sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    #[serde(alias = "electric")]
    Ev,
    #[serde(alias = "petrol", alias = "diesel")]
    Ice,
}

impl VehicleKind {
    pub fn label(self) -> &'static str {
        match self {
            VehicleKind::Ev => "EV",
            VehicleKind::Ice => "ICE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnershipMode {
    Buy,
    Lease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepreciationBand {
    High,
    Low,
}

impl DepreciationBand {
    /// Missing or blank means high. Any other value, not just "low", means low.
    pub fn classify(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => DepreciationBand::High,
            Some(band) if band.eq_ignore_ascii_case("high") => DepreciationBand::High,
            Some(_) => DepreciationBand::Low,
        }
    }
}

/// One row of the hosted vehicle table. Amounts are in the base currency (GBP).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "uuid")]
    pub id: String,
    pub make: String,
    pub model: String,
    #[serde(rename = "type", default)]
    pub body_type: Option<String>,
    #[serde(rename = "msrp_gbp", default, deserialize_with = "null_as_zero")]
    pub purchase_price: f64,
    #[serde(default)]
    pub lease_monthly: Option<f64>,
    #[serde(default)]
    pub max_range: Option<f64>,
    #[serde(default)]
    pub battery_size: Option<f64>,
    #[serde(default)]
    pub efficiency_mpkwh: Option<f64>,
    #[serde(default)]
    pub efficiency_mpg: Option<f64>,
    #[serde(default)]
    pub segment: Option<String>,
    #[serde(default)]
    pub depreciation_band: Option<String>,
    #[serde(rename = "maintenance_gbp_per_year", default)]
    pub annual_maintenance: Option<f64>,
    #[serde(default)]
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Rows with no list price still load; they price at zero.
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

impl Vehicle {
    /// `None` when the row has no fuel type at all.
    pub fn kind(&self) -> Option<VehicleKind> {
        let fuel = self.fuel_type.as_deref()?.trim();
        if fuel.is_empty() {
            None
        } else if fuel.eq_ignore_ascii_case("electric") {
            Some(VehicleKind::Ev)
        } else {
            Some(VehicleKind::Ice)
        }
    }

    pub fn band(&self) -> DepreciationBand {
        DepreciationBand::classify(self.depreciation_band.as_deref())
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    pub fn segment_or_other(&self) -> &str {
        match self.segment.as_deref().map(str::trim) {
            Some(segment) if !segment.is_empty() => segment,
            _ => "Other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fuel_type: Option<&str>) -> Vehicle {
        Vehicle {
            id: "v1".into(),
            make: "Tesla".into(),
            model: "Model 3".into(),
            body_type: None,
            purchase_price: 40_000.0,
            lease_monthly: Some(310.0),
            max_range: None,
            battery_size: None,
            efficiency_mpkwh: Some(4.0),
            efficiency_mpg: None,
            segment: None,
            depreciation_band: None,
            annual_maintenance: Some(300.0),
            fuel_type: fuel_type.map(String::from),
            image_url: None,
        }
    }

    #[test]
    fn fuel_type_classification_is_case_insensitive() {
        assert_eq!(row(Some("Electric")).kind(), Some(VehicleKind::Ev));
        assert_eq!(row(Some("petrol")).kind(), Some(VehicleKind::Ice));
        assert_eq!(row(Some("Diesel")).kind(), Some(VehicleKind::Ice));
        assert_eq!(row(Some("")).kind(), None);
        assert_eq!(row(None).kind(), None);
    }

    #[test]
    fn band_defaults_to_high() {
        assert_eq!(DepreciationBand::classify(None), DepreciationBand::High);
        assert_eq!(DepreciationBand::classify(Some("HIGH")), DepreciationBand::High);
        assert_eq!(DepreciationBand::classify(Some("low")), DepreciationBand::Low);
        assert_eq!(DepreciationBand::classify(Some("medium")), DepreciationBand::Low);
    }

    #[test]
    fn deserializes_table_row_with_nulls() {
        let json = r#"{
            "uuid": "abc",
            "make": "Ford",
            "model": "Focus",
            "type": "Hatchback",
            "msrp_gbp": 24000,
            "lease_monthly": null,
            "efficiency_mpg": 45.5,
            "efficiency_mpkwh": null,
            "segment": "Saloon",
            "depreciation_band": "low",
            "maintenance_gbp_per_year": 420,
            "fuel_type": "Petrol"
        }"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.id, "abc");
        assert_eq!(vehicle.purchase_price, 24_000.0);
        assert_eq!(vehicle.lease_monthly, None);
        assert_eq!(vehicle.kind(), Some(VehicleKind::Ice));
        assert_eq!(vehicle.band(), DepreciationBand::Low);
        assert_eq!(vehicle.segment_or_other(), "Saloon");
        assert_eq!(vehicle.image_url, None);
    }

    #[test]
    fn missing_or_null_list_price_reads_as_zero() {
        let json = r#"{"uuid": "n", "make": "Kia", "model": "EV3", "msrp_gbp": null, "fuel_type": "Electric"}"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.purchase_price, 0.0);

        let json = r#"{"uuid": "m", "make": "Kia", "model": "EV3", "fuel_type": "Electric"}"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.purchase_price, 0.0);
    }
}
