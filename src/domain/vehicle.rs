use crate::error::{Result, ValuationError};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;

/// Earliest model year the valuation accepts.
pub const MIN_VEHICLE_YEAR: i32 = 1900;

/// Qualitative condition of a vehicle.
///
/// Superset of the four-valued scale used by quick estimates and the
/// five-valued scale used by formal trade-in valuations.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    #[serde(alias = "EXCELLENT")]
    Excellent,
    #[serde(alias = "VERY_GOOD", alias = "very-good")]
    VeryGood,
    #[serde(alias = "GOOD")]
    Good,
    #[serde(alias = "FAIR")]
    Fair,
    #[serde(alias = "POOR")]
    Poor,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::Excellent,
        Condition::VeryGood,
        Condition::Good,
        Condition::Fair,
        Condition::Poor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Excellent => "excellent",
            Condition::VeryGood => "very_good",
            Condition::Good => "good",
            Condition::Fair => "fair",
            Condition::Poor => "poor",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vehicle submitted for valuation.
///
/// Field names on the wire follow the lead forms (`vehicleMake`, `vehicleYear`, ...).
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct VehicleDescriptor {
    #[serde(rename = "vehicleMake")]
    pub make: String,
    #[serde(rename = "vehicleModel", default)]
    pub model: String,
    #[serde(rename = "vehicleYear")]
    pub year: i32,
    #[serde(rename = "vehicleMileage")]
    pub mileage_km: i64,
    #[serde(rename = "vehicleCondition")]
    pub condition: Condition,
    #[serde(rename = "hasAccidents", default, deserialize_with = "flag_or_blank")]
    pub has_accident_history: bool,
    #[serde(rename = "hasServiceHistory", default, deserialize_with = "flag_or_blank")]
    pub has_service_history: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagCell {
    Bool(bool),
    Text(String),
}

/// Boolean form flag where a blank cell means "not ticked".
fn flag_or_blank<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match FlagCell::deserialize(deserializer)? {
        FlagCell::Bool(value) => Ok(value),
        FlagCell::Text(text) => {
            let text = text.trim();
            if text.is_empty() || text.eq_ignore_ascii_case("false") {
                Ok(false)
            } else if text.eq_ignore_ascii_case("true") {
                Ok(true)
            } else {
                Err(de::Error::custom(format!("invalid flag value `{text}`")))
            }
        }
    }
}

impl VehicleDescriptor {
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        mileage_km: i64,
        condition: Condition,
    ) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year,
            mileage_km,
            condition,
            has_accident_history: false,
            has_service_history: false,
        }
    }

    pub fn with_accident_history(mut self, value: bool) -> Self {
        self.has_accident_history = value;
        self
    }

    pub fn with_service_history(mut self, value: bool) -> Self {
        self.has_service_history = value;
        self
    }

    /// Rejects structurally invalid input before it reaches scoring.
    pub fn validate(&self, current_year: i32) -> Result<()> {
        let max = current_year.saturating_add(1);
        if !(MIN_VEHICLE_YEAR..=max).contains(&self.year) {
            return Err(ValuationError::InvalidVehicleYear {
                year: self.year,
                max,
            });
        }
        if self.mileage_km < 0 {
            return Err(ValuationError::InvalidMileage(self.mileage_km));
        }
        Ok(())
    }

    /// Age in whole years; next year's models count as new.
    pub fn age(&self, current_year: i32) -> i64 {
        (i64::from(current_year) - i64::from(self.year)).max(0)
    }
}
