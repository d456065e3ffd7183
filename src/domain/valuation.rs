use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which estimator produced a result.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Trade-in valuation with a dealer offer. Canonical.
    #[default]
    Formal,
    /// Widget approximation: a range only, no offer.
    Quick,
}

/// A plain-language reason attached to an estimate.
///
/// Travels as its rendered sentence, so the list can be shown to customers as-is.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Factor {
    PremiumMake(String),
    UnknownMake(String),
    RecentModel,
    AgingVehicle,
    LowMileage,
    HighMileage,
    ExcellentCondition,
    PoorCondition,
    AccidentHistory,
    ServiceHistory,
}

const PREMIUM_PREFIX: &str = "Premium make ";
const PREMIUM_SUFFIX: &str = " holds its value";
const UNKNOWN_PREFIX: &str = "Unknown make ";
const UNKNOWN_SUFFIX: &str = ": default base value used";

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factor::PremiumMake(make) => write!(f, "{PREMIUM_PREFIX}{make}{PREMIUM_SUFFIX}"),
            Factor::UnknownMake(make) => write!(f, "{UNKNOWN_PREFIX}{make}{UNKNOWN_SUFFIX}"),
            Factor::RecentModel => f.write_str("Recent model year"),
            Factor::AgingVehicle => f.write_str("Vehicle is 10 years or older"),
            Factor::LowMileage => f.write_str("Low mileage"),
            Factor::HighMileage => f.write_str("High mileage over 200,000 km"),
            Factor::ExcellentCondition => f.write_str("Excellent condition"),
            Factor::PoorCondition => f.write_str("Poor condition"),
            Factor::AccidentHistory => f.write_str("Accident history penalty (-15%)"),
            Factor::ServiceHistory => f.write_str("Full service history bonus (+5%)"),
        }
    }
}

impl FromStr for Factor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fixed = [
            Factor::RecentModel,
            Factor::AgingVehicle,
            Factor::LowMileage,
            Factor::HighMileage,
            Factor::ExcellentCondition,
            Factor::PoorCondition,
            Factor::AccidentHistory,
            Factor::ServiceHistory,
        ];
        if let Some(factor) = fixed.into_iter().find(|f| f.to_string() == s) {
            return Ok(factor);
        }
        if let Some(make) = s
            .strip_prefix(PREMIUM_PREFIX)
            .and_then(|rest| rest.strip_suffix(PREMIUM_SUFFIX))
        {
            return Ok(Factor::PremiumMake(make.to_string()));
        }
        if let Some(make) = s
            .strip_prefix(UNKNOWN_PREFIX)
            .and_then(|rest| rest.strip_suffix(UNKNOWN_SUFFIX))
        {
            return Ok(Factor::UnknownMake(make.to_string()));
        }
        Err(format!("unrecognised contributing factor: {s}"))
    }
}

impl From<Factor> for String {
    fn from(factor: Factor) -> Self {
        factor.to_string()
    }
}

impl TryFrom<String> for Factor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Outcome of a valuation. All amounts are whole euros.
///
/// Invariants: `0 <= low <= estimate <= high`, and `dealer_offer <= estimate`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    pub variant: Variant,
    #[serde(rename = "estimatedMarketValue")]
    pub estimated_market_value_eur: i64,
    #[serde(rename = "lowEstimate")]
    pub low_estimate_eur: i64,
    #[serde(rename = "highEstimate")]
    pub high_estimate_eur: i64,
    #[serde(
        rename = "dealerOffer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dealer_offer_eur: Option<i64>,
    pub contributing_factors: Vec<Factor>,
}

/// Rounds to the nearest whole euro, halves away from zero.
pub fn round_eur(value: Decimal) -> i64 {
    value
        .max(Decimal::ZERO)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        // Only reachable past i64::MAX euros, which the make table cannot produce.
        .unwrap_or(i64::MAX)
}
