use crate::domain::market::{self, DEFAULT_BASE_VALUE};
use crate::domain::valuation::{Factor, ValuationResult, Variant, round_eur};
use crate::domain::vehicle::{Condition, VehicleDescriptor};
use crate::error::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Age after which neither depreciation nor the mileage baseline move any further.
pub const MAX_DEPRECIATION_AGE: i64 = 25;
/// Par mileage per year of age.
pub const EXPECTED_KM_PER_YEAR: i64 = 15_000;

const FIRST_YEAR_RETENTION: Decimal = dec!(0.80);
const EARLY_YEAR_RETENTION: Decimal = dec!(0.85);
const LATE_YEAR_RETENTION: Decimal = dec!(0.90);

const MILEAGE_STEP_KM: Decimal = dec!(10000);
const EXCESS_PENALTY_PER_STEP: Decimal = dec!(0.05);
const MAX_EXCESS_PENALTY: Decimal = dec!(0.30);
const SHORTFALL_BONUS_PER_STEP: Decimal = dec!(0.03);
const MAX_SHORTFALL_BONUS: Decimal = dec!(0.15);

const QUICK_EARLY_DEPRECIATION: Decimal = dec!(0.15);
const QUICK_LATE_DEPRECIATION: Decimal = dec!(0.10);
const QUICK_EARLY_YEARS: i64 = 5;
const QUICK_MAX_DEPRECIATION: Decimal = dec!(0.80);
const QUICK_MILEAGE_BLOCK_KM: i64 = 50_000;
const QUICK_BLOCK_REDUCTION: Decimal = dec!(0.10);
const QUICK_MAX_MILEAGE_REDUCTION: Decimal = dec!(0.50);

const ACCIDENT_MULTIPLIER: Decimal = dec!(0.85);
const SERVICE_MULTIPLIER: Decimal = dec!(1.05);
const BAND_LOW: Decimal = dec!(0.85);
const BAND_HIGH: Decimal = dec!(1.15);

const RECENT_MODEL_MAX_AGE: i64 = 3;
const AGING_VEHICLE_MIN_AGE: i64 = 10;
const LOW_MILEAGE_KM: i64 = 100_000;
const HIGH_MILEAGE_KM: i64 = 200_000;

/// Market-value multiplier for the formal valuation.
pub fn condition_multiplier(condition: Condition) -> Decimal {
    match condition {
        Condition::Excellent => dec!(1.15),
        Condition::VeryGood => dec!(1.08),
        Condition::Good => dec!(1.00),
        Condition::Fair => dec!(0.85),
        Condition::Poor => dec!(0.70),
    }
}

/// Share of market value the dealership pays. Independent of [`condition_multiplier`].
pub fn offer_percentage(condition: Condition) -> Decimal {
    match condition {
        Condition::Excellent => dec!(0.90),
        Condition::VeryGood => dec!(0.85),
        Condition::Good => dec!(0.80),
        Condition::Fair => dec!(0.70),
        Condition::Poor => dec!(0.60),
    }
}

/// The quick estimate only knows four grades; very good scores as good.
fn quick_condition_multiplier(condition: Condition) -> Decimal {
    match condition {
        Condition::Excellent => dec!(1.10),
        Condition::VeryGood | Condition::Good => dec!(1.00),
        Condition::Fair => dec!(0.85),
        Condition::Poor => dec!(0.65),
    }
}

/// Compounding retention: 20% off in the first year, 15% in years two and three,
/// 10% in every year after that.
pub fn age_retention(age: i64) -> Decimal {
    let mut retention = FIRST_YEAR_RETENTION;
    for year in 1..=age.clamp(0, MAX_DEPRECIATION_AGE) {
        let step = if year <= 2 {
            EARLY_YEAR_RETENTION
        } else {
            LATE_YEAR_RETENTION
        };
        retention = (retention * step).round_dp(10);
    }
    retention
}

/// Penalises distance over `age * 15 000 km` and rewards distance under it.
/// Bounded to `[0.70, 1.15]`.
pub fn mileage_adjustment(age: i64, mileage_km: i64) -> Decimal {
    let expected = age.clamp(0, MAX_DEPRECIATION_AGE) * EXPECTED_KM_PER_YEAR;
    let mileage_km = mileage_km.max(0);
    if mileage_km > expected {
        let steps = Decimal::from(mileage_km - expected) / MILEAGE_STEP_KM;
        Decimal::ONE - (steps * EXCESS_PENALTY_PER_STEP).min(MAX_EXCESS_PENALTY)
    } else {
        let steps = Decimal::from(expected - mileage_km) / MILEAGE_STEP_KM;
        Decimal::ONE + (steps * SHORTFALL_BONUS_PER_STEP).min(MAX_SHORTFALL_BONUS)
    }
}

fn quick_age_retention(age: i64) -> Decimal {
    let age = age.max(0);
    let early = Decimal::from(age.min(QUICK_EARLY_YEARS)) * QUICK_EARLY_DEPRECIATION;
    let late = Decimal::from((age - QUICK_EARLY_YEARS).max(0)) * QUICK_LATE_DEPRECIATION;
    Decimal::ONE - (early + late).min(QUICK_MAX_DEPRECIATION)
}

fn quick_mileage_retention(mileage_km: i64) -> Decimal {
    let blocks = Decimal::from(mileage_km.max(0) / QUICK_MILEAGE_BLOCK_KM);
    Decimal::ONE - (blocks * QUICK_BLOCK_REDUCTION).min(QUICK_MAX_MILEAGE_REDUCTION)
}

/// Deterministic trade-in and resale estimator.
///
/// Holds the reference year so results never depend on the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValuationEngine {
    current_year: i32,
}

impl ValuationEngine {
    pub fn new(current_year: i32) -> Self {
        Self { current_year }
    }

    /// Canonical estimate: the formal valuation, with range and dealer offer.
    pub fn estimate(&self, vehicle: &VehicleDescriptor) -> Result<ValuationResult> {
        self.formal_valuation(vehicle)
    }

    pub fn valuate(&self, vehicle: &VehicleDescriptor, variant: Variant) -> Result<ValuationResult> {
        match variant {
            Variant::Formal => self.formal_valuation(vehicle),
            Variant::Quick => self.quick_estimate(vehicle),
        }
    }

    /// Tiered compounding depreciation, mileage against a 15 000 km/year baseline,
    /// and a condition-dependent dealer offer.
    pub fn formal_valuation(&self, vehicle: &VehicleDescriptor) -> Result<ValuationResult> {
        vehicle.validate(self.current_year)?;
        let age = vehicle.age(self.current_year);

        let value = self.base_value(vehicle)
            * age_retention(age)
            * mileage_adjustment(age, vehicle.mileage_km)
            * condition_multiplier(vehicle.condition)
            * history_multiplier(vehicle);

        let result = finish(
            Variant::Formal,
            value,
            Some(offer_percentage(vehicle.condition)),
            contributing_factors(vehicle, age),
        );
        tracing::debug!(
            make = %vehicle.make,
            age,
            mileage_km = vehicle.mileage_km,
            estimate = result.estimated_market_value_eur,
            "formal valuation computed"
        );
        Ok(result)
    }

    /// Linear depreciation capped at 80%, a 10% cut per full 50 000 km,
    /// and a plain ±15% band with no dealer offer.
    pub fn quick_estimate(&self, vehicle: &VehicleDescriptor) -> Result<ValuationResult> {
        vehicle.validate(self.current_year)?;
        let age = vehicle.age(self.current_year);

        let value = self.base_value(vehicle)
            * quick_age_retention(age)
            * quick_mileage_retention(vehicle.mileage_km)
            * quick_condition_multiplier(vehicle.condition)
            * history_multiplier(vehicle);

        let result = finish(
            Variant::Quick,
            value,
            None,
            contributing_factors(vehicle, age),
        );
        tracing::debug!(
            make = %vehicle.make,
            age,
            estimate = result.estimated_market_value_eur,
            "quick estimate computed"
        );
        Ok(result)
    }

    fn base_value(&self, vehicle: &VehicleDescriptor) -> Decimal {
        market::lookup_make(&vehicle.make)
            .map(|entry| entry.base_value)
            .unwrap_or(DEFAULT_BASE_VALUE)
    }
}

fn history_multiplier(vehicle: &VehicleDescriptor) -> Decimal {
    let mut multiplier = Decimal::ONE;
    if vehicle.has_accident_history {
        multiplier *= ACCIDENT_MULTIPLIER;
    }
    if vehicle.has_service_history {
        multiplier *= SERVICE_MULTIPLIER;
    }
    multiplier
}

fn finish(
    variant: Variant,
    value: Decimal,
    offer: Option<Decimal>,
    contributing_factors: Vec<Factor>,
) -> ValuationResult {
    let estimate = round_eur(value);
    let mid = Decimal::from(estimate);
    ValuationResult {
        variant,
        estimated_market_value_eur: estimate,
        low_estimate_eur: round_eur(mid * BAND_LOW),
        high_estimate_eur: round_eur(mid * BAND_HIGH),
        dealer_offer_eur: offer.map(|pct| round_eur(mid * pct)),
        contributing_factors,
    }
}

fn contributing_factors(vehicle: &VehicleDescriptor, age: i64) -> Vec<Factor> {
    let mut factors = Vec::new();

    match market::lookup_make(&vehicle.make) {
        Some(entry) if entry.premium => factors.push(Factor::PremiumMake(entry.name.to_string())),
        Some(_) => {}
        None => factors.push(Factor::UnknownMake(vehicle.make.trim().to_string())),
    }

    if age <= RECENT_MODEL_MAX_AGE {
        factors.push(Factor::RecentModel);
    } else if age >= AGING_VEHICLE_MIN_AGE {
        factors.push(Factor::AgingVehicle);
    }

    if vehicle.mileage_km < LOW_MILEAGE_KM {
        factors.push(Factor::LowMileage);
    } else if vehicle.mileage_km > HIGH_MILEAGE_KM {
        factors.push(Factor::HighMileage);
    }

    match vehicle.condition {
        Condition::Excellent => factors.push(Factor::ExcellentCondition),
        Condition::Poor => factors.push(Factor::PoorCondition),
        _ => {}
    }

    if vehicle.has_accident_history {
        factors.push(Factor::AccidentHistory);
    }
    if vehicle.has_service_history {
        factors.push(Factor::ServiceHistory);
    }

    factors
}
