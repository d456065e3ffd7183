use crate::domain::valuation::ValuationResult;
use crate::domain::vehicle::{Condition, VehicleDescriptor};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ValuationRow<'a> {
    make: &'a str,
    model: &'a str,
    year: i32,
    mileage: i64,
    condition: Condition,
    estimate: i64,
    low: i64,
    high: i64,
    offer: Option<i64>,
    factors: String,
}

/// Writes one CSV row per valuation; contributing factors are joined with `"; "`.
pub struct ValuationWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ValuationWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write(&mut self, vehicle: &VehicleDescriptor, result: &ValuationResult) -> Result<()> {
        let factors = result
            .contributing_factors
            .iter()
            .map(|factor| factor.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        self.writer.serialize(ValuationRow {
            make: &vehicle.make,
            model: &vehicle.model,
            year: vehicle.year,
            mileage: vehicle.mileage_km,
            condition: vehicle.condition,
            estimate: result.estimated_market_value_eur,
            low: result.low_estimate_eur,
            high: result.high_estimate_eur,
            offer: result.dealer_offer_eur,
            factors,
        })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
