use crate::domain::valuation::ValuationResult;
use crate::domain::vehicle::VehicleDescriptor;
use crate::error::{Result, ValuationError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How long a trade-in offer stays valid.
pub const OFFER_VALIDITY_DAYS: i64 = 30;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeInStatus {
    Submitted,
    Reviewed,
    Expired,
}

impl TradeInStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeInStatus::Submitted => "SUBMITTED",
            TradeInStatus::Reviewed => "REVIEWED",
            TradeInStatus::Expired => "EXPIRED",
        }
    }
}

/// A formal trade-in application together with the valuation it was given.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TradeInRecord {
    pub id: Uuid,
    pub vehicle: VehicleDescriptor,
    pub valuation: ValuationResult,
    pub status: TradeInStatus,
    pub submitted_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TradeInRecord {
    pub fn new(vehicle: VehicleDescriptor, valuation: ValuationResult, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle,
            valuation,
            status: TradeInStatus::Submitted,
            submitted_at: now,
            expires_at: now + Duration::days(OFFER_VALIDITY_DAYS),
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Submitted -> Reviewed, only while the offer is still valid.
    pub fn review(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.status != TradeInStatus::Submitted || self.is_due(now) {
            return Err(self.transition_error(TradeInStatus::Reviewed));
        }
        self.status = TradeInStatus::Reviewed;
        Ok(())
    }

    /// Submitted | Reviewed -> Expired, once the validity window has passed.
    pub fn expire(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.status == TradeInStatus::Expired || !self.is_due(now) {
            return Err(self.transition_error(TradeInStatus::Expired));
        }
        self.status = TradeInStatus::Expired;
        Ok(())
    }

    fn transition_error(&self, to: TradeInStatus) -> ValuationError {
        ValuationError::InvalidTransition {
            id: self.id,
            from: self.status.as_str(),
            to: to.as_str(),
        }
    }
}
