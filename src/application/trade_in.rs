use crate::application::rate_limit::RateLimiter;
use crate::domain::engine::ValuationEngine;
use crate::domain::ports::TradeInStoreBox;
use crate::domain::trade_in::{TradeInRecord, TradeInStatus};
use crate::domain::vehicle::VehicleDescriptor;
use crate::error::{Result, ValuationError};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Runs formal trade-in valuations and keeps their records.
///
/// The engine stays pure; this service owns the store and, optionally,
/// a rate limiter injected by the caller.
pub struct TradeInService {
    engine: ValuationEngine,
    store: TradeInStoreBox,
    limiter: Option<RateLimiter>,
}

impl TradeInService {
    pub fn new(engine: ValuationEngine, store: TradeInStoreBox) -> Self {
        Self {
            engine,
            store,
            limiter: None,
        }
    }

    pub fn with_rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// Values the vehicle and records a `SUBMITTED` application valid for 30 days.
    pub async fn submit(
        &self,
        vehicle: VehicleDescriptor,
        submitter: &str,
        now: DateTime<Utc>,
    ) -> Result<TradeInRecord> {
        let valuation = self.engine.formal_valuation(&vehicle)?;
        if let Some(limiter) = &self.limiter {
            limiter.check(submitter, now).await?;
        }

        let record = TradeInRecord::new(vehicle, valuation, now);
        self.store.store(record.clone()).await?;

        tracing::info!(
            id = %record.id,
            make = %record.vehicle.make,
            offer = ?record.valuation.dealer_offer_eur,
            expires_at = %record.expires_at,
            "trade-in submitted"
        );
        Ok(record)
    }

    pub async fn get(&self, id: Uuid) -> Result<TradeInRecord> {
        self.store
            .get(id)
            .await?
            .ok_or(ValuationError::NotFound(id))
    }

    pub async fn review(&self, id: Uuid, now: DateTime<Utc>) -> Result<TradeInRecord> {
        let mut record = self.get(id).await?;
        record.review(now)?;
        self.store.store(record.clone()).await?;
        tracing::info!(id = %id, "trade-in reviewed");
        Ok(record)
    }

    /// Expires every record whose validity window has passed. Returns how many changed.
    pub async fn expire_due(&self, now: DateTime<Utc>) -> Result<usize> {
        let mut expired = 0;
        for mut record in self.store.get_all().await? {
            if record.status != TradeInStatus::Expired && record.is_due(now) {
                record.expire(now)?;
                self.store.store(record).await?;
                expired += 1;
            }
        }
        if expired > 0 {
            tracing::info!(expired, "expired trade-in offers");
        }
        Ok(expired)
    }

    /// Consumes the service and returns every stored record.
    pub async fn into_records(self) -> Result<Vec<TradeInRecord>> {
        self.store.get_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::Condition;
    use crate::infrastructure::in_memory::InMemoryTradeInStore;
    use chrono::{Duration, TimeZone};

    fn service() -> TradeInService {
        TradeInService::new(
            ValuationEngine::new(2026),
            Box::new(InMemoryTradeInStore::new()),
        )
    }

    fn vehicle() -> VehicleDescriptor {
        VehicleDescriptor::new("Honda", "Civic", 2019, 95_000, Condition::Good)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_submit_stores_formal_valuation() {
        let service = service();
        let record = service.submit(vehicle(), "web", now()).await.unwrap();

        assert_eq!(record.status, TradeInStatus::Submitted);
        assert!(record.valuation.dealer_offer_eur.is_some());
        assert_eq!(record.expires_at, now() + Duration::days(30));
        assert_eq!(service.get(record.id).await.unwrap(), record);
    }

    #[tokio::test]
    async fn test_submit_rejects_invalid_vehicle() {
        let service = service();
        let mut vehicle = vehicle();
        vehicle.mileage_km = -10;

        assert!(matches!(
            service.submit(vehicle, "web", now()).await,
            Err(ValuationError::InvalidMileage(-10))
        ));
        assert!(service.into_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_review_unknown_record() {
        let service = service();
        let id = Uuid::new_v4();
        assert!(matches!(
            service.review(id, now()).await,
            Err(ValuationError::NotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn test_review_and_expiry_sweep() {
        let service = service();
        let reviewed = service.submit(vehicle(), "web", now()).await.unwrap();
        let pending = service
            .submit(vehicle(), "web", now() + Duration::days(10))
            .await
            .unwrap();

        service
            .review(reviewed.id, now() + Duration::days(1))
            .await
            .unwrap();

        assert_eq!(service.expire_due(now() + Duration::days(29)).await.unwrap(), 0);
        assert_eq!(service.expire_due(now() + Duration::days(30)).await.unwrap(), 1);
        assert_eq!(service.expire_due(now() + Duration::days(40)).await.unwrap(), 1);
        assert_eq!(service.expire_due(now() + Duration::days(90)).await.unwrap(), 0);

        let records = service.into_records().await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.status == TradeInStatus::Expired));
        assert!(records.iter().any(|r| r.id == pending.id));
    }

    #[tokio::test]
    async fn test_injected_rate_limiter() {
        let service = service().with_rate_limiter(RateLimiter::new(1, Duration::hours(1)));

        service.submit(vehicle(), "10.1.1.1", now()).await.unwrap();
        assert!(matches!(
            service.submit(vehicle(), "10.1.1.1", now()).await,
            Err(ValuationError::RateLimited { .. })
        ));
        service.submit(vehicle(), "10.1.1.2", now()).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_vehicle_does_not_use_quota() {
        let service = service().with_rate_limiter(RateLimiter::new(1, Duration::hours(1)));
        let mut invalid = vehicle();
        invalid.mileage_km = -1;

        assert!(matches!(
            service.submit(invalid, "10.1.1.1", now()).await,
            Err(ValuationError::InvalidMileage(-1))
        ));
        service.submit(vehicle(), "10.1.1.1", now()).await.unwrap();
        assert!(matches!(
            service.submit(vehicle(), "10.1.1.1", now()).await,
            Err(ValuationError::RateLimited { .. })
        ));
    }
}
