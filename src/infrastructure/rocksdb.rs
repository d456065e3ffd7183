use crate::domain::ports::TradeInStore;
use crate::domain::trade_in::TradeInRecord;
use crate::error::{Result, ValuationError};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Column Family for storing trade-in records.
pub const CF_TRADE_INS: &str = "trade_ins";

/// A persistent trade-in store backed by RocksDB.
///
/// Records are keyed by the 16 raw bytes of their UUID and stored as JSON.
/// `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at `path`, creating the column family if missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_trade_ins = ColumnFamilyDescriptor::new(CF_TRADE_INS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_trade_ins])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn trade_ins(&self) -> Result<&ColumnFamily> {
        self.db.cf_handle(CF_TRADE_INS).ok_or_else(|| {
            ValuationError::InternalError(Box::new(std::io::Error::other(
                "Trade-in column family not found",
            )))
        })
    }
}

#[async_trait]
impl TradeInStore for RocksDBStore {
    async fn store(&self, record: TradeInRecord) -> Result<()> {
        let cf = self.trade_ins()?;
        let value = serde_json::to_vec(&record)?;
        self.db.put_cf(cf, record.id.as_bytes(), value)?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<TradeInRecord>> {
        let cf = self.trade_ins()?;
        match self.db.get_pinned_cf(cf, id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> Result<Vec<TradeInRecord>> {
        let cf = self.trade_ins()?;
        let mut records = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            records.push(serde_json::from_slice::<TradeInRecord>(&value)?);
        }
        records.sort_by_key(|record| (record.submitted_at, record.id));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::engine::ValuationEngine;
    use crate::domain::trade_in::TradeInStatus;
    use crate::domain::vehicle::{Condition, VehicleDescriptor};
    use chrono::Utc;
    use tempfile::tempdir;

    fn record() -> TradeInRecord {
        let vehicle = VehicleDescriptor::new("Mazda", "CX-5", 2021, 60_000, Condition::VeryGood)
            .with_service_history(true);
        let valuation = ValuationEngine::new(2026).estimate(&vehicle).unwrap();
        TradeInRecord::new(vehicle, valuation, Utc::now())
    }

    #[tokio::test]
    async fn test_rocksdb_open_cf() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).expect("Failed to open RocksDB");
        assert!(store.db.cf_handle(CF_TRADE_INS).is_some());
    }

    #[tokio::test]
    async fn test_rocksdb_trade_in_store() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).unwrap();

        let mut record = record();
        store.store(record.clone()).await.unwrap();
        assert_eq!(store.get(record.id).await.unwrap().unwrap(), record);

        record.status = TradeInStatus::Reviewed;
        store.store(record.clone()).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, TradeInStatus::Reviewed);

        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }
}
