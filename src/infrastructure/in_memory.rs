use crate::domain::ports::TradeInStore;
use crate::domain::trade_in::TradeInRecord;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe in-memory store for trade-in records.
///
/// Uses `Arc<RwLock<HashMap<Uuid, TradeInRecord>>>` to allow shared concurrent access.
/// Records are lost when the process exits.
#[derive(Default, Clone)]
pub struct InMemoryTradeInStore {
    records: Arc<RwLock<HashMap<Uuid, TradeInRecord>>>,
}

impl InMemoryTradeInStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TradeInStore for InMemoryTradeInStore {
    async fn store(&self, record: TradeInRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.id, record);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<TradeInRecord>> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<TradeInRecord>> {
        let records = self.records.read().await;
        let mut all: Vec<TradeInRecord> = records.values().cloned().collect();
        all.sort_by_key(|record| (record.submitted_at, record.id));
        Ok(all)
    }
}
