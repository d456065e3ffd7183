use super::trade_in::TradeInRecord;
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait TradeInStore: Send + Sync {
    async fn store(&self, record: TradeInRecord) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<TradeInRecord>>;
    async fn get_all(&self) -> Result<Vec<TradeInRecord>>;
}

pub type TradeInStoreBox = Box<dyn TradeInStore>;
pub type TradeInStoreFactory = Box<dyn Fn() -> TradeInStoreBox + Send + Sync>;
