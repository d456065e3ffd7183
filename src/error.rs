use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ValuationError {
    #[error("Invalid vehicle year {year}: expected 1900..={max}")]
    InvalidVehicleYear { year: i32, max: i32 },
    #[error("Invalid mileage {0}: must not be negative")]
    InvalidMileage(i64),
    #[error("Trade-in record {0} not found")]
    NotFound(Uuid),
    #[error("Invalid status transition for {id}: {from} -> {to}")]
    InvalidTransition {
        id: Uuid,
        from: &'static str,
        to: &'static str,
    },
    #[error("Rate limit exceeded for {key}")]
    RateLimited { key: String },
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    RocksDbError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, ValuationError>;
