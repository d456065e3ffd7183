//! Domain layer: vehicle descriptions, the valuation engine and the trade-in record.
//!
//! Everything here is synchronous and free of I/O except the [`ports`] traits,
//! which adapters in `infrastructure` implement.

pub mod engine;
pub mod market;
pub mod ports;
pub mod trade_in;
pub mod valuation;
pub mod vehicle;
