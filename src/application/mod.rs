//! Application layer orchestrating the valuation engine.
//!
//! `TradeInService` wraps the pure engine with the trade-in record lifecycle
//! and persists through the `TradeInStore` port. Rate limiting is an injected
//! `RateLimiter` instance rather than shared state.

pub mod rate_limit;
pub mod trade_in;
