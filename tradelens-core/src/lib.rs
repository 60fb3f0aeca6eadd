//! TradeLens Core — trade domain types, market-session classification, time handling.
//!
//! This crate contains the foundation of the trading journal:
//! - Domain types (trade records, sides, identifiers)
//! - Validated trade filter (replaces the upstream loosely-typed filter objects)
//! - JST session windows (Tokyo / London / New York / Other)
//! - Trading-weekday bucketing with the Saturday carry-over rule
//! - Broker server-time parsing and fixed-offset JST conversion
//! - Content fingerprinting for analysis caching

pub mod domain;
pub mod fingerprint;
pub mod session;
pub mod time;

pub use domain::{FilterError, ImportBatchId, Side, TradeFilter, TradeId, TradeRecord};
pub use fingerprint::{trade_set_fingerprint, Fingerprint};
pub use session::{classify_session, trading_weekday, MarketSession};
