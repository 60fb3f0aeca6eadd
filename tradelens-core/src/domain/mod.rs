//! Domain types for the trading journal.

pub mod filter;
pub mod ids;
pub mod trade;

pub use filter::{FilterError, TradeFilter};
pub use ids::{ImportBatchId, TradeId};
pub use trade::{Side, TradeRecord};
