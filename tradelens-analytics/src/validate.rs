//! Input validation shared by every analytics pass.
//!
//! A trade is admitted to analytics when it has both an open instant and a
//! realized profit; everything else is excluded up front, never treated as
//! zero. A non-finite profit is a hard error — NaN must not propagate
//! silently through the aggregates.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tradelens_core::TradeRecord;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("trade ticket {ticket} has non-finite profit")]
    NonFiniteProfit { ticket: i64 },
    #[error("trades must be sorted ascending by open time (violation at index {index})")]
    UnsortedInput { index: usize },
}

/// A trade admitted to analytics, with the optional fields unwrapped once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ValidTrade<'a> {
    pub trade: &'a TradeRecord,
    pub open_time: DateTime<Utc>,
    pub profit: f64,
}

impl ValidTrade<'_> {
    pub fn is_winner(&self) -> bool {
        self.profit > 0.0
    }
}

/// Extract the trades that participate in analytics, in input order.
pub(crate) fn valid_trades(trades: &[TradeRecord]) -> Result<Vec<ValidTrade<'_>>, ValidationError> {
    let mut out = Vec::with_capacity(trades.len());
    for trade in trades {
        let (open_time, profit) = match (trade.open_time, trade.profit) {
            (Some(t), Some(p)) => (t, p),
            _ => continue,
        };
        if !profit.is_finite() {
            return Err(ValidationError::NonFiniteProfit {
                ticket: trade.ticket,
            });
        }
        out.push(ValidTrade {
            trade,
            open_time,
            profit,
        });
    }
    Ok(out)
}

/// Validate the ascending-open-time precondition.
pub(crate) fn ensure_sorted(valid: &[ValidTrade<'_>]) -> Result<(), ValidationError> {
    for index in 1..valid.len() {
        if valid[index].open_time < valid[index - 1].open_time {
            return Err(ValidationError::UnsortedInput { index });
        }
    }
    Ok(())
}

/// Sort ascending by open time. Stable, so same-instant trades keep their
/// input order.
pub(crate) fn sort_by_open_time(valid: &mut [ValidTrade<'_>]) {
    valid.sort_by_key(|v| v.open_time);
}
