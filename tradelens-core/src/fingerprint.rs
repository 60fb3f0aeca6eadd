//! Content fingerprinting — deterministic identification of a trade set.
//!
//! The analysis cache is keyed by the full input payload: the trades under
//! analysis plus the filter that selected them. Identical inputs share a
//! cache entry; any change to either produces a new key, so a cached
//! result can never be served for stale aggregates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{TradeFilter, TradeRecord};

/// Blake3 digest in hex form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Fingerprint(blake3::hash(bytes).to_hex().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content hash of a filtered trade set.
///
/// Canonical serialization: JSON with struct-declaration field order, so
/// hashing is deterministic across invocations.
pub fn trade_set_fingerprint(trades: &[TradeRecord], filter: Option<&TradeFilter>) -> Fingerprint {
    let mut bytes = serde_json::to_vec(trades).expect("TradeRecord must serialize");
    if let Some(filter) = filter {
        bytes.extend(serde_json::to_vec(filter).expect("TradeFilter must serialize"));
    }
    Fingerprint::from_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Side, TradeId};
    use chrono::TimeZone;

    fn sample_trade(ticket: i64, profit: f64) -> TradeRecord {
        TradeRecord {
            id: TradeId(ticket),
            ticket,
            symbol: "USDJPY".into(),
            side: Side::Buy,
            size: 1.0,
            open_time: Some(chrono::Utc.with_ymd_and_hms(2025, 1, 6, 1, 0, 0).unwrap()),
            close_time: None,
            open_price: 150.0,
            close_price: None,
            stop_loss: None,
            take_profit: None,
            commission: None,
            tax: None,
            swap: None,
            profit: Some(profit),
            memo: None,
            batch_id: None,
        }
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let trades = vec![sample_trade(1, 100.0), sample_trade(2, -50.0)];
        assert_eq!(
            trade_set_fingerprint(&trades, None),
            trade_set_fingerprint(&trades, None)
        );
    }

    #[test]
    fn fingerprint_changes_with_trades() {
        let a = vec![sample_trade(1, 100.0)];
        let b = vec![sample_trade(1, 100.5)];
        assert_ne!(
            trade_set_fingerprint(&a, None),
            trade_set_fingerprint(&b, None)
        );
    }

    #[test]
    fn fingerprint_changes_with_filter() {
        let trades = vec![sample_trade(1, 100.0)];
        let filter = TradeFilter {
            symbols: vec!["USDJPY".into()],
            ..Default::default()
        };
        assert_ne!(
            trade_set_fingerprint(&trades, None),
            trade_set_fingerprint(&trades, Some(&filter))
        );
    }

    #[test]
    fn fingerprint_is_order_sensitive() {
        let ab = vec![sample_trade(1, 100.0), sample_trade(2, -50.0)];
        let ba = vec![sample_trade(2, -50.0), sample_trade(1, 100.0)];
        assert_ne!(
            trade_set_fingerprint(&ab, None),
            trade_set_fingerprint(&ba, None)
        );
    }
}
