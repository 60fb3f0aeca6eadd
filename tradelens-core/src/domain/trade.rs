//! TradeRecord — a normalized FX trade produced by import or manual entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ImportBatchId, TradeId};

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

/// A normalized trade record.
///
/// Produced by the file-import collaborator or manual entry; immutable
/// except for memo corrections. Open timestamps may be absent when the
/// broker export carried an unparseable value, and profit is absent for
/// still-open positions — analytics excludes such trades rather than
/// treating the missing values as zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeRecord {
    pub id: TradeId,
    pub ticket: i64,
    pub symbol: String,
    pub side: Side,
    /// Position size in lots.
    pub size: f64,
    pub open_time: Option<DateTime<Utc>>,
    pub close_time: Option<DateTime<Utc>>,
    pub open_price: f64,
    pub close_price: Option<f64>,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub commission: Option<f64>,
    pub tax: Option<f64>,
    pub swap: Option<f64>,
    /// Signed net profit; `None` while the position is still open.
    pub profit: Option<f64>,
    pub memo: Option<String>,
    pub batch_id: Option<ImportBatchId>,
}

impl TradeRecord {
    /// A trade participates in analytics only with both an open instant
    /// and a realized profit.
    pub fn is_valid_for_analytics(&self) -> bool {
        self.open_time.is_some() && self.profit.is_some()
    }

    /// Strictly positive profit.
    pub fn is_winner(&self) -> bool {
        matches!(self.profit, Some(p) if p > 0.0)
    }
}
