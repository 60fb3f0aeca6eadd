//! Equity curve, drawdown, and streak computation.
//!
//! The equity walk is strictly sequential — every point depends on all
//! prior points — so these functions take trades already sorted ascending
//! by open time. Sorting is the caller's responsibility; the precondition
//! is validated and a violation is an error, because a silently wrong
//! equity curve is worse than a loud one.

use serde::{Deserialize, Serialize};
use tradelens_core::time::jst_date_string;
use tradelens_core::TradeRecord;

use crate::validate::{ensure_sorted, valid_trades, ValidTrade, ValidationError};

/// One point of the cumulative-equity walk, one per valid trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityPoint {
    /// JST calendar date of the trade's open, `YYYY-MM-DD`.
    pub date: String,
    /// Profit of this trade.
    pub profit: f64,
    /// Running balance after this trade.
    pub cumulative_profit: f64,
    /// Highest balance seen so far, including this point.
    pub peak: f64,
    /// `peak - cumulative_profit`; never negative.
    pub drawdown: f64,
    /// `100 * drawdown / peak` when the peak is positive, else 0.
    pub drawdown_percent: f64,
}

/// One point of the plain profit time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitPoint {
    pub date: String,
    pub profit: f64,
    pub cumulative_profit: f64,
}

impl From<&EquityPoint> for ProfitPoint {
    fn from(point: &EquityPoint) -> Self {
        ProfitPoint {
            date: point.date.clone(),
            profit: point.profit,
            cumulative_profit: point.cumulative_profit,
        }
    }
}

/// Longest runs of consecutive wins and losses.
///
/// Profit exactly 0 counts as a non-win: it extends the loss streak and
/// resets the win streak, matching the journal's historical convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streaks {
    pub max_win_streak: usize,
    pub max_loss_streak: usize,
}

/// Compute the equity/drawdown series over trades sorted ascending by
/// open time.
///
/// Trades without an open time or profit are excluded, not zero-filled.
pub fn equity_series(trades: &[TradeRecord]) -> Result<Vec<EquityPoint>, ValidationError> {
    let valid = valid_trades(trades)?;
    ensure_sorted(&valid)?;
    Ok(equity_series_valid(&valid))
}

/// Compute win/loss streaks over trades sorted ascending by open time.
pub fn streaks(trades: &[TradeRecord]) -> Result<Streaks, ValidationError> {
    let valid = valid_trades(trades)?;
    ensure_sorted(&valid)?;
    Ok(streaks_valid(&valid))
}

pub(crate) fn equity_series_valid(valid: &[ValidTrade<'_>]) -> Vec<EquityPoint> {
    let mut balance = 0.0_f64;
    let mut peak = 0.0_f64;
    let mut series = Vec::with_capacity(valid.len());

    for entry in valid {
        balance += entry.profit;
        peak = peak.max(balance);
        let drawdown = peak - balance;
        let drawdown_percent = if peak > 0.0 {
            100.0 * drawdown / peak
        } else {
            0.0
        };
        series.push(EquityPoint {
            date: jst_date_string(entry.open_time),
            profit: entry.profit,
            cumulative_profit: balance,
            peak,
            drawdown,
            drawdown_percent,
        });
    }
    series
}

pub(crate) fn streaks_valid(valid: &[ValidTrade<'_>]) -> Streaks {
    let mut result = Streaks::default();
    let mut current_wins = 0;
    let mut current_losses = 0;

    for entry in valid {
        if entry.is_winner() {
            current_wins += 1;
            current_losses = 0;
            result.max_win_streak = result.max_win_streak.max(current_wins);
        } else {
            current_losses += 1;
            current_wins = 0;
            result.max_loss_streak = result.max_loss_streak.max(current_losses);
        }
    }
    result
}
