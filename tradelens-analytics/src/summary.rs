//! Dashboard headline figures.
//!
//! Every ratio here has an explicit zero convention: an empty journal, a
//! loss-free month, or a win-free month must produce plain zeros, never
//! NaN or infinity, because these numbers are serialized straight into the
//! UI contract.

use serde::{Deserialize, Serialize};
use tradelens_core::TradeRecord;

use crate::equity::{equity_series_valid, streaks_valid};
use crate::validate::{sort_by_open_time, valid_trades, ValidTrade, ValidationError};

/// Headline statistics for the dashboard. All monetary loss figures are
/// reported as positive magnitudes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub net_profit: f64,
    pub total_trades: usize,
    pub win_rate: f64,
    /// `gross_profit / gross_loss`; 0 when there are no losses, even if
    /// gross profit is positive.
    pub profit_factor: f64,
    pub avg_profit: f64,
    pub avg_loss: f64,
    pub largest_profit: f64,
    pub largest_loss: f64,
    pub max_win_streak: usize,
    pub max_loss_streak: usize,
    pub max_drawdown: f64,
    pub max_drawdown_percent: f64,
    /// `avg_profit / avg_loss`; 0 unless both wins and losses exist.
    pub risk_reward_ratio: f64,
}

/// Compute the dashboard summary over a trade set in any order.
///
/// Trades are sorted by open time internally before the streak and
/// drawdown walks; callers do not need to pre-sort.
pub fn compute_summary(trades: &[TradeRecord]) -> Result<DashboardSummary, ValidationError> {
    let mut valid = valid_trades(trades)?;
    sort_by_open_time(&mut valid);
    Ok(compute_summary_valid(&valid))
}

/// Summary over already-validated, already-sorted trades.
pub(crate) fn compute_summary_valid(valid: &[ValidTrade<'_>]) -> DashboardSummary {
    let mut summary = DashboardSummary::default();
    summary.total_trades = valid.len();

    let mut wins = 0usize;
    let mut losses = 0usize;
    for entry in valid {
        if entry.profit > 0.0 {
            wins += 1;
            summary.gross_profit += entry.profit;
            summary.largest_profit = summary.largest_profit.max(entry.profit);
        } else if entry.profit < 0.0 {
            losses += 1;
            summary.gross_loss += -entry.profit;
            summary.largest_loss = summary.largest_loss.max(-entry.profit);
        }
        summary.net_profit += entry.profit;
    }

    if !valid.is_empty() {
        summary.win_rate = 100.0 * wins as f64 / valid.len() as f64;
    }
    if summary.gross_loss > 0.0 {
        summary.profit_factor = summary.gross_profit / summary.gross_loss;
    }
    if wins > 0 {
        summary.avg_profit = summary.gross_profit / wins as f64;
    }
    if losses > 0 {
        summary.avg_loss = summary.gross_loss / losses as f64;
    }
    if wins > 0 && losses > 0 {
        summary.risk_reward_ratio = summary.avg_profit / summary.avg_loss;
    }

    let streaks = streaks_valid(valid);
    summary.max_win_streak = streaks.max_win_streak;
    summary.max_loss_streak = streaks.max_loss_streak;

    for point in equity_series_valid(valid) {
        summary.max_drawdown = summary.max_drawdown.max(point.drawdown);
        summary.max_drawdown_percent = summary.max_drawdown_percent.max(point.drawdown_percent);
    }

    summary
}
