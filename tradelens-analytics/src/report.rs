//! Report assembly: one pass that validates and sorts once, then feeds
//! every analytics component from the same prepared slice.

use serde::{Deserialize, Serialize};
use tradelens_core::TradeRecord;

use crate::aggregate::{
    by_session_valid, by_symbol_valid, by_weekday_valid, monthly_win_rates_valid,
    weekday_session_heatmap_valid, HeatmapCell, MonthlyWinRate, SessionStat, SymbolStat,
    WeekdayStat,
};
use crate::equity::{equity_series_valid, EquityPoint, ProfitPoint};
use crate::summary::{compute_summary_valid, DashboardSummary};
use crate::validate::{sort_by_open_time, valid_trades, ValidationError};

/// Everything the report generator and dashboard consume, in one
/// deterministic bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub summary: DashboardSummary,
    pub profit_time_series: Vec<ProfitPoint>,
    pub drawdown_time_series: Vec<EquityPoint>,
    pub monthly_win_rates: Vec<MonthlyWinRate>,
    pub time_zone_stats: Vec<SessionStat>,
    pub symbol_stats: Vec<SymbolStat>,
    pub weekday_stats: Vec<WeekdayStat>,
    pub weekday_time_zone_heatmap: Vec<HeatmapCell>,
    /// Trades dropped for missing an open time or profit. Surfaced so a
    /// caller can tell a short report from silently lost input.
    pub excluded_trades: usize,
}

/// Assemble the full report over a trade set in any order.
pub fn assemble_report(trades: &[TradeRecord]) -> Result<ReportData, ValidationError> {
    let mut valid = valid_trades(trades)?;
    sort_by_open_time(&mut valid);

    let drawdown_time_series = equity_series_valid(&valid);
    let profit_time_series = drawdown_time_series.iter().map(ProfitPoint::from).collect();

    Ok(ReportData {
        summary: compute_summary_valid(&valid),
        profit_time_series,
        drawdown_time_series,
        monthly_win_rates: monthly_win_rates_valid(&valid),
        time_zone_stats: by_session_valid(&valid),
        symbol_stats: by_symbol_valid(&valid),
        weekday_stats: by_weekday_valid(&valid),
        weekday_time_zone_heatmap: weekday_session_heatmap_valid(&valid),
        excluded_trades: trades.len() - valid.len(),
    })
}
