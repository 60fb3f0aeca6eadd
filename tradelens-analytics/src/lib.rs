//! TradeLens Analytics — equity curves, streaks, aggregation, and report assembly.
//!
//! Everything here is pure computation over `TradeRecord` slices:
//! - Equity/drawdown series and win/loss streaks over sorted trades
//! - Session, symbol, weekday, and weekday×session aggregation
//! - Dashboard summary with explicit zero conventions (no NaN, no infinity)
//! - `assemble_report` bundling all of the above deterministically
//! - A bounded, TTL-expiring cache keyed by trade-set fingerprint

pub mod aggregate;
pub mod cache;
pub mod equity;
pub mod report;
pub mod summary;

mod validate;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregate::{
    by_session, by_symbol, by_weekday, monthly_win_rates, weekday_session_heatmap, HeatmapCell,
    MonthlyWinRate, SessionStat, SymbolStat, WeekdayStat,
};
pub use cache::AnalysisCache;
pub use equity::{equity_series, streaks, EquityPoint, ProfitPoint, Streaks};
pub use report::{assemble_report, ReportData};
pub use summary::{compute_summary, DashboardSummary};
pub use validate::ValidationError;
