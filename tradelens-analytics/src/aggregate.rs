//! Multi-dimensional aggregation: session, symbol, weekday, weekday×session.
//!
//! Fixed-cardinality dimensions (session, weekday, heatmap) always emit
//! every bucket — zero-count included — so downstream consumers get a
//! complete, stable shape. Symbol buckets are emitted in alphabetical
//! order, which is deterministic across invocations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tradelens_core::session::WEEKDAY_LABELS;
use tradelens_core::time::jst_month_string;
use tradelens_core::{classify_session, trading_weekday, MarketSession, TradeRecord};

use crate::validate::{valid_trades, ValidTrade, ValidationError};

/// Per-session aggregate, in canonical tokyo/london/newyork/other order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStat {
    pub zone: MarketSession,
    pub label: String,
    pub trades: usize,
    pub win_rate: f64,
    pub total_profit: f64,
}

/// Per-symbol aggregate; one entry per distinct symbol observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolStat {
    pub symbol: String,
    pub trades: usize,
    pub win_rate: f64,
    pub total_profit: f64,
}

/// Per-weekday aggregate, weekday 1 (Monday) through 5 (Friday).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayStat {
    pub weekday: u32,
    pub label: String,
    pub trades: usize,
    pub win_rate: f64,
    pub total_profit: f64,
}

/// One cell of the weekday × session heatmap. Exactly 20 cells are
/// emitted: weekday-major, session in canonical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    pub weekday: u32,
    pub zone: MarketSession,
    pub win_rate: f64,
    pub trades: usize,
}

/// Win rate and trade count for one JST calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyWinRate {
    /// `YYYY-MM` in JST.
    pub month: String,
    pub win_rate: f64,
    pub trades: usize,
}

/// Count/win/profit accumulator shared by every dimension.
#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    trades: usize,
    wins: usize,
    total_profit: f64,
}

impl Bucket {
    fn add(&mut self, entry: &ValidTrade<'_>) {
        self.trades += 1;
        if entry.is_winner() {
            self.wins += 1;
        }
        self.total_profit += entry.profit;
    }

    fn win_rate(&self) -> f64 {
        if self.trades == 0 {
            0.0
        } else {
            100.0 * self.wins as f64 / self.trades as f64
        }
    }
}

/// Aggregate by market session: always exactly 4 buckets.
pub fn by_session(trades: &[TradeRecord]) -> Result<Vec<SessionStat>, ValidationError> {
    Ok(by_session_valid(&valid_trades(trades)?))
}

/// Aggregate by symbol, alphabetically. Unbounded cardinality.
pub fn by_symbol(trades: &[TradeRecord]) -> Result<Vec<SymbolStat>, ValidationError> {
    Ok(by_symbol_valid(&valid_trades(trades)?))
}

/// Aggregate by trading weekday: always exactly 5 buckets (Mon–Fri).
pub fn by_weekday(trades: &[TradeRecord]) -> Result<Vec<WeekdayStat>, ValidationError> {
    Ok(by_weekday_valid(&valid_trades(trades)?))
}

/// Weekday × session heatmap: always exactly 20 cells.
pub fn weekday_session_heatmap(trades: &[TradeRecord]) -> Result<Vec<HeatmapCell>, ValidationError> {
    Ok(weekday_session_heatmap_valid(&valid_trades(trades)?))
}

/// Win rate per JST calendar month, ascending by month key.
pub fn monthly_win_rates(trades: &[TradeRecord]) -> Result<Vec<MonthlyWinRate>, ValidationError> {
    Ok(monthly_win_rates_valid(&valid_trades(trades)?))
}

pub(crate) fn by_session_valid(valid: &[ValidTrade<'_>]) -> Vec<SessionStat> {
    let mut buckets = [Bucket::default(); 4];
    for entry in valid {
        buckets[classify_session(entry.open_time).index()].add(entry);
    }
    MarketSession::ALL
        .iter()
        .map(|session| {
            let bucket = &buckets[session.index()];
            SessionStat {
                zone: *session,
                label: session.label().to_string(),
                trades: bucket.trades,
                win_rate: bucket.win_rate(),
                total_profit: bucket.total_profit,
            }
        })
        .collect()
}

pub(crate) fn by_symbol_valid(valid: &[ValidTrade<'_>]) -> Vec<SymbolStat> {
    let mut buckets: BTreeMap<&str, Bucket> = BTreeMap::new();
    for entry in valid {
        buckets.entry(&entry.trade.symbol).or_default().add(entry);
    }
    buckets
        .into_iter()
        .map(|(symbol, bucket)| SymbolStat {
            symbol: symbol.to_string(),
            trades: bucket.trades,
            win_rate: bucket.win_rate(),
            total_profit: bucket.total_profit,
        })
        .collect()
}

pub(crate) fn by_weekday_valid(valid: &[ValidTrade<'_>]) -> Vec<WeekdayStat> {
    let mut buckets = [Bucket::default(); 5];
    for entry in valid {
        if let Some(weekday) = trading_weekday(entry.open_time) {
            buckets[(weekday - 1) as usize].add(entry);
        }
    }
    buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| WeekdayStat {
            weekday: i as u32 + 1,
            label: WEEKDAY_LABELS[i].to_string(),
            trades: bucket.trades,
            win_rate: bucket.win_rate(),
            total_profit: bucket.total_profit,
        })
        .collect()
}

pub(crate) fn weekday_session_heatmap_valid(valid: &[ValidTrade<'_>]) -> Vec<HeatmapCell> {
    let mut buckets = [[Bucket::default(); 4]; 5];
    for entry in valid {
        if let Some(weekday) = trading_weekday(entry.open_time) {
            let session = classify_session(entry.open_time);
            buckets[(weekday - 1) as usize][session.index()].add(entry);
        }
    }
    let mut cells = Vec::with_capacity(20);
    for (i, row) in buckets.iter().enumerate() {
        for session in MarketSession::ALL {
            let bucket = &row[session.index()];
            cells.push(HeatmapCell {
                weekday: i as u32 + 1,
                zone: session,
                win_rate: bucket.win_rate(),
                trades: bucket.trades,
            });
        }
    }
    cells
}

pub(crate) fn monthly_win_rates_valid(valid: &[ValidTrade<'_>]) -> Vec<MonthlyWinRate> {
    let mut buckets: BTreeMap<String, Bucket> = BTreeMap::new();
    for entry in valid {
        buckets
            .entry(jst_month_string(entry.open_time))
            .or_default()
            .add(entry);
    }
    buckets
        .into_iter()
        .map(|(month, bucket)| MonthlyWinRate {
            month,
            win_rate: bucket.win_rate(),
            trades: bucket.trades,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{symbol_trade_at_jst, trade_at_jst, trade_without_open_time};

    #[test]
    fn session_buckets_are_complete_and_ordered() {
        // 10:00 Tokyo, 17:00 London, 23:00 New York — nothing in Other.
        let trades = vec![
            trade_at_jst(1, 2025, 1, 6, 10, Some(10.0)),
            trade_at_jst(2, 2025, 1, 6, 17, Some(10.0)),
            trade_at_jst(3, 2025, 1, 6, 23, Some(10.0)),
        ];
        let stats = by_session(&trades).unwrap();
        assert_eq!(stats.len(), 4);
        let zones: Vec<MarketSession> = stats.iter().map(|s| s.zone).collect();
        assert_eq!(zones, MarketSession::ALL.to_vec());

        for stat in &stats[..3] {
            assert_eq!(stat.trades, 1);
            assert_eq!(stat.win_rate, 100.0);
            assert_eq!(stat.total_profit, 10.0);
        }
        assert_eq!(stats[3].trades, 0);
        assert_eq!(stats[3].win_rate, 0.0);
        assert_eq!(stats[3].total_profit, 0.0);
    }

    #[test]
    fn session_counts_sum_to_classifiable_trades() {
        let mut trades: Vec<_> = (0..24)
            .map(|h| trade_at_jst(h as i64 + 1, 2025, 1, 6, h, Some(1.0)))
            .collect();
        trades.push(trade_without_open_time(100, Some(5.0)));
        let stats = by_session(&trades).unwrap();
        let total: usize = stats.iter().map(|s| s.trades).sum();
        assert_eq!(total, 24);
    }

    #[test]
    fn symbol_buckets_are_alphabetical() {
        let trades = vec![
            symbol_trade_at_jst(1, "USDJPY", 2025, 1, 6, 10, Some(100.0)),
            symbol_trade_at_jst(2, "EURUSD", 2025, 1, 6, 11, Some(-40.0)),
            symbol_trade_at_jst(3, "USDJPY", 2025, 1, 6, 12, Some(-60.0)),
        ];
        let stats = by_symbol(&trades).unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].symbol, "EURUSD");
        assert_eq!(stats[1].symbol, "USDJPY");
        assert_eq!(stats[1].trades, 2);
        assert_eq!(stats[1].win_rate, 50.0);
        assert_eq!(stats[1].total_profit, 40.0);
    }

    #[test]
    fn weekday_buckets_always_emit_five() {
        let stats = by_weekday(&[]).unwrap();
        assert_eq!(stats.len(), 5);
        assert_eq!(stats[0].weekday, 1);
        assert_eq!(stats[0].label, "月曜日");
        assert_eq!(stats[4].weekday, 5);
        assert!(stats.iter().all(|s| s.trades == 0 && s.win_rate == 0.0));
    }

    #[test]
    fn early_saturday_counts_as_friday() {
        // 2025-01-11 is a Saturday. 05:00 JST carries over to Friday.
        let trades = vec![trade_at_jst(1, 2025, 1, 11, 5, Some(-20.0))];
        let stats = by_weekday(&trades).unwrap();
        assert_eq!(stats[4].trades, 1);
        assert_eq!(stats[4].total_profit, -20.0);
    }

    #[test]
    fn late_saturday_is_dropped_from_weekdays() {
        let trades = vec![trade_at_jst(1, 2025, 1, 11, 12, Some(-20.0))];
        let stats = by_weekday(&trades).unwrap();
        assert!(stats.iter().all(|s| s.trades == 0));
    }

    #[test]
    fn heatmap_has_twenty_cells_in_canonical_order() {
        let cells = weekday_session_heatmap(&[]).unwrap();
        assert_eq!(cells.len(), 20);
        for (i, cell) in cells.iter().enumerate() {
            assert_eq!(cell.weekday, i as u32 / 4 + 1);
            assert_eq!(cell.zone, MarketSession::ALL[i % 4]);
        }
    }

    #[test]
    fn heatmap_places_trades_in_the_right_cell() {
        // Monday 10:00 JST → weekday 1, Tokyo; Saturday 03:00 → weekday 5, New York.
        let trades = vec![
            trade_at_jst(1, 2025, 1, 6, 10, Some(50.0)),
            trade_at_jst(2, 2025, 1, 11, 3, Some(-10.0)),
        ];
        let cells = weekday_session_heatmap(&trades).unwrap();
        let monday_tokyo = &cells[0];
        assert_eq!(monday_tokyo.trades, 1);
        assert_eq!(monday_tokyo.win_rate, 100.0);
        let friday_newyork = cells
            .iter()
            .find(|c| c.weekday == 5 && c.zone == MarketSession::NewYork)
            .unwrap();
        assert_eq!(friday_newyork.trades, 1);
        assert_eq!(friday_newyork.win_rate, 0.0);
    }

    #[test]
    fn monthly_win_rates_sorted_ascending() {
        let trades = vec![
            trade_at_jst(1, 2025, 2, 3, 10, Some(10.0)),
            trade_at_jst(2, 2025, 1, 6, 10, Some(-10.0)),
            trade_at_jst(3, 2025, 1, 7, 10, Some(10.0)),
        ];
        let months = monthly_win_rates(&trades).unwrap();
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, "2025-01");
        assert_eq!(months[0].trades, 2);
        assert_eq!(months[0].win_rate, 50.0);
        assert_eq!(months[1].month, "2025-02");
        assert_eq!(months[1].win_rate, 100.0);
    }

    #[test]
    fn null_profit_trades_are_excluded_everywhere() {
        let trades = vec![
            trade_at_jst(1, 2025, 1, 6, 10, Some(10.0)),
            trade_at_jst(2, 2025, 1, 6, 10, None),
        ];
        assert_eq!(by_session(&trades).unwrap()[0].trades, 1);
        assert_eq!(by_symbol(&trades).unwrap()[0].trades, 1);
        assert_eq!(by_weekday(&trades).unwrap()[0].trades, 1);
    }

    #[test]
    fn session_stat_serializes_contract_keys() {
        let stats = by_session(&[trade_at_jst(1, 2025, 1, 6, 10, Some(1.0))]).unwrap();
        let json = serde_json::to_value(&stats[0]).unwrap();
        assert_eq!(json["zone"], "tokyo");
        assert_eq!(json["label"], "東京");
        assert!(json.get("winRate").is_some());
        assert!(json.get("totalProfit").is_some());
    }
}
