//! Shared constructors for unit tests.

use chrono::{DateTime, TimeZone, Utc};
use tradelens_core::time::jst_offset;
use tradelens_core::{Side, TradeId, TradeRecord};

/// UTC instant whose JST clock reads the given date and hour.
pub fn utc_at_jst(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    jst_offset()
        .with_ymd_and_hms(y, m, d, h, 0, 0)
        .unwrap()
        .with_timezone(&Utc)
}

/// A minimal USDJPY buy trade opened at the given JST date/hour.
pub fn trade_at_jst(ticket: i64, y: i32, m: u32, d: u32, h: u32, profit: Option<f64>) -> TradeRecord {
    TradeRecord {
        id: TradeId(ticket),
        ticket,
        symbol: "USDJPY".into(),
        side: Side::Buy,
        size: 1.0,
        open_time: Some(utc_at_jst(y, m, d, h)),
        close_time: None,
        open_price: 150.0,
        close_price: None,
        stop_loss: None,
        take_profit: None,
        commission: None,
        tax: None,
        swap: None,
        profit,
        memo: None,
        batch_id: None,
    }
}

/// Same, with a caller-chosen symbol.
pub fn symbol_trade_at_jst(
    ticket: i64,
    symbol: &str,
    y: i32,
    m: u32,
    d: u32,
    h: u32,
    profit: Option<f64>,
) -> TradeRecord {
    TradeRecord {
        symbol: symbol.into(),
        ..trade_at_jst(ticket, y, m, d, h, profit)
    }
}

/// A trade whose open timestamp failed to parse upstream.
pub fn trade_without_open_time(ticket: i64, profit: Option<f64>) -> TradeRecord {
    TradeRecord {
        open_time: None,
        ..trade_at_jst(ticket, 2025, 1, 6, 10, profit)
    }
}
