//! Market-session classification on the JST clock.
//!
//! Sessions are coarse market-hours buckets derived from the hour in JST.
//! Classification is total: every instant maps to exactly one session.
//! Boundary hours are fixed constants; hours covered by no named session
//! fall into [`MarketSession::Other`].

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::time::to_jst;

/// Session windows on the JST clock, end-exclusive.
///
/// New York spans midnight: 21:00 through 01:59 of the next JST day.
pub const TOKYO_OPEN_HOUR: u32 = 8;
pub const TOKYO_CLOSE_HOUR: u32 = 15;
pub const LONDON_OPEN_HOUR: u32 = 15;
pub const LONDON_CLOSE_HOUR: u32 = 21;
pub const NEWYORK_OPEN_HOUR: u32 = 21;
pub const NEWYORK_CLOSE_HOUR: u32 = 2;

/// JST Saturday before this hour still belongs to Friday's trading day
/// (the New York session that is open when Tokyo rolls into Saturday).
pub const SATURDAY_CARRYOVER_END_HOUR: u32 = 9;

/// One of the four market-hours buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketSession {
    Tokyo,
    London,
    NewYork,
    Other,
}

impl MarketSession {
    /// Canonical emission order for fixed-cardinality aggregates.
    pub const ALL: [MarketSession; 4] = [
        MarketSession::Tokyo,
        MarketSession::London,
        MarketSession::NewYork,
        MarketSession::Other,
    ];

    /// Wire identifier, matching the serialized form.
    pub fn zone(&self) -> &'static str {
        match self {
            MarketSession::Tokyo => "tokyo",
            MarketSession::London => "london",
            MarketSession::NewYork => "newyork",
            MarketSession::Other => "other",
        }
    }

    /// Display label used by the dashboard and the narrative report.
    pub fn label(&self) -> &'static str {
        match self {
            MarketSession::Tokyo => "東京",
            MarketSession::London => "ロンドン",
            MarketSession::NewYork => "ニューヨーク",
            MarketSession::Other => "その他",
        }
    }

    /// Position in [`MarketSession::ALL`].
    pub fn index(&self) -> usize {
        match self {
            MarketSession::Tokyo => 0,
            MarketSession::London => 1,
            MarketSession::NewYork => 2,
            MarketSession::Other => 3,
        }
    }

    /// Classify a JST clock hour. Total over 0..24.
    pub fn from_jst_hour(hour: u32) -> MarketSession {
        if (TOKYO_OPEN_HOUR..TOKYO_CLOSE_HOUR).contains(&hour) {
            MarketSession::Tokyo
        } else if (LONDON_OPEN_HOUR..LONDON_CLOSE_HOUR).contains(&hour) {
            MarketSession::London
        } else if hour >= NEWYORK_OPEN_HOUR || hour < NEWYORK_CLOSE_HOUR {
            MarketSession::NewYork
        } else {
            MarketSession::Other
        }
    }
}

/// Classify a trade's open instant into a market session.
///
/// The instant is shifted to JST first; callers exclude trades with no open
/// timestamp before reaching this function.
pub fn classify_session(open_time: DateTime<Utc>) -> MarketSession {
    MarketSession::from_jst_hour(to_jst(open_time).hour())
}

/// Weekday labels for the five trading weekdays, Monday first.
pub const WEEKDAY_LABELS: [&str; 5] = ["月曜日", "火曜日", "水曜日", "木曜日", "金曜日"];

/// Trading weekday (1 = Monday .. 5 = Friday) of a trade's open instant.
///
/// JST Saturday before [`SATURDAY_CARRYOVER_END_HOUR`] is bucketed as
/// Friday. Saturday from 09:00 and all of Sunday return `None` and are
/// dropped from weekday aggregates, not reassigned.
pub fn trading_weekday(open_time: DateTime<Utc>) -> Option<u32> {
    let jst = to_jst(open_time);
    let weekday = jst.weekday().number_from_monday();
    match weekday {
        1..=5 => Some(weekday),
        6 if jst.hour() < SATURDAY_CARRYOVER_END_HOUR => Some(5),
        _ => None,
    }
}
