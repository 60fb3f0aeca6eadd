//! Time handling: fixed-offset JST conversion and broker server-time parsing.
//!
//! All session and weekday logic is defined on the JST clock (UTC+9). The
//! offset is a fixed constant of the system, not configurable per call, and
//! JST observes no DST — so conversion is a single explicit offset shift
//! rather than ad hoc date arithmetic.
//!
//! Broker (MT4/MT5) history exports carry server-local timestamps. The
//! server clock is UTC+2 in winter and UTC+3 during the broker's DST window
//! (last Sunday of March up to, but excluding, last Sunday of October).

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc,
};

/// Fixed reference offset: JST (UTC+9).
pub const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Broker server clock offsets from UTC, in hours.
pub const SERVER_OFFSET_WINTER_HOURS: i64 = 2;
pub const SERVER_OFFSET_SUMMER_HOURS: i64 = 3;

/// The JST fixed offset as a chrono timezone.
pub fn jst_offset() -> FixedOffset {
    FixedOffset::east_opt(JST_OFFSET_SECS).expect("JST is a valid fixed offset")
}

/// Convert a UTC instant to the JST clock.
pub fn to_jst(instant: DateTime<Utc>) -> DateTime<FixedOffset> {
    instant.with_timezone(&jst_offset())
}

/// Last Sunday of a month. Month must be in 1..=12.
fn last_sunday(year: i32, month: u32) -> NaiveDate {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("month boundary is a valid date");
    let last_day = first_of_next.pred_opt().expect("month has a previous day");
    last_day - Duration::days(last_day.weekday().num_days_from_sunday() as i64)
}

/// Whether the broker server observes DST on the given date.
///
/// DST window: last Sunday of March (inclusive) to last Sunday of October
/// (exclusive).
pub fn is_server_dst(date: NaiveDate) -> bool {
    let year = date.year();
    date >= last_sunday(year, 3) && date < last_sunday(year, 10)
}

/// Parse a broker history timestamp.
///
/// Accepts the MT4/MT5 export format `YYYY.MM.DD HH:MM:SS` (server-local
/// wall clock) and ISO-8601 strings. Returns `None` for anything else; the
/// caller treats such trades as having no open time.
pub fn parse_server_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y.%m.%d %H:%M:%S") {
        return Some(parsed);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()
}

/// Convert a server-local wall-clock time to a UTC instant using the
/// broker's DST rule.
pub fn server_time_to_utc(server: NaiveDateTime) -> DateTime<Utc> {
    let offset_hours = if is_server_dst(server.date()) {
        SERVER_OFFSET_SUMMER_HOURS
    } else {
        SERVER_OFFSET_WINTER_HOURS
    };
    Utc.from_utc_datetime(&(server - Duration::hours(offset_hours)))
}

/// JST calendar date of an instant as `YYYY-MM-DD`, the key format used by
/// time-series output.
pub fn jst_date_string(instant: DateTime<Utc>) -> String {
    to_jst(instant).format("%Y-%m-%d").to_string()
}

/// JST calendar month of an instant as `YYYY-MM`, the key format used by
/// monthly aggregation.
pub fn jst_month_string(instant: DateTime<Utc>) -> String {
    to_jst(instant).format("%Y-%m").to_string()
}
