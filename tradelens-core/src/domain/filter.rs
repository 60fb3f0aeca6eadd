//! Validated trade filter.
//!
//! The upstream API layers passed loosely-typed filter objects (optional
//! fields, mixed date/string types) through several hops. Here the filter
//! is a single struct, parsed and validated once at the boundary; every
//! optional criterion has an explicit unset representation.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::trade::{Side, TradeRecord};
use crate::time::jst_offset;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("start date {start} is after end date {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },
    #[error("{field}: minimum {min} exceeds maximum {max}")]
    InvertedBound {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("failed to parse filter TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Criteria for selecting trades. Empty lists and `None` bounds mean
/// "no restriction".
///
/// Date bounds are JST calendar dates: `start_date` begins at 00:00:00 JST
/// and `end_date` runs through 23:59:59.999 JST before conversion to UTC
/// instants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TradeFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub symbols: Vec<String>,
    pub sides: Vec<Side>,
    pub ticket_ids: Vec<i64>,
    pub size_min: Option<f64>,
    pub size_max: Option<f64>,
    pub profit_min: Option<f64>,
    pub profit_max: Option<f64>,
    pub open_price_min: Option<f64>,
    pub open_price_max: Option<f64>,
}

impl TradeFilter {
    /// Parse and validate a filter from TOML.
    pub fn from_toml_str(raw: &str) -> Result<Self, FilterError> {
        let filter: TradeFilter = toml::from_str(raw)?;
        filter.validate()?;
        Ok(filter)
    }

    /// Check internal consistency. Called once at the boundary; `matches`
    /// assumes a validated filter.
    pub fn validate(&self) -> Result<(), FilterError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(FilterError::InvertedDateRange { start, end });
            }
        }
        check_bound("size", self.size_min, self.size_max)?;
        check_bound("profit", self.profit_min, self.profit_max)?;
        check_bound("open_price", self.open_price_min, self.open_price_max)?;
        Ok(())
    }

    /// The UTC window covered by the JST date range, inclusive.
    pub fn utc_window(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let start = self.start_date.map(|d| jst_instant(d, NaiveTime::MIN));
        let end = self.end_date.map(|d| {
            jst_instant(
                d,
                NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("valid end-of-day time"),
            )
        });
        (start, end)
    }

    /// Whether a trade satisfies every set criterion.
    ///
    /// A trade with no open time fails any date-range criterion; a trade
    /// with no profit fails any profit-bound criterion.
    pub fn matches(&self, trade: &TradeRecord) -> bool {
        let (start, end) = self.utc_window();
        if start.is_some() || end.is_some() {
            let open_time = match trade.open_time {
                Some(t) => t,
                None => return false,
            };
            if let Some(start) = start {
                if open_time < start {
                    return false;
                }
            }
            if let Some(end) = end {
                if open_time > end {
                    return false;
                }
            }
        }
        if !self.symbols.is_empty() && !self.symbols.contains(&trade.symbol) {
            return false;
        }
        if !self.sides.is_empty() && !self.sides.contains(&trade.side) {
            return false;
        }
        if !self.ticket_ids.is_empty() && !self.ticket_ids.contains(&trade.ticket) {
            return false;
        }
        if !in_bound(Some(trade.size), self.size_min, self.size_max) {
            return false;
        }
        if !in_bound(trade.profit, self.profit_min, self.profit_max) {
            return false;
        }
        if !in_bound(Some(trade.open_price), self.open_price_min, self.open_price_max) {
            return false;
        }
        true
    }

    /// Select the matching trades, preserving order.
    pub fn apply(&self, trades: &[TradeRecord]) -> Vec<TradeRecord> {
        trades
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect()
    }
}

fn check_bound(
    field: &'static str,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<(), FilterError> {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(FilterError::InvertedBound { field, min, max });
        }
    }
    Ok(())
}

/// Bound check on an optional value: an unset value fails only when a
/// bound is actually set.
fn in_bound(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let value = match value {
        Some(v) => v,
        None => return false,
    };
    if let Some(min) = min {
        if value < min {
            return false;
        }
    }
    if let Some(max) = max {
        if value > max {
            return false;
        }
    }
    true
}

/// A JST wall-clock time as a UTC instant. Fixed offsets are unambiguous.
fn jst_instant(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    jst_offset()
        .from_local_datetime(&date.and_time(time))
        .single()
        .expect("fixed-offset local time is unambiguous")
        .with_timezone(&Utc)
}
