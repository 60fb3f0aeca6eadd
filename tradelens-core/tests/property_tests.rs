//! Property tests for core invariants.
//!
//! Uses proptest to verify:
//! 1. Session classification is total — every instant lands in exactly one bucket
//! 2. Trading weekday is always in 1..=5 when present, and Sundays never map
//! 3. Server-time conversion preserves ordering within a DST regime
//! 4. Filtering returns a subset that each satisfies the filter

use chrono::{Datelike, Duration, TimeZone, Timelike, Utc};
use proptest::prelude::*;
use tradelens_core::session::SATURDAY_CARRYOVER_END_HOUR;
use tradelens_core::time::{jst_offset, server_time_to_utc, to_jst};
use tradelens_core::{classify_session, trading_weekday, MarketSession, Side, TradeFilter, TradeId, TradeRecord};

fn arb_instant() -> impl Strategy<Value = chrono::DateTime<Utc>> {
    // Any second of 2024-2025, covering both DST regimes and leap day.
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0i64..2 * 366 * 24 * 3600).prop_map(move |secs| base + Duration::seconds(secs))
}

proptest! {
    /// Classification never panics and lands in exactly one session.
    #[test]
    fn classification_is_total(instant in arb_instant()) {
        let session = classify_session(instant);
        prop_assert_eq!(
            MarketSession::ALL.iter().filter(|s| **s == session).count(),
            1
        );
    }

    /// A weekday, when assigned, is in 1..=5; Sundays are never assigned;
    /// early JST Saturdays map to Friday.
    #[test]
    fn weekday_respects_the_calendar(instant in arb_instant()) {
        let jst = to_jst(instant);
        match trading_weekday(instant) {
            Some(weekday) => {
                prop_assert!((1..=5).contains(&weekday));
                if jst.weekday().number_from_monday() == 6 {
                    prop_assert!(jst.hour() < SATURDAY_CARRYOVER_END_HOUR);
                    prop_assert_eq!(weekday, 5);
                }
            }
            None => {
                let wd = jst.weekday().number_from_monday();
                prop_assert!(wd == 7 || (wd == 6 && jst.hour() >= SATURDAY_CARRYOVER_END_HOUR));
            }
        }
    }

    /// Within one winter (or one summer) the server clock maps to UTC
    /// monotonically.
    #[test]
    fn server_conversion_is_monotone_within_regime(
        base_minute in 0u32..50_000,
        gap in 1u32..1_000,
    ) {
        // January only: a single offset regime.
        let start = chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let a = start + Duration::minutes(base_minute as i64);
        let b = a + Duration::minutes(gap as i64);
        prop_assert!(server_time_to_utc(a) < server_time_to_utc(b));
    }
}

fn arb_trade() -> impl Strategy<Value = TradeRecord> {
    (1i64..10_000, arb_instant(), -1000.0..1000.0f64, prop::bool::ANY).prop_map(
        |(ticket, open_time, profit, is_buy)| TradeRecord {
            id: TradeId(ticket),
            ticket,
            symbol: (if ticket % 2 == 0 { "USDJPY" } else { "EURUSD" }).into(),
            side: if is_buy { Side::Buy } else { Side::Sell },
            size: 1.0,
            open_time: Some(open_time),
            close_time: None,
            open_price: 150.0,
            close_price: None,
            stop_loss: None,
            take_profit: None,
            commission: None,
            tax: None,
            swap: None,
            profit: Some(profit),
            memo: None,
            batch_id: None,
        },
    )
}

proptest! {
    /// Every trade a filter selects satisfies the filter, and selection
    /// never grows the set.
    #[test]
    fn apply_returns_a_matching_subset(
        trades in prop::collection::vec(arb_trade(), 0..30),
        profit_min in -500.0..500.0f64,
    ) {
        let filter = TradeFilter {
            symbols: vec!["USDJPY".into()],
            profit_min: Some(profit_min),
            ..Default::default()
        };
        filter.validate().unwrap();

        let selected = filter.apply(&trades);
        prop_assert!(selected.len() <= trades.len());
        for trade in &selected {
            prop_assert!(filter.matches(trade));
            prop_assert_eq!(&trade.symbol, "USDJPY");
            prop_assert!(trade.profit.unwrap() >= profit_min);
        }
    }

    /// A filter date window selects exactly the trades whose JST calendar
    /// date is inside it.
    #[test]
    fn date_window_matches_jst_dates(instant in arb_instant()) {
        let jst_date = to_jst(instant).date_naive();
        let filter = TradeFilter {
            start_date: Some(jst_date),
            end_date: Some(jst_date),
            ..Default::default()
        };
        let trade = TradeRecord {
            open_time: Some(instant),
            ..arb_trade_fixed()
        };
        prop_assert!(filter.matches(&trade));
    }
}

fn arb_trade_fixed() -> TradeRecord {
    TradeRecord {
        id: TradeId(1),
        ticket: 1,
        symbol: "USDJPY".into(),
        side: Side::Buy,
        size: 1.0,
        open_time: None,
        close_time: None,
        open_price: 150.0,
        close_price: None,
        stop_loss: None,
        take_profit: None,
        commission: None,
        tax: None,
        swap: None,
        profit: Some(0.0),
        memo: None,
        batch_id: None,
    }
}
