use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use common::{DailyBar, Instrument};
use strategy::StrategyRegistry;

fn bars(rows: &[(f64, f64, f64)]) -> Vec<DailyBar> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    rows.iter()
        .enumerate()
        .map(|(i, &(close, volume, pct_change))| DailyBar {
            date: start + Days::new(i as u64),
            open: close,
            close,
            high: close * 1.02,
            low: close * 0.98,
            volume,
            amount: close * volume,
            pct_change,
        })
        .collect()
}

proptest! {
    /// Every registered check must evaluate any finite series without
    /// panicking, with and without a cutoff.
    #[test]
    fn checks_never_panic_on_finite_series(
        rows in prop::collection::vec(
            (0.01f64..10_000.0, 0.0f64..1e9, -11.0f64..11.0),
            0..300,
        ),
        cutoff_offset in 0u64..400,
    ) {
        let series = bars(&rows);
        let instrument = Instrument::new("600000", "prop");
        let cutoff = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Days::new(cutoff_offset);

        let registry = StrategyRegistry::default_set();
        for (_name, check) in registry.iter() {
            prop_assert!(check.check(&instrument, &series, None).is_ok());
            prop_assert!(check.check(&instrument, &series, Some(cutoff)).is_ok());
        }
    }

    /// A cutoff before the first bar means no visible history, which is a
    /// plain non-match for every check.
    #[test]
    fn no_visible_history_never_matches(
        rows in prop::collection::vec(
            (0.01f64..10_000.0, 0.0f64..1e9, -11.0f64..11.0),
            1..100,
        ),
    ) {
        let series = bars(&rows);
        let instrument = Instrument::new("600000", "prop");
        let cutoff = NaiveDate::from_ymd_opt(2019, 12, 31).unwrap();

        let registry = StrategyRegistry::default_set();
        for (_name, check) in registry.iter() {
            prop_assert_eq!(check.check(&instrument, &series, Some(cutoff)).unwrap(), false);
        }
    }
}
