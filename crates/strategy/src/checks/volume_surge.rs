use chrono::NaiveDate;

use common::{DailyBar, Instrument, Result};

use crate::checks::{ensure_finite, last_n, mean_volume, visible};
use crate::StrategyCheck;

/// Latest session traded at least `ratio` times the average volume of the
/// preceding `baseline` sessions, on an up candle.
#[derive(Debug, Clone)]
pub struct VolumeSurge {
    pub baseline: usize,
    pub ratio: f64,
}

impl VolumeSurge {
    pub fn new(baseline: usize, ratio: f64) -> Self {
        assert!(baseline >= 1, "volume baseline must be >= 1");
        Self { baseline, ratio }
    }
}

impl Default for VolumeSurge {
    fn default() -> Self {
        Self::new(5, 2.0)
    }
}

impl StrategyCheck for VolumeSurge {
    fn check(
        &self,
        _instrument: &Instrument,
        series: &[DailyBar],
        cutoff: Option<NaiveDate>,
    ) -> Result<bool> {
        let bars = visible(series, cutoff);
        let Some(window) = last_n(bars, self.baseline + 1) else {
            return Ok(false);
        };
        ensure_finite(window)?;

        let today = &window[self.baseline];
        let avg = mean_volume(&window[..self.baseline]);
        if avg <= 0.0 {
            return Ok(false);
        }

        Ok(today.close > today.open && today.volume >= self.ratio * avg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testutil::{instrument, series};

    #[test]
    fn surge_on_up_candle_matches() {
        let mut rows = vec![(100.0, 100.0, 0.0); 5];
        rows.push((104.0, 250.0, 4.0));
        let s = series(&rows);
        assert!(VolumeSurge::default().check(&instrument(), &s, None).unwrap());
    }

    #[test]
    fn quiet_volume_does_not_match() {
        let mut rows = vec![(100.0, 100.0, 0.0); 5];
        rows.push((104.0, 150.0, 4.0));
        let s = series(&rows);
        assert!(!VolumeSurge::default().check(&instrument(), &s, None).unwrap());
    }

    #[test]
    fn surge_on_down_candle_does_not_match() {
        let mut rows = vec![(100.0, 100.0, 0.0); 5];
        rows.push((96.0, 300.0, -4.0));
        let s = series(&rows);
        assert!(!VolumeSurge::default().check(&instrument(), &s, None).unwrap());
    }

    #[test]
    fn short_history_does_not_match() {
        let s = series(&[(100.0, 100.0, 0.0), (104.0, 300.0, 4.0)]);
        assert!(!VolumeSurge::default().check(&instrument(), &s, None).unwrap());
    }

    #[test]
    fn non_finite_series_is_an_error() {
        let mut rows = vec![(100.0, 100.0, 0.0); 5];
        rows.push((f64::NAN, 250.0, 4.0));
        let s = series(&rows);
        assert!(VolumeSurge::default().check(&instrument(), &s, None).is_err());
    }
}
