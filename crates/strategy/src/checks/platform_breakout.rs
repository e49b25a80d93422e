use chrono::NaiveDate;

use common::{DailyBar, Instrument, Result};

use crate::checks::{ensure_finite, mean_volume, sma_close, visible};
use crate::StrategyCheck;

/// Close crosses above the `period`-day platform line from below, on
/// surged volume.
#[derive(Debug, Clone)]
pub struct PlatformBreakout {
    pub period: usize,
    pub vol_baseline: usize,
    pub vol_ratio: f64,
}

impl PlatformBreakout {
    pub fn new(period: usize, vol_ratio: f64) -> Self {
        assert!(period >= 2, "platform period must be >= 2");
        Self {
            period,
            vol_baseline: 5,
            vol_ratio,
        }
    }
}

impl Default for PlatformBreakout {
    fn default() -> Self {
        Self::new(60, 2.0)
    }
}

impl StrategyCheck for PlatformBreakout {
    fn check(
        &self,
        _instrument: &Instrument,
        series: &[DailyBar],
        cutoff: Option<NaiveDate>,
    ) -> Result<bool> {
        let bars = visible(series, cutoff);
        let n = bars.len();
        if n < self.period + 1 || n < self.vol_baseline + 1 {
            return Ok(false);
        }
        ensure_finite(&bars[n - (self.period + 1)..])?;

        let today = &bars[n - 1];
        let prev = &bars[n - 2];
        let ma_today = sma_close(&bars[n - self.period..]);
        let ma_prev = sma_close(&bars[n - 1 - self.period..n - 1]);
        if !(prev.close <= ma_prev && today.close > ma_today) {
            return Ok(false);
        }

        let avg = mean_volume(&bars[n - 1 - self.vol_baseline..n - 1]);
        if avg <= 0.0 {
            return Ok(false);
        }
        Ok(today.volume >= self.vol_ratio * avg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testutil::{flat, instrument, series};

    #[test]
    fn breakout_on_volume_matches() {
        let mut rows = flat(64, 100.0, 100.0);
        rows.push((108.0, 300.0, 8.0));
        let s = series(&rows);
        assert!(PlatformBreakout::default().check(&instrument(), &s, None).unwrap());
    }

    #[test]
    fn breakout_without_volume_does_not_match() {
        let mut rows = flat(64, 100.0, 100.0);
        rows.push((108.0, 120.0, 8.0));
        let s = series(&rows);
        assert!(!PlatformBreakout::default().check(&instrument(), &s, None).unwrap());
    }

    #[test]
    fn already_above_the_line_does_not_match() {
        let mut rows = flat(60, 100.0, 100.0);
        rows.extend(flat(4, 112.0, 100.0));
        rows.push((115.0, 300.0, 2.7));
        let s = series(&rows);
        assert!(!PlatformBreakout::default().check(&instrument(), &s, None).unwrap());
    }

    #[test]
    fn short_history_does_not_match() {
        let mut rows = flat(30, 100.0, 100.0);
        rows.push((108.0, 300.0, 8.0));
        let s = series(&rows);
        assert!(!PlatformBreakout::default().check(&instrument(), &s, None).unwrap());
    }
}
