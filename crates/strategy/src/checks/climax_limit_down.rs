use chrono::NaiveDate;

use common::{DailyBar, Instrument, Result};

use crate::checks::{ensure_finite, last_n, mean_volume, visible, LIMIT_PCT};
use crate::StrategyCheck;

/// Limit-down session on surged volume.
#[derive(Debug, Clone)]
pub struct ClimaxLimitDown {
    pub baseline: usize,
    pub ratio: f64,
}

impl ClimaxLimitDown {
    pub fn new(baseline: usize, ratio: f64) -> Self {
        assert!(baseline >= 1, "volume baseline must be >= 1");
        Self { baseline, ratio }
    }
}

impl Default for ClimaxLimitDown {
    fn default() -> Self {
        Self::new(5, 2.0)
    }
}

impl StrategyCheck for ClimaxLimitDown {
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
        if today.pct_change > -LIMIT_PCT {
            return Ok(false);
        }
        let avg = mean_volume(&window[..self.baseline]);
        if avg <= 0.0 {
            return Ok(false);
        }
        Ok(today.volume >= self.ratio * avg)
    }
}
