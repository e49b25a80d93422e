use chrono::NaiveDate;

use common::{DailyBar, Instrument, Result};

use crate::checks::{ensure_finite, sma_close, visible};
use crate::StrategyCheck;

/// Close holding just above the year line (250-day moving average) after a
/// recent pullback that touched it.
#[derive(Debug, Clone)]
pub struct YearLineRetrace {
    pub period: usize,
    /// Sessions scanned backwards for the touch.
    pub touch_window: usize,
    /// A low within `touch_band` of the line counts as a touch.
    pub touch_band: f64,
    /// The close must not have run further than this above the line.
    pub max_above: f64,
}

impl YearLineRetrace {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "year line period must be >= 1");
        Self {
            period,
            touch_window: 30,
            touch_band: 1.03,
            max_above: 1.10,
        }
    }
}

impl Default for YearLineRetrace {
    fn default() -> Self {
        Self::new(250)
    }
}

impl StrategyCheck for YearLineRetrace {
    fn check(
        &self,
        _instrument: &Instrument,
        series: &[DailyBar],
        cutoff: Option<NaiveDate>,
    ) -> Result<bool> {
        let bars = visible(series, cutoff);
        let n = bars.len();
        if n < self.period {
            return Ok(false);
        }
        ensure_finite(&bars[n - self.period..])?;

        let line = sma_close(&bars[n - self.period..]);
        let last = &bars[n - 1];
        let recent = &bars[n - self.touch_window.min(n)..];
        let touched = recent.iter().any(|b| b.low <= line * self.touch_band);

        Ok(touched && last.close > line && last.close <= line * self.max_above)
    }
}
