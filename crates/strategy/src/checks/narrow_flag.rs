use chrono::NaiveDate;

use common::{DailyBar, Instrument, Result};

use crate::checks::{ensure_finite, last_n, visible, LIMIT_PCT};
use crate::StrategyCheck;

/// High tight flag: a near-doubling inside the recent window with the last
/// two sessions both at limit-up.
#[derive(Debug, Clone)]
pub struct NarrowFlag {
    pub window: usize,
    /// Minimum high/low ratio across the window.
    pub min_ratio: f64,
}

impl NarrowFlag {
    pub fn new(window: usize, min_ratio: f64) -> Self {
        assert!(window >= 2, "flag window must be >= 2");
        Self { window, min_ratio }
    }
}

impl Default for NarrowFlag {
    fn default() -> Self {
        Self::new(24, 1.9)
    }
}

impl StrategyCheck for NarrowFlag {
    fn check(
        &self,
        _instrument: &Instrument,
        series: &[DailyBar],
        cutoff: Option<NaiveDate>,
    ) -> Result<bool> {
        let bars = visible(series, cutoff);
        let Some(tail) = last_n(bars, self.window) else {
            return Ok(false);
        };
        ensure_finite(tail)?;

        let low = tail.iter().map(|b| b.low).fold(f64::MAX, f64::min);
        let high = tail.iter().map(|b| b.high).fold(f64::MIN, f64::max);
        if low <= 0.0 || high / low < self.min_ratio {
            return Ok(false);
        }

        let capped = tail[tail.len() - 2..]
            .iter()
            .all(|b| b.pct_change >= LIMIT_PCT);
        Ok(capped)
    }
}
