use chrono::NaiveDate;

use common::{DailyBar, Instrument, Result};

use crate::checks::{ensure_finite, sma_close, visible};
use crate::StrategyCheck;

/// The `period`-day moving average sampled 30, 20, and 10 sessions ago plus
/// today must be strictly increasing, with the latest sample at least
/// `slope` times the earliest.
#[derive(Debug, Clone)]
pub struct KeepIncreasing {
    pub period: usize,
    pub slope: f64,
}

impl KeepIncreasing {
    pub fn new(period: usize, slope: f64) -> Self {
        assert!(period >= 1, "MA period must be >= 1");
        Self { period, slope }
    }

    /// Calmer variant swapped in by the weekday override.
    pub fn relaxed() -> Self {
        Self::new(30, 1.1)
    }
}

impl Default for KeepIncreasing {
    fn default() -> Self {
        Self::new(30, 1.2)
    }
}

impl StrategyCheck for KeepIncreasing {
    fn check(
        &self,
        _instrument: &Instrument,
        series: &[DailyBar],
        cutoff: Option<NaiveDate>,
    ) -> Result<bool> {
        let bars = visible(series, cutoff);
        let n = bars.len();
        if n < self.period + 30 {
            return Ok(false);
        }
        ensure_finite(&bars[n - (self.period + 30)..])?;

        let ma_at = |sessions_ago: usize| {
            sma_close(&bars[n - sessions_ago - self.period..n - sessions_ago])
        };
        let (m30, m20, m10, m0) = (ma_at(30), ma_at(20), ma_at(10), ma_at(0));

        Ok(m30 < m20 && m20 < m10 && m10 < m0 && m0 >= self.slope * m30)
    }
}
