use chrono::NaiveDate;

use common::{DailyBar, Instrument, Result};

use crate::checks::{ensure_finite, last_n, visible};
use crate::StrategyCheck;

/// Donchian entry: latest close at or above the highest high of the prior
/// `lookback` sessions.
#[derive(Debug, Clone)]
pub struct TurtleEntry {
    pub lookback: usize,
}

impl TurtleEntry {
    pub fn new(lookback: usize) -> Self {
        assert!(lookback >= 1, "turtle lookback must be >= 1");
        Self { lookback }
    }
}

impl Default for TurtleEntry {
    fn default() -> Self {
        Self::new(60)
    }
}

impl StrategyCheck for TurtleEntry {
    fn check(
        &self,
        _instrument: &Instrument,
        series: &[DailyBar],
        cutoff: Option<NaiveDate>,
    ) -> Result<bool> {
        let bars = visible(series, cutoff);
        let Some(window) = last_n(bars, self.lookback + 1) else {
            return Ok(false);
        };
        ensure_finite(window)?;

        let today = &window[self.lookback];
        let channel_high = window[..self.lookback]
            .iter()
            .map(|b| b.high)
            .fold(f64::MIN, f64::max);
        Ok(today.close >= channel_high)
    }
}
