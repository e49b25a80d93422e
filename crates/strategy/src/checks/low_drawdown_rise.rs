use chrono::NaiveDate;

use common::{DailyBar, Instrument, Result};

use crate::checks::{ensure_finite, last_n, visible};
use crate::StrategyCheck;

/// Sustained rise across the window with no violent single-day drop and a
/// bounded peak-to-trough drawdown.
#[derive(Debug, Clone)]
pub struct LowDrawdownRise {
    pub window: usize,
    /// Minimum close-to-close growth factor over the window.
    pub min_rise: f64,
    /// Any single-day loss at or beyond this (percent) disqualifies.
    pub max_daily_drop: f64,
    /// Maximum tolerated peak-to-trough drawdown, as a fraction.
    pub max_drawdown: f64,
}

impl LowDrawdownRise {
    pub fn new(window: usize, min_rise: f64) -> Self {
        assert!(window >= 2, "rise window must be >= 2");
        Self {
            window,
            min_rise,
            max_daily_drop: 7.0,
            max_drawdown: 0.3,
        }
    }
}

impl Default for LowDrawdownRise {
    fn default() -> Self {
        Self::new(120, 1.6)
    }
}

impl StrategyCheck for LowDrawdownRise {
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

        let first = tail[0].close;
        if first <= 0.0 {
            return Ok(false);
        }
        if tail[tail.len() - 1].close / first < self.min_rise {
            return Ok(false);
        }
        if tail.iter().any(|b| b.pct_change <= -self.max_daily_drop) {
            return Ok(false);
        }

        let mut peak = f64::MIN;
        let mut drawdown: f64 = 0.0;
        for bar in tail {
            peak = peak.max(bar.close);
            drawdown = drawdown.max(1.0 - bar.close / peak);
        }
        Ok(drawdown <= self.max_drawdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testutil::{instrument, series};

    fn riser(n: usize, pct: f64) -> Vec<(f64, f64, f64)> {
        (0..n)
            .map(|i| (100.0 * (1.0 + pct / 100.0).powi(i as i32), 100.0, pct))
            .collect()
    }

    #[test]
    fn steady_riser_matches() {
        let s = series(&riser(120, 1.0));
        assert!(LowDrawdownRise::default().check(&instrument(), &s, None).unwrap());
    }

    #[test]
    fn violent_drop_disqualifies() {
        let mut rows = riser(119, 1.0);
        let last = rows.last().unwrap().0;
        rows.push((last * 0.92, 100.0, -8.0));
        let s = series(&rows);
        assert!(!LowDrawdownRise::default().check(&instrument(), &s, None).unwrap());
    }

    #[test]
    fn insufficient_rise_does_not_match() {
        let s = series(&riser(120, 0.2));
        assert!(!LowDrawdownRise::default().check(&instrument(), &s, None).unwrap());
    }

    #[test]
    fn short_history_does_not_match() {
        let s = series(&riser(50, 1.0));
        assert!(!LowDrawdownRise::default().check(&instrument(), &s, None).unwrap());
    }
}
