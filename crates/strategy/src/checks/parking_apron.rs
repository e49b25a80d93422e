use chrono::NaiveDate;

use common::{DailyBar, Instrument, Result};

use crate::checks::{ensure_finite, last_n, visible, LIMIT_PCT};
use crate::StrategyCheck;

/// A limit-up day inside the recent window followed only by tight
/// consolidation bars that hold near the limit-up close.
#[derive(Debug, Clone)]
pub struct ParkingApron {
    pub window: usize,
    pub max_drift_pct: f64,
}

impl ParkingApron {
    /// Consolidation bars may give back at most this share of the
    /// limit-up close.
    const HOLD_FLOOR: f64 = 0.97;

    pub fn new(window: usize, max_drift_pct: f64) -> Self {
        assert!(window >= 2, "parking apron window must be >= 2");
        Self { window, max_drift_pct }
    }
}

impl Default for ParkingApron {
    fn default() -> Self {
        Self::new(15, 3.0)
    }
}

impl StrategyCheck for ParkingApron {
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

        // The apron needs at least one bar after the limit-up day.
        for i in (0..tail.len() - 1).rev() {
            if tail[i].pct_change < LIMIT_PCT {
                continue;
            }
            let base = tail[i].close;
            let held = tail[i + 1..].iter().all(|b| {
                b.pct_change.abs() <= self.max_drift_pct && b.close >= base * Self::HOLD_FLOOR
            });
            if held {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
