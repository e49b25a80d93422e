use chrono::NaiveDate;
use tracing::debug;

use common::{DailyBar, Instrument, Result};
use strategy::StrategyCheck;

/// Guards strategy checks against look-ahead bias: when re-running a
/// historical screen, an instrument that was not yet listed at the
/// evaluation date must never reach the underlying check.
#[derive(Debug, Clone, Copy)]
pub struct PointInTimeFilter {
    cutoff: Option<NaiveDate>,
}

impl PointInTimeFilter {
    pub fn new(cutoff: Option<NaiveDate>) -> Self {
        Self { cutoff }
    }

    pub fn cutoff(&self) -> Option<NaiveDate> {
        self.cutoff
    }

    /// `Ok(false)` without invoking `check` when the instrument was not
    /// yet listed at the cutoff; otherwise the check's own verdict. The
    /// first bar's date is the effective listing date.
    pub fn evaluate(
        &self,
        instrument: &Instrument,
        series: &[DailyBar],
        check: &dyn StrategyCheck,
    ) -> Result<bool> {
        if let Some(cutoff) = self.cutoff {
            let listed = series.first().map(|bar| bar.date <= cutoff);
            if listed != Some(true) {
                debug!(code = %instrument.code, %cutoff, "Not yet listed at cutoff");
                return Ok(false);
            }
        }
        check.check(instrument, series, self.cutoff)
    }
}
