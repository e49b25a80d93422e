mod climax_limit_down;
mod keep_increasing;
mod low_drawdown_rise;
mod narrow_flag;
mod parking_apron;
mod platform_breakout;
mod turtle_entry;
mod volume_surge;
mod year_line_retrace;

pub use climax_limit_down::ClimaxLimitDown;
pub use keep_increasing::KeepIncreasing;
pub use low_drawdown_rise::LowDrawdownRise;
pub use narrow_flag::NarrowFlag;
pub use parking_apron::ParkingApron;
pub use platform_breakout::PlatformBreakout;
pub use turtle_entry::TurtleEntry;
pub use volume_surge::VolumeSurge;
pub use year_line_retrace::YearLineRetrace;

use chrono::NaiveDate;

use common::{DailyBar, Error, Result};

/// Daily limit threshold shared by the limit-up/limit-down checks.
pub(crate) const LIMIT_PCT: f64 = 9.5;

/// Bars visible at the evaluation date: everything dated at or before
/// `cutoff`, or the whole series when no cutoff is set.
pub(crate) fn visible(series: &[DailyBar], cutoff: Option<NaiveDate>) -> &[DailyBar] {
    match cutoff {
        Some(cutoff) => {
            let end = series.partition_point(|bar| bar.date <= cutoff);
            &series[..end]
        }
        None => series,
    }
}

/// Last `n` bars of the window, or `None` when history is too short.
pub(crate) fn last_n(bars: &[DailyBar], n: usize) -> Option<&[DailyBar]> {
    (bars.len() >= n).then(|| &bars[bars.len() - n..])
}

/// Series with non-finite prices or volumes cannot be screened.
pub(crate) fn ensure_finite(bars: &[DailyBar]) -> Result<()> {
    for bar in bars {
        if !(bar.open.is_finite()
            && bar.close.is_finite()
            && bar.high.is_finite()
            && bar.low.is_finite()
            && bar.volume.is_finite())
        {
            return Err(Error::MalformedRecord(format!("non-finite bar on {}", bar.date)));
        }
    }
    Ok(())
}

/// Simple moving average of closes. Callers guarantee `bars` is non-empty.
pub(crate) fn sma_close(bars: &[DailyBar]) -> f64 {
    bars.iter().map(|b| b.close).sum::<f64>() / bars.len() as f64
}

pub(crate) fn mean_volume(bars: &[DailyBar]) -> f64 {
    bars.iter().map(|b| b.volume).sum::<f64>() / bars.len() as f64
}

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::{Days, NaiveDate};

    use common::{DailyBar, Instrument};

    pub(crate) fn instrument() -> Instrument {
        Instrument::new("600000", "Test Instrument")
    }

    /// Consecutive daily bars from `(close, volume, pct_change)` triples,
    /// starting at 2024-01-01. Open/high/low are derived from the close so
    /// an up day is always a green candle.
    pub(crate) fn series(rows: &[(f64, f64, f64)]) -> Vec<DailyBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        rows.iter()
            .enumerate()
            .map(|(i, &(close, volume, pct_change))| {
                let open = close / (1.0 + pct_change / 100.0);
                DailyBar {
                    date: start + Days::new(i as u64),
                    open,
                    close,
                    high: close.max(open) * 1.01,
                    low: close.min(open) * 0.99,
                    volume,
                    amount: close * volume * 100.0,
                    pct_change,
                }
            })
            .collect()
    }

    /// `n` flat bars at the given close and volume.
    pub(crate) fn flat(n: usize, close: f64, volume: f64) -> Vec<(f64, f64, f64)> {
        vec![(close, volume, 0.0); n]
    }
}
