pub mod checks;
pub mod config;
pub mod registry;

pub use config::{StrategyConfig, StrategyFileConfig};
pub use registry::StrategyRegistry;

use chrono::NaiveDate;

use common::{DailyBar, Instrument, Result};

/// Display names of the built-in strategies. Signal composition refers to
/// strategies by these names.
pub mod names {
    pub const VOLUME_SURGE: &str = "Volume Surge";
    pub const MA_BULLISH: &str = "Moving Average Bullish";
    pub const PARKING_APRON: &str = "Parking Apron";
    pub const YEAR_LINE_RETRACE: &str = "Year Line Retrace";
    pub const PLATFORM_BREAKOUT: &str = "Platform Breakout";
    pub const LOW_DRAWDOWN_RISE: &str = "Low Drawdown Rise";
    pub const TURTLE_ENTRY: &str = "Turtle Entry";
    pub const NARROW_FLAG: &str = "Narrow Flag";
    pub const CLIMAX_LIMIT_DOWN: &str = "Climax Limit-Down";
}

/// All strategy checks must satisfy this trait.
pub trait StrategyCheck: Send + Sync {
    /// Decide whether `instrument` currently matches this strategy.
    ///
    /// `series` is the instrument's daily history, ascending by date;
    /// implementations must only look at bars dated at or before `cutoff`
    /// when one is given. Insufficient history is a normal non-match, not
    /// an error; `Err` means the series itself is unusable.
    fn check(
        &self,
        instrument: &Instrument,
        series: &[DailyBar],
        cutoff: Option<NaiveDate>,
    ) -> Result<bool>;
}
