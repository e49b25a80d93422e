use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A listed security as resolved from the latest market snapshot.
/// `code` is the stable identifier; `name` is the display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub code: String,
    pub name: String,
}

impl Instrument {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// One row of the full-market snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub code: String,
    pub name: String,
    /// Day-over-day percent change, e.g. `9.97` for a limit-up.
    pub pct_change: f64,
}

impl Quote {
    pub fn instrument(&self) -> Instrument {
        Instrument::new(&self.code, &self.name)
    }
}

/// One daily kline observation for an instrument.
///
/// Series are ascending by date; the first bar's date is the instrument's
/// effective listing date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    /// Traded volume in lots.
    pub volume: f64,
    /// Traded amount in CNY.
    pub amount: f64,
    pub pct_change: f64,
}

/// Listing venue resolved from a code prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExchangeBucket {
    Shanghai,
    Shenzhen,
    Beijing,
    Star,
}

impl ExchangeBucket {
    /// All buckets, in report order.
    pub const ALL: [ExchangeBucket; 4] = [
        ExchangeBucket::Shanghai,
        ExchangeBucket::Shenzhen,
        ExchangeBucket::Beijing,
        ExchangeBucket::Star,
    ];
}

impl std::fmt::Display for ExchangeBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExchangeBucket::Shanghai => write!(f, "Shanghai Main Board"),
            ExchangeBucket::Shenzhen => write!(f, "Shenzhen / ChiNext"),
            ExchangeBucket::Beijing => write!(f, "Beijing Stock Exchange"),
            ExchangeBucket::Star => write!(f, "STAR Market"),
        }
    }
}

/// Outbound message channels understood by the notifier sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    StrategyAlert,
    Statistics,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::StrategyAlert => write!(f, "strategy-alert"),
            Channel::Statistics => write!(f, "statistics"),
        }
    }
}
