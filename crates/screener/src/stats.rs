use common::Quote;

/// Market-breadth counters over the full universe snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarketStats {
    pub limit_up: usize,
    pub limit_down: usize,
    pub up5: usize,
    pub down5: usize,
}

/// Thresholds are inclusive; the ±5% counters are supersets of the limit
/// counters.
pub fn summarize(quotes: &[Quote]) -> MarketStats {
    let mut stats = MarketStats::default();
    for q in quotes {
        if q.pct_change >= 9.5 {
            stats.limit_up += 1;
        }
        if q.pct_change <= -9.5 {
            stats.limit_down += 1;
        }
        if q.pct_change >= 5.0 {
            stats.up5 += 1;
        }
        if q.pct_change <= -5.0 {
            stats.down5 += 1;
        }
    }
    stats
}

/// The one statistics message emitted per run.
pub fn format_stats(stats: &MarketStats) -> String {
    format!(
        "Limit-up: {}   Limit-down: {}\nUp >5%: {}   Down >5%: {}",
        stats.limit_up, stats.limit_down, stats.up5, stats.down5
    )
}
