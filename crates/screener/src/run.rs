use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Duration;

use tracing::{info, warn};

use common::{Channel, Config, DailyBar, Instrument, Result};
use datasource::MarketDataSource;
use notify::Notifier;
use strategy::StrategyRegistry;

use crate::classify::{classify, format_classification};
use crate::compose::compose;
use crate::engine::{ScreeningEngine, StrategyResult};
use crate::filter::PointInTimeFilter;
use crate::stats::{format_stats, summarize, MarketStats};

/// Everything one batch pass produced, for logging and tests.
#[derive(Debug)]
pub struct ScreenReport {
    pub stats: MarketStats,
    pub results: StrategyResult,
    pub composites: BTreeMap<String, BTreeSet<String>>,
}

/// One full screening pass: snapshot → statistics → per-strategy screens →
/// composite signals → venue classification.
///
/// Only the snapshot fetch is fatal. Every per-instrument failure is
/// absorbed with a warning, so one bad data point never blocks the pass.
pub async fn run_screen(
    cfg: &Config,
    source: &dyn MarketDataSource,
    registry: &StrategyRegistry,
    notifier: &dyn Notifier,
) -> Result<ScreenReport> {
    info!("************ screening pass start ************");

    let snapshot = source.fetch_universe_snapshot().await?;
    let stats = summarize(&snapshot);
    notifier.send(Channel::Statistics, &format_stats(&stats)).await;

    let universe: Vec<Instrument> = snapshot.iter().map(|q| q.instrument()).collect();
    let series_by_code = fetch_series(cfg, source, &universe).await;

    let engine = ScreeningEngine::new(PointInTimeFilter::new(cfg.evaluation_cutoff));
    let results = engine
        .run(&universe, &series_by_code, registry, notifier)
        .await;

    // Composites are always reported, empty or not, unlike per-strategy
    // alerts, which stay silent when empty.
    let composites = compose(&results);
    for (name, codes) in &composites {
        let message = if codes.is_empty() {
            format!("{name}: no matches today.")
        } else {
            format!(
                "{name} by venue:\n{}",
                format_classification(&classify(codes, &universe))
            )
        };
        notifier.send(Channel::StrategyAlert, &message).await;
    }

    info!("************ screening pass end ************");
    Ok(ScreenReport {
        stats,
        results,
        composites,
    })
}

/// Sequential history fetches with a pause between calls: successive
/// requests hit the same upstream source, which has finite rate tolerance.
async fn fetch_series(
    cfg: &Config,
    source: &dyn MarketDataSource,
    universe: &[Instrument],
) -> HashMap<String, Vec<DailyBar>> {
    let pause = Duration::from_millis(cfg.fetch_pause_ms);
    let mut series_by_code = HashMap::with_capacity(universe.len());

    for (i, instrument) in universe.iter().enumerate() {
        if i > 0 && !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
        match source.fetch_history(&instrument.code).await {
            Ok(bars) => {
                series_by_code.insert(instrument.code.clone(), bars);
            }
            Err(e) => {
                warn!(code = %instrument.code, error = %e, "History fetch failed, skipping")
            }
        }
    }

    info!(
        fetched = series_by_code.len(),
        universe = universe.len(),
        "History fetch complete"
    );
    series_by_code
}
