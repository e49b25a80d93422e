use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, warn};

use common::{Channel, DailyBar, Instrument};
use notify::Notifier;
use strategy::StrategyRegistry;

use crate::filter::PointInTimeFilter;

/// Strategy display name → matched instrument codes.
pub type StrategyResult = BTreeMap<String, BTreeSet<String>>;

/// Runs every registered strategy over the universe through the
/// point-in-time filter, collecting per-strategy match sets.
pub struct ScreeningEngine {
    filter: PointInTimeFilter,
}

impl ScreeningEngine {
    pub fn new(filter: PointInTimeFilter) -> Self {
        Self { filter }
    }

    /// Strategies run in registry order; instruments in universe order.
    ///
    /// A check failure on one instrument is logged and skipped; it never
    /// aborts the strategy or the run. A strategy with at least one match
    /// emits one alert; an empty strategy stays silent.
    pub async fn run(
        &self,
        universe: &[Instrument],
        series_by_code: &HashMap<String, Vec<DailyBar>>,
        registry: &StrategyRegistry,
        notifier: &dyn Notifier,
    ) -> StrategyResult {
        let mut results = StrategyResult::new();

        for (name, check) in registry.iter() {
            let mut matched = BTreeSet::new();

            for instrument in universe {
                let Some(series) = series_by_code.get(&instrument.code) else {
                    debug!(code = %instrument.code, strategy = name, "No history, skipping");
                    continue;
                };
                match self.filter.evaluate(instrument, series, check) {
                    Ok(true) => {
                        matched.insert(instrument.code.clone());
                    }
                    Ok(false) => {}
                    Err(e) => {
                        warn!(code = %instrument.code, strategy = name, error = %e,
                              "Check failed, skipping instrument");
                    }
                }
            }

            if !matched.is_empty() {
                notifier
                    .send(Channel::StrategyAlert, &strategy_alert(name, &matched))
                    .await;
            }
            results.insert(name.to_string(), matched);
        }

        results
    }
}

/// Alert body for one strategy's matches.
fn strategy_alert(name: &str, codes: &BTreeSet<String>) -> String {
    let listing = codes.iter().cloned().collect::<Vec<_>>().join(", ");
    format!("**************\"{name}\"**************\n{listing}\n**************\"{name}\"**************")
}
