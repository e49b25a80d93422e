use std::collections::{BTreeMap, BTreeSet};

use strategy::names;

use crate::engine::StrategyResult;

/// Composite signal definitions: each composite is the intersection of
/// three constituent strategy match sets.
pub const COMPOSITES: [(&str, [&str; 3]); 3] = [
    (
        "Strong Trend",
        [names::VOLUME_SURGE, names::MA_BULLISH, names::PLATFORM_BREAKOUT],
    ),
    (
        "Pullback Buy",
        [names::YEAR_LINE_RETRACE, names::MA_BULLISH, names::LOW_DRAWDOWN_RISE],
    ),
    (
        "Short-Term Breakout",
        [names::VOLUME_SURGE, names::PARKING_APRON, names::NARROW_FLAG],
    ),
];

/// Derive the named composite signals from the per-strategy results.
/// A strategy missing from `results` is treated as the empty set.
pub fn compose(results: &StrategyResult) -> BTreeMap<String, BTreeSet<String>> {
    COMPOSITES
        .iter()
        .map(|(name, constituents)| (name.to_string(), intersect(results, constituents)))
        .collect()
}

fn intersect(results: &StrategyResult, constituents: &[&str; 3]) -> BTreeSet<String> {
    let empty = BTreeSet::new();
    let mut acc = results.get(constituents[0]).unwrap_or(&empty).clone();
    for name in &constituents[1..] {
        let set = results.get(*name).unwrap_or(&empty);
        acc = acc.intersection(set).cloned().collect();
        if acc.is_empty() {
            break;
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(codes: &[&str]) -> BTreeSet<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    fn results() -> StrategyResult {
        let mut r = StrategyResult::new();
        r.insert(names::VOLUME_SURGE.into(), set(&["600519", "000001", "300750"]));
        r.insert(names::MA_BULLISH.into(), set(&["600519", "000001"]));
        r.insert(names::PLATFORM_BREAKOUT.into(), set(&["600519", "300750"]));
        r.insert(names::YEAR_LINE_RETRACE.into(), set(&["000001"]));
        r.insert(names::LOW_DRAWDOWN_RISE.into(), set(&["000001", "600519"]));
        r.insert(names::PARKING_APRON.into(), set(&["300750"]));
        r.insert(names::NARROW_FLAG.into(), set(&["300750", "600519"]));
        r
    }

    #[test]
    fn composites_are_the_declared_intersections() {
        let composites = compose(&results());
        assert_eq!(composites["Strong Trend"], set(&["600519"]));
        assert_eq!(composites["Pullback Buy"], set(&["000001"]));
        assert_eq!(composites["Short-Term Breakout"], set(&["300750"]));
    }

    #[test]
    fn each_composite_is_a_subset_of_every_constituent() {
        let r = results();
        let composites = compose(&r);
        for (name, constituents) in &COMPOSITES {
            let composite = &composites[*name];
            for constituent in constituents {
                let empty = BTreeSet::new();
                let set = r.get(*constituent).unwrap_or(&empty);
                assert!(composite.is_subset(set), "{name} not within {constituent}");
            }
        }
    }

    #[test]
    fn missing_strategies_are_treated_as_empty() {
        let mut r = StrategyResult::new();
        r.insert(names::VOLUME_SURGE.into(), set(&["600519"]));
        let composites = compose(&r);
        assert!(composites["Strong Trend"].is_empty());
        assert!(composites["Pullback Buy"].is_empty());
        assert!(composites["Short-Term Breakout"].is_empty());
    }

    #[test]
    fn all_three_composites_are_always_present() {
        let composites = compose(&StrategyResult::new());
        assert_eq!(composites.len(), 3);
        assert!(composites.values().all(BTreeSet::is_empty));
    }

    #[test]
    fn insertion_order_of_results_does_not_matter() {
        let forward = compose(&results());
        let mut reversed = StrategyResult::new();
        for (name, codes) in results().into_iter().rev() {
            reversed.insert(name, codes);
        }
        assert_eq!(forward, compose(&reversed));
    }
}
