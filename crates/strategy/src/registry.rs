use std::collections::HashMap;

use chrono::Weekday;
use tracing::info;

use crate::checks::{
    ClimaxLimitDown, KeepIncreasing, LowDrawdownRise, NarrowFlag, ParkingApron, PlatformBreakout,
    TurtleEntry, VolumeSurge, YearLineRetrace,
};
use crate::config::{StrategyConfig, StrategyFileConfig};
use crate::{names, StrategyCheck};

/// Ordered name → check table. Insertion order is evaluation order.
pub struct StrategyRegistry {
    entries: Vec<(String, Box<dyn StrategyCheck>)>,
}

impl StrategyRegistry {
    /// Build the registry from config, exiting on unknown strategy types.
    pub fn from_config(file_cfg: &StrategyFileConfig) -> Self {
        let mut entries: Vec<(String, Box<dyn StrategyCheck>)> = Vec::new();

        for cfg in &file_cfg.strategies {
            let check = build_check(cfg)
                .unwrap_or_else(|e| panic!("Unknown strategy type '{}': {e}", cfg.strategy_type));
            info!(name = %cfg.name, kind = %cfg.strategy_type, "Registered strategy");
            entries.push((cfg.name.clone(), check));
        }

        Self { entries }
    }

    /// The built-in strategy set, in evaluation order.
    pub fn default_set() -> Self {
        let entries: Vec<(String, Box<dyn StrategyCheck>)> = vec![
            (names::VOLUME_SURGE.into(), Box::new(VolumeSurge::default())),
            (names::MA_BULLISH.into(), Box::new(KeepIncreasing::default())),
            (names::PARKING_APRON.into(), Box::new(ParkingApron::default())),
            (names::YEAR_LINE_RETRACE.into(), Box::new(YearLineRetrace::default())),
            (names::PLATFORM_BREAKOUT.into(), Box::new(PlatformBreakout::default())),
            (names::LOW_DRAWDOWN_RISE.into(), Box::new(LowDrawdownRise::default())),
            (names::TURTLE_ENTRY.into(), Box::new(TurtleEntry::default())),
            (names::NARROW_FLAG.into(), Box::new(NarrowFlag::default())),
            (names::CLIMAX_LIMIT_DOWN.into(), Box::new(ClimaxLimitDown::default())),
        ];
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered display names, in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// (name, check) pairs in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn StrategyCheck)> {
        self.entries
            .iter()
            .map(|(name, check)| (name.as_str(), check.as_ref()))
    }

    /// Replace the implementation behind an existing name. Returns `false`
    /// (registering nothing) when the name is unknown; an override never
    /// changes which strategy names exist.
    pub fn override_check(&mut self, name: &str, check: Box<dyn StrategyCheck>) -> bool {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => {
                entry.1 = check;
                true
            }
            None => false,
        }
    }

    /// On the configured day of the week, back the moving-average check
    /// with the relaxed variant. Applied once, before the screening run.
    pub fn apply_weekday_override(&mut self, today: Weekday, configured: Option<Weekday>) {
        if configured != Some(today) {
            return;
        }
        if self.override_check(names::MA_BULLISH, Box::new(KeepIncreasing::relaxed())) {
            info!(day = ?today, "Weekday override active: relaxed moving-average check");
        }
    }
}

// ─── Check builders ───────────────────────────────────────────────────────────

fn build_check(cfg: &StrategyConfig) -> Result<Box<dyn StrategyCheck>, String> {
    let p = &cfg.params;
    let check: Box<dyn StrategyCheck> = match cfg.strategy_type.as_str() {
        "volume_surge" => Box::new(VolumeSurge::new(
            param_usize(p, "baseline", 5),
            param_f64(p, "ratio", 2.0),
        )),
        "keep_increasing" => Box::new(KeepIncreasing::new(
            param_usize(p, "period", 30),
            param_f64(p, "slope", 1.2),
        )),
        "parking_apron" => Box::new(ParkingApron::new(
            param_usize(p, "window", 15),
            param_f64(p, "max_drift", 3.0),
        )),
        "year_line_retrace" => Box::new(YearLineRetrace::new(param_usize(p, "period", 250))),
        "platform_breakout" => Box::new(PlatformBreakout::new(
            param_usize(p, "period", 60),
            param_f64(p, "vol_ratio", 2.0),
        )),
        "low_drawdown_rise" => Box::new(LowDrawdownRise::new(
            param_usize(p, "window", 120),
            param_f64(p, "min_rise", 1.6),
        )),
        "turtle_entry" => Box::new(TurtleEntry::new(param_usize(p, "lookback", 60))),
        "narrow_flag" => Box::new(NarrowFlag::new(
            param_usize(p, "window", 24),
            param_f64(p, "min_ratio", 1.9),
        )),
        "climax_limit_down" => Box::new(ClimaxLimitDown::new(
            param_usize(p, "baseline", 5),
            param_f64(p, "ratio", 2.0),
        )),
        other => return Err(format!("unknown type '{other}'")),
    };
    Ok(check)
}

fn param_f64(params: &HashMap<String, toml::Value>, key: &str, default: f64) -> f64 {
    params.get(key).and_then(|v| v.as_float()).unwrap_or(default)
}

fn param_usize(params: &HashMap<String, toml::Value>, key: &str, default: usize) -> usize {
    params
        .get(key)
        .and_then(|v| v.as_integer())
        .map(|v| v as usize)
        .unwrap_or(default)
}
