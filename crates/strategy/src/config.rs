use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level strategy config file (TOML).
///
/// Example `config/strategies.toml`:
/// ```toml
/// [[strategy]]
/// type = "volume_surge"
/// name = "Volume Surge"
///
/// [strategy.params]
/// baseline = 5
/// ratio = 2.0
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyFileConfig {
    #[serde(rename = "strategy")]
    pub strategies: Vec<StrategyConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyConfig {
    /// Check type identifier, e.g. "volume_surge" or "turtle_entry".
    #[serde(rename = "type")]
    pub strategy_type: String,
    /// Display name shown in alerts; signal composition refers to these.
    pub name: String,
    /// Check-specific numeric parameters.
    #[serde(default)]
    pub params: HashMap<String, toml::Value>,
}

impl StrategyFileConfig {
    /// Load from a TOML file. Exits process on error.
    pub fn load(path: &str) -> Self {
        let content = std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read strategy config at '{path}': {e}"));
        toml::from_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse strategy config at '{path}': {e}"))
    }
}
