use chrono::{NaiveDate, Weekday};

/// All configuration loaded from environment variables at startup.
/// Optional values fall back to defaults; malformed values cause an
/// immediate panic with a clear message.
#[derive(Debug, Clone)]
pub struct Config {
    /// Point-in-time evaluation cutoff. `None` = screen against all
    /// available history up to the live snapshot date.
    pub evaluation_cutoff: Option<NaiveDate>,

    /// Day of the week on which the registry swaps in the relaxed
    /// moving-average check.
    pub weekday_override: Option<Weekday>,

    // Telegram (optional; the log sink is used when no token is set)
    pub telegram_token: Option<String>,
    pub telegram_chat_ids: Vec<i64>,

    /// Pause between successive history fetches, to stay inside the data
    /// source's rate tolerance.
    pub fetch_pause_ms: u64,

    /// Strategy registry config file path.
    pub strategy_config_path: String,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        let evaluation_cutoff = optional_env("END_DATE").map(|v| {
            NaiveDate::parse_from_str(&v, "%Y-%m-%d")
                .unwrap_or_else(|_| panic!("END_DATE must be YYYY-MM-DD, got: '{v}'"))
        });

        let weekday_override = optional_env("WEEKDAY_OVERRIDE").map(|v| {
            v.parse::<Weekday>()
                .unwrap_or_else(|_| panic!("WEEKDAY_OVERRIDE must be a weekday name, got: '{v}'"))
        });

        let telegram_chat_ids = optional_env("TELEGRAM_CHAT_IDS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| {
                        s.trim().parse::<i64>().unwrap_or_else(|_| {
                            panic!("TELEGRAM_CHAT_IDS contains non-numeric id: '{}'", s.trim())
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Config {
            evaluation_cutoff,
            weekday_override,
            telegram_token: optional_env("TELEGRAM_TOKEN"),
            telegram_chat_ids,
            fetch_pause_ms: optional_env("FETCH_PAUSE_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(1_000),
            strategy_config_path: optional_env("STRATEGY_CONFIG_PATH")
                .unwrap_or_else(|| "config/strategies.toml".to_string()),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
