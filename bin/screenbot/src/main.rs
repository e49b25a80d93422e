use std::path::Path;

use chrono::{Datelike, Local};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use common::Config;
use datasource::EastmoneyClient;
use notify::{LogNotifier, Notifier, TelegramNotifier};
use strategy::{StrategyFileConfig, StrategyRegistry};

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    info!(cutoff = ?cfg.evaluation_cutoff, "ScreenBot starting");

    // ── Strategy registry ─────────────────────────────────────────────────────
    let mut registry = if Path::new(&cfg.strategy_config_path).exists() {
        let file_cfg = StrategyFileConfig::load(&cfg.strategy_config_path);
        StrategyRegistry::from_config(&file_cfg)
    } else {
        info!("No strategy config file, using the built-in set");
        StrategyRegistry::default_set()
    };

    // The override keys on the evaluation date's weekday: the cutoff when
    // screening historically, otherwise today.
    let evaluation_date = cfg
        .evaluation_cutoff
        .unwrap_or_else(|| Local::now().date_naive());
    registry.apply_weekday_override(evaluation_date.weekday(), cfg.weekday_override);

    // ── Notifier ──────────────────────────────────────────────────────────────
    let notifier: Box<dyn Notifier> = match &cfg.telegram_token {
        Some(token) if !cfg.telegram_chat_ids.is_empty() => {
            info!(chats = cfg.telegram_chat_ids.len(), "Alerts go to Telegram");
            Box::new(TelegramNotifier::new(token.clone(), &cfg.telegram_chat_ids))
        }
        _ => {
            info!("No Telegram configured, alerts go to the log");
            Box::new(LogNotifier)
        }
    };

    // ── Screening pass ────────────────────────────────────────────────────────
    let source = EastmoneyClient::new();
    match screener::run_screen(&cfg, &source, &registry, notifier.as_ref()).await {
        Ok(report) => {
            let matched: usize = report.results.values().map(|codes| codes.len()).sum();
            info!(
                strategies = report.results.len(),
                matched, "Screening pass complete"
            );
        }
        Err(e) => {
            // a failed pass must be distinguishable from a zero-match pass
            error!(error = %e, "Screening pass aborted");
            std::process::exit(1);
        }
    }
}
