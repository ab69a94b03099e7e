use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the broker tradebook CSV.
    pub tradebook_file: String,
    /// Session-boundary dates; one metrics row is produced per date,
    /// covering the trades opened strictly before it.
    pub trading_sessions: Vec<NaiveDate>,
    pub output_dir: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Config {
            tradebook_file: env("TRADEBOOK_FILE", "tradebook.csv"),
            trading_sessions: parse_sessions(&env("TRADING_SESSIONS", "")),
            output_dir: env("OUTPUT_DIR", "reports"),
            log_level: env("LOG_LEVEL", "info"),
        }
    }
}

/// Parse a comma-separated list of ISO dates. Unparseable entries are
/// skipped; an empty result falls back to today, which makes the single
/// session cover the whole ledger.
pub fn parse_sessions(raw: &str) -> Vec<NaiveDate> {
    let mut sessions: Vec<NaiveDate> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(d) => Some(d),
            Err(e) => {
                warn!("ignoring session date '{}': {}", s, e);
                None
            }
        })
        .collect();

    if sessions.is_empty() {
        sessions.push(chrono::Utc::now().date_naive());
    }
    sessions
}
