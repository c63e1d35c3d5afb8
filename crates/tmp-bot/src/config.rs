//! Application configuration loaded from environment variables.

use anyhow::{bail, Context, Result};
use chrono::FixedOffset;
use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Chat gateway configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Account lookup configuration
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Query history configuration
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Bot configuration
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Chat gateway REST endpoint
    #[serde(default = "default_chat_service")]
    pub service_url: String,

    /// Account the bot receives and sends as
    #[serde(default = "default_bot_id")]
    pub bot_id: String,

    /// Poll interval for messages
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupBackend {
    /// Built-in or file-backed fixture accounts
    #[default]
    Mock,
    /// Remote account service
    Http,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    #[serde(default)]
    pub backend: LookupBackend,

    /// Account service base URL
    #[serde(default = "default_account_service")]
    pub base_url: String,

    /// Optional bearer token for the account service
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Retries for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Simulated latency for mock misses
    #[serde(default = "default_not_found_delay", with = "humantime_serde")]
    pub not_found_delay: Duration,

    /// JSON file replacing the built-in mock accounts
    #[serde(default)]
    pub fixtures_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Entries retained before the oldest is evicted
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Entries shown by the history command
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Also record lookups that failed at the provider level
    #[serde(default)]
    pub record_provider_failures: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Offset used when rendering dates (8 = China Standard Time)
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

impl BotConfig {
    pub fn utc_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .with_context(|| format!("Invalid UTC offset: {} hours", self.utc_offset_hours))
    }
}

// Default implementations
impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            service_url: default_chat_service(),
            bot_id: default_bot_id(),
            poll_interval: default_poll_interval(),
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            backend: LookupBackend::default(),
            base_url: default_account_service(),
            api_key: None,
            timeout: default_timeout(),
            max_retries: default_max_retries(),
            not_found_delay: default_not_found_delay(),
            fixtures_path: None,
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            recent_limit: default_recent_limit(),
            record_provider_failures: false,
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

// Default value functions
fn default_chat_service() -> String {
    "http://chat-gateway:8080".into()
}

fn default_bot_id() -> String {
    "tmp-bot".into()
}

fn default_poll_interval() -> Duration {
    Duration::from_millis(200)
}

fn default_account_service() -> String {
    "http://account-service:8080".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_max_retries() -> u32 {
    2
}

fn default_not_found_delay() -> Duration {
    Duration::from_secs(1)
}

fn default_capacity() -> usize {
    100
}

fn default_recent_limit() -> usize {
    query_ledger::DEFAULT_RECENT_LIMIT
}

fn default_log_level() -> String {
    "info".into()
}

fn default_utc_offset_hours() -> i32 {
    8
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_environment(config::Environment::default())
    }

    /// Build configuration from an environment source.
    pub fn from_environment(environment: config::Environment) -> Result<Self> {
        let config: Self = config::Config::builder()
            .add_source(
                environment
                    .separator("__")
                    // Keep strings as strings; bot ids may look numeric.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the bot cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.ledger.capacity == 0 {
            bail!("LEDGER__CAPACITY must be at least 1");
        }
        if self.ledger.recent_limit == 0 {
            bail!("LEDGER__RECENT_LIMIT must be at least 1");
        }
        if self.ledger.recent_limit > self.ledger.capacity {
            bail!(
                "LEDGER__RECENT_LIMIT ({}) exceeds LEDGER__CAPACITY ({})",
                self.ledger.recent_limit,
                self.ledger.capacity
            );
        }
        if self.bot.utc_offset_hours.abs() > 23 {
            bail!("BOT__UTC_OFFSET_HOURS must be within ±23");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let mut map = config::Map::new();
        for (key, value) in vars {
            map.insert(key.to_string(), value.to_string());
        }
        config::Environment::default().source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_environment(environment(&[])).unwrap();

        assert_eq!(config.chat.service_url, "http://chat-gateway:8080");
        assert_eq!(config.lookup.backend, LookupBackend::Mock);
        assert_eq!(config.lookup.not_found_delay, Duration::from_secs(1));
        assert_eq!(config.ledger.capacity, 100);
        assert_eq!(config.ledger.recent_limit, 10);
        assert!(!config.ledger.record_provider_failures);
        assert_eq!(config.bot.log_format, LogFormat::Pretty);
        assert_eq!(config.bot.utc_offset().unwrap().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_environment(environment(&[
            ("CHAT__BOT_ID", "12345"),
            ("LOOKUP__BACKEND", "http"),
            ("LOOKUP__TIMEOUT", "3s"),
            ("LOOKUP__API_KEY", "secret"),
            ("LEDGER__CAPACITY", "20"),
            ("LEDGER__RECORD_PROVIDER_FAILURES", "true"),
            ("BOT__LOG_FORMAT", "json"),
            ("BOT__UTC_OFFSET_HOURS", "-5"),
        ]))
        .unwrap();

        assert_eq!(config.chat.bot_id, "12345");
        assert_eq!(config.lookup.backend, LookupBackend::Http);
        assert_eq!(config.lookup.timeout, Duration::from_secs(3));
        assert_eq!(config.lookup.api_key.as_deref(), Some("secret"));
        assert_eq!(config.ledger.capacity, 20);
        assert!(config.ledger.record_provider_failures);
        assert_eq!(config.bot.log_format, LogFormat::Json);
        assert_eq!(config.bot.utc_offset().unwrap().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_recent_limit_above_capacity_rejected() {
        let result = Config::from_environment(environment(&[
            ("LEDGER__CAPACITY", "5"),
            ("LEDGER__RECENT_LIMIT", "10"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut config = Config::default();
        config.ledger.capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_offset_out_of_range_rejected() {
        let mut config = Config::default();
        config.bot.utc_offset_hours = 30;
        assert!(config.validate().is_err());
    }
}
