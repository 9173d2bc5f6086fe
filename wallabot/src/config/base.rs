//! Base config: Telegram connection, logging, database, pipeline timing. Loaded from env.

use std::env;
use std::time::Duration;

use anyhow::Result;

use super::file::FileConfig;

pub const DEFAULT_DATABASE_URL: &str = "./wallabag.db";
pub const DEFAULT_LOG_FILE: &str = "logs/wallabot.log";
pub const DEFAULT_RESCAN_INTERVAL_SECS: u64 = 3600;
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN, `--token`, or `token` in the config file
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// LOG_FILE
    pub log_file: String,
    /// DATABASE_URL: file path or sqlx SQLite URL
    pub database_url: String,
    /// RESCAN_INTERVAL_SECS: period of the recovery scan
    pub rescan_interval_secs: u64,
    /// QUEUE_CAPACITY: bound of every pipeline queue
    pub queue_capacity: usize,
}

impl BaseConfig {
    /// `token` wins over BOT_TOKEN, which wins over the file.
    pub fn load(token: Option<String>, file: &FileConfig) -> Result<Self> {
        let bot_token = token
            .or_else(|| non_empty_env("BOT_TOKEN"))
            .or_else(|| file.token.clone())
            .unwrap_or_default();
        let database_url =
            non_empty_env("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let log_file = non_empty_env("LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
        let telegram_api_url =
            non_empty_env("TELEGRAM_API_URL").or_else(|| non_empty_env("TELOXIDE_API_URL"));
        let rescan_interval_secs = parse_env("RESCAN_INTERVAL_SECS")?
            .unwrap_or(DEFAULT_RESCAN_INTERVAL_SECS);
        let queue_capacity = parse_env("QUEUE_CAPACITY")?.unwrap_or(DEFAULT_QUEUE_CAPACITY);

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            database_url,
            rescan_interval_secs,
            queue_capacity,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("Telegram bot token is not set (BOT_TOKEN, --token or config file)");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if self.rescan_interval_secs == 0 {
            anyhow::bail!("RESCAN_INTERVAL_SECS must be greater than zero");
        }
        if self.queue_capacity == 0 {
            anyhow::bail!("QUEUE_CAPACITY must be greater than zero");
        }
        Ok(())
    }

    pub fn rescan_interval(&self) -> Duration {
        Duration::from_secs(self.rescan_interval_secs)
    }
}

pub(crate) fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match non_empty_env(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| anyhow::anyhow!("{} is not a valid number: {}", key, raw)),
        None => Ok(None),
    }
}
