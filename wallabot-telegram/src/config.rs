//! Minimal Telegram connection config: token and optional API URL.

use anyhow::{Context, Result};

pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
}

impl TelegramConfig {
    pub fn new(bot_token: String, telegram_api_url: Option<String>) -> Self {
        Self {
            bot_token,
            telegram_api_url,
        }
    }

    /// Builds the teloxide bot, pointing it at `telegram_api_url` when set.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match self.telegram_api_url {
            Some(ref url_str) => {
                let url = reqwest::Url::parse(url_str)
                    .with_context(|| format!("invalid Telegram API URL: {}", url_str))?;
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }
}
