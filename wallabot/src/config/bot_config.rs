//! BotConfig: BaseConfig + wallabag credentials + sender allow-list.

use std::path::PathBuf;

use anyhow::Result;
use wallabag_client::WallabagConfig;

use super::base::non_empty_env;
use super::{BaseConfig, FileConfig};

pub struct BotConfig {
    pub base: BaseConfig,
    pub wallabag: WallabagConfig,
    pub filter_users: Vec<String>,
}

impl BotConfig {
    /// Loads the optional JSON file, then applies environment overrides.
    /// `token` overrides BOT_TOKEN. Call validate() after load to fail fast.
    pub fn load(token: Option<String>, config_file: Option<PathBuf>) -> Result<Self> {
        let file = FileConfig::resolve(config_file)?.unwrap_or_default();
        Self::from_file_and_env(token, &file)
    }

    pub fn from_file_and_env(token: Option<String>, file: &FileConfig) -> Result<Self> {
        let base = BaseConfig::load(token, file)?;

        let pick = |key: &str, fallback: &Option<String>| {
            non_empty_env(key)
                .or_else(|| fallback.clone())
                .unwrap_or_default()
        };
        let wallabag = WallabagConfig {
            site: pick("WALLABAG_SITE", &file.wallabag_site),
            client_id: pick("WALLABAG_CLIENT_ID", &file.client_id),
            client_secret: pick("WALLABAG_CLIENT_SECRET", &file.client_secret),
            username: pick("WALLABAG_USERNAME", &file.username),
            password: pick("WALLABAG_PASSWORD", &file.password),
        };

        let filter_users = match non_empty_env("FILTER_USERS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => file.filter_users.clone(),
        };

        Ok(Self {
            base,
            wallabag,
            filter_users,
        })
    }

    /// Fails when the bot token or any wallabag credential is missing.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        let missing = self.wallabag.missing_fields();
        if !missing.is_empty() {
            anyhow::bail!("Missing wallabag credentials: {}", missing.join(", "));
        }
        Ok(())
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn wallabag(&self) -> &WallabagConfig {
        &self.wallabag
    }
    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
}
