//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use std::sync::Arc;

use anyhow::Result;
use storage::RequestRepository;
use tracing::{error, info, instrument, warn};
use wallabag_client::WallabagClient;
use wallabot_telegram::{SenderFilter, TelegramConfig};

use crate::config::BotConfig;

pub struct BotComponents {
    pub repo: Arc<RequestRepository>,
    pub client: WallabagClient,
    pub teloxide_bot: teloxide::Bot,
    pub filter: Arc<SenderFilter>,
}

/// Opens the store (schema creation failure is fatal), and builds the HTTP and Telegram clients.
#[instrument(skip(config))]
pub async fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let repo = Arc::new(
        RequestRepository::new(config.database_url())
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    database_url = %config.database_url(),
                    "Failed to initialize request storage"
                );
                anyhow::anyhow!("Failed to initialize request storage: {}", e)
            })?,
    );

    let client = WallabagClient::new(config.wallabag().clone())
        .map_err(|e| anyhow::anyhow!("Failed to build wallabag client: {}", e))?;

    let teloxide_bot = TelegramConfig::new(
        config.bot_token().to_string(),
        config.telegram_api_url().map(str::to_string),
    )
    .build_bot()?;

    let filter = SenderFilter::from_usernames(&config.filter_users);
    if filter.is_empty() {
        warn!("FILTER_USERS is empty; every message will be discarded");
    } else {
        info!(allowed_users = filter.len(), "Sender filter loaded");
    }

    Ok(BotComponents {
        repo,
        client,
        teloxide_bot,
        filter: Arc::new(filter),
    })
}
