//! REPL: long-polls Telegram and feeds every accepted URL into the intake queue.

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tokio::sync::mpsc;
use tracing::{info, instrument};
use wallabot_core::SaveRequest;

use crate::adapters::TelegramMessageWrapper;
use crate::filter::SenderFilter;
use crate::ingest::ingest_message;

/// Runs the teloxide REPL until it stops (Ctrl-C or a fatal polling error).
#[instrument(skip(bot, filter, intake))]
pub async fn run_repl(
    bot: teloxide::Bot,
    filter: Arc<SenderFilter>,
    intake: mpsc::Sender<SaveRequest>,
) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        info!(username = ?me.user.username, "Authorized on account");
    }

    teloxide::repl(bot, move |_bot: Bot, msg: Message| {
        let filter = filter.clone();
        let intake = intake.clone();

        async move {
            let incoming = TelegramMessageWrapper(&msg).to_incoming();
            ingest_message(&incoming, &filter, &intake).await;
            respond(())
        }
    })
    .await;

    Ok(())
}
