//! Notification worker: confirms saved URLs back to the originating chat.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};
use wallabot_core::{Bot, SaveRequest};

/// Consumes the notification queue until shutdown or until every sender is dropped.
///
/// The confirmation text is the saved URL. Send failures are logged and dropped.
#[instrument(skip_all)]
pub async fn run_notifier(
    bot: Arc<dyn Bot>,
    mut notifications: mpsc::Receiver<SaveRequest>,
    shutdown: CancellationToken,
) {
    info!("Notifier started");
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Shutdown signal received, stopping notifier");
                break;
            }
            request = notifications.recv() => {
                let Some(request) = request else {
                    info!("Notification channel closed");
                    break;
                };
                info!(url = %request.url, chat_id = request.chat_id, "Sending confirmation");
                if let Err(e) = bot.send_message(&request.chat(), &request.url).await {
                    error!(error = %e, url = %request.url, chat_id = request.chat_id, "Failed to send confirmation");
                }
            }
        }
    }
}
