//! Acknowledgment sink: marks dispatched requests as saved and hands them to the notifier.

use std::sync::Arc;

use storage::{MarkSavedOutcome, RequestStore};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};
use wallabot_core::SaveRequest;

use super::forward;

/// Marks `request` saved, then forwards it for notification.
///
/// A missing record is logged and the notification still goes out. A SQL failure
/// abandons the request; it stays unsaved and the next recovery scan resubmits it.
pub async fn acknowledge(
    store: &dyn RequestStore,
    request: SaveRequest,
    notifications: &mpsc::Sender<SaveRequest>,
    shutdown: &CancellationToken,
) -> Option<MarkSavedOutcome> {
    info!(
        url = %request.url,
        chat_id = request.chat_id,
        message_id = request.message_id,
        "Update URL as saved"
    );

    let outcome = match store.mark_saved(&request.url).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = %e, url = %request.url, "Fail to update request to SQLite");
            return None;
        }
    };

    if outcome == MarkSavedOutcome::Missing {
        error!(url = %request.url, "Acknowledged URL has no stored record");
    }

    let url = request.url.clone();
    if !forward(notifications, request, shutdown).await {
        info!(url = %url, "Notification queue unavailable; confirmation dropped");
    }
    Some(outcome)
}

#[instrument(skip_all)]
pub async fn run_ack_sink(
    store: Arc<dyn RequestStore>,
    mut acks: mpsc::Receiver<SaveRequest>,
    notifications: mpsc::Sender<SaveRequest>,
    shutdown: CancellationToken,
) {
    info!("Ack sink started");
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Shutdown signal received, stopping ack sink");
                break;
            }
            request = acks.recv() => {
                let Some(request) = request else {
                    info!("Ack channel closed");
                    break;
                };
                acknowledge(store.as_ref(), request, &notifications, &shutdown).await;
            }
        }
    }
}
