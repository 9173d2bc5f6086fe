//! Store worker: persists intake requests and forwards new ones to dispatch.

use std::sync::Arc;

use storage::{PersistOutcome, RequestStore};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};
use wallabot_core::SaveRequest;

use super::forward;

/// Persists one request. Only a fresh insert is forwarded; duplicates and SQL
/// failures are logged and dropped.
pub async fn persist_request(
    store: &dyn RequestStore,
    request: SaveRequest,
    dispatch: &mpsc::Sender<SaveRequest>,
    shutdown: &CancellationToken,
) -> Option<PersistOutcome> {
    let outcome = match store.persist(&request).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = %e, url = %request.url, "Fail to insert request to SQLite");
            return None;
        }
    };

    if let PersistOutcome::Inserted(id) = outcome {
        let url = request.url.clone();
        if !forward(dispatch, request, shutdown).await {
            warn!(id, url = %url, "Dispatch queue unavailable; left for recovery scan");
        }
    }
    Some(outcome)
}

#[instrument(skip_all)]
pub async fn run_store_worker(
    store: Arc<dyn RequestStore>,
    mut intake: mpsc::Receiver<SaveRequest>,
    dispatch: mpsc::Sender<SaveRequest>,
    shutdown: CancellationToken,
) {
    info!("Store worker started");
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Shutdown signal received, stopping store worker");
                break;
            }
            request = intake.recv() => {
                let Some(request) = request else {
                    info!("Intake channel closed");
                    break;
                };
                persist_request(store.as_ref(), request, &dispatch, &shutdown).await;
            }
        }
    }
}
