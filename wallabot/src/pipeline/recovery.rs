//! Recovery scanner: re-drives every record that was never acknowledged.
//!
//! The scan reads durable state, so requests lost in flight (crash, failed dispatch,
//! failed ack write) come back on the next tick. There is no attempt counter and no
//! backoff; an unsaved record is resubmitted on every tick until it succeeds. A record
//! whose dispatch is still in flight is resubmitted too.

use std::sync::Arc;
use std::time::Duration;

use storage::RequestStore;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};
use wallabot_core::SaveRequest;

use super::forward;

/// Re-emits every unsaved record once. Returns how many were queued for dispatch.
pub async fn recovery_scan(
    store: &dyn RequestStore,
    dispatch: &mpsc::Sender<SaveRequest>,
    shutdown: &CancellationToken,
) -> usize {
    let records = match store.find_unsaved().await {
        Ok(records) => records,
        Err(e) => {
            error!(error = %e, "Recovery scan failed to read unsaved requests");
            return 0;
        }
    };

    let mut emitted = 0;
    for record in records {
        info!(
            url = %record.url,
            chat_id = record.chat_id,
            message_id = record.message_id,
            "Unfinished"
        );
        if !forward(dispatch, record.to_request(), shutdown).await {
            break;
        }
        emitted += 1;
    }
    emitted
}

/// Scans immediately, then once per `interval`, until shutdown.
#[instrument(skip(store, dispatch, shutdown))]
pub async fn run_recovery_scanner(
    store: Arc<dyn RequestStore>,
    dispatch: mpsc::Sender<SaveRequest>,
    interval: Duration,
    shutdown: CancellationToken,
) {
    info!("Recovery scanner started");
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Shutdown signal received, stopping recovery scanner");
                break;
            }
            _ = ticker.tick() => {
                let emitted = recovery_scan(store.as_ref(), &dispatch, &shutdown).await;
                info!(emitted, "Recovery scan finished");
            }
        }
    }
}
