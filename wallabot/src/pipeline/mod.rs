//! Durable delivery pipeline.
//!
//! ```text
//! intake ──► store worker ──► dispatch ──► dispatcher ──► ack ──► ack sink ──► notifications
//!  (persist + dedup)    ▲                  (token + POST)         (mark saved)
//!                       │
//!            recovery scanner (every rescan interval, re-emits saved = false)
//! ```
//!
//! Every arrow is a bounded `mpsc` queue. Each stage is its own task and observes the
//! shared [`CancellationToken`] at every queue wait and timer wait.

mod ack;
mod dispatcher;
mod recovery;
mod store_worker;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use storage::RequestStore;
use tokio::sync::mpsc;
use tokio::task::{self, JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use wallabot_core::SaveRequest;

pub use ack::{acknowledge, run_ack_sink};
pub use dispatcher::{run_dispatcher, Dispatcher};
pub use recovery::{recovery_scan, run_recovery_scanner};
pub use store_worker::{persist_request, run_store_worker};

/// Queue bound and recovery cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub queue_capacity: usize,
    pub rescan_interval: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            queue_capacity: 100,
            rescan_interval: Duration::from_secs(3600),
        }
    }
}

/// The pipeline's outer ends: where ingestion pushes and where confirmations come out.
pub struct PipelinePorts {
    pub intake: mpsc::Sender<SaveRequest>,
    pub notifications: mpsc::Receiver<SaveRequest>,
}

/// Running pipeline tasks.
pub struct Pipeline {
    supervisor: JoinHandle<()>,
    shutdown: CancellationToken,
}

impl Pipeline {
    /// Spawns the store worker, dispatcher, ack sink and recovery scanner.
    ///
    /// A stage that panics or returns before shutdown cancels `shutdown`, stopping the
    /// rest of the pipeline; unsaved records are picked up again on the next start.
    pub fn spawn(
        store: Arc<dyn RequestStore>,
        dispatcher: Dispatcher,
        settings: PipelineSettings,
        shutdown: CancellationToken,
    ) -> (Self, PipelinePorts) {
        let capacity = settings.queue_capacity;
        let (intake_tx, intake_rx) = mpsc::channel(capacity);
        let (dispatch_tx, dispatch_rx) = mpsc::channel(capacity);
        let (ack_tx, ack_rx) = mpsc::channel(capacity);
        let (notify_tx, notify_rx) = mpsc::channel(capacity);

        let mut stages = JoinSet::new();
        let mut names = HashMap::new();

        let handle = stages.spawn(run_store_worker(
            store.clone(),
            intake_rx,
            dispatch_tx.clone(),
            shutdown.clone(),
        ));
        names.insert(handle.id(), "store");

        let handle = stages.spawn(run_recovery_scanner(
            store.clone(),
            dispatch_tx,
            settings.rescan_interval,
            shutdown.clone(),
        ));
        names.insert(handle.id(), "recovery");

        let handle = stages.spawn(run_dispatcher(
            dispatcher,
            dispatch_rx,
            ack_tx,
            shutdown.clone(),
        ));
        names.insert(handle.id(), "dispatcher");

        let handle = stages.spawn(run_ack_sink(store, ack_rx, notify_tx, shutdown.clone()));
        names.insert(handle.id(), "ack");

        info!(
            queue_capacity = capacity,
            rescan_interval_secs = settings.rescan_interval.as_secs(),
            "Pipeline started"
        );

        let supervisor = tokio::spawn(supervise(stages, names, shutdown.clone()));
        (
            Self {
                supervisor,
                shutdown,
            },
            PipelinePorts {
                intake: intake_tx,
                notifications: notify_rx,
            },
        )
    }

    /// Cancels every stage and waits for all of them to return.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        if let Err(e) = self.supervisor.await {
            error!(error = %e, "Pipeline supervisor panicked");
        }
    }
}

/// Logs each stage exit as it happens. An exit before shutdown cancels the pipeline.
async fn supervise(
    mut stages: JoinSet<()>,
    names: HashMap<task::Id, &'static str>,
    shutdown: CancellationToken,
) {
    while let Some(exit) = stages.join_next_with_id().await {
        match exit {
            Ok((id, ())) => {
                let stage = names.get(&id).copied().unwrap_or("unknown");
                if shutdown.is_cancelled() {
                    info!(stage, "Pipeline stage stopped");
                } else {
                    warn!(stage, "Pipeline stage exited before shutdown");
                    shutdown.cancel();
                }
            }
            Err(e) => {
                let stage = names.get(&e.id()).copied().unwrap_or("unknown");
                error!(stage, error = %e, "Pipeline stage panicked");
                shutdown.cancel();
            }
        }
    }
    info!("Pipeline stopped");
}

/// Sends `request` downstream, giving up if shutdown fires while the queue is full.
/// Returns false when the request was not delivered.
pub(crate) async fn forward(
    tx: &mpsc::Sender<SaveRequest>,
    request: SaveRequest,
    shutdown: &CancellationToken,
) -> bool {
    tokio::select! {
        _ = shutdown.cancelled() => false,
        sent = tx.send(request) => sent.is_ok(),
    }
}
