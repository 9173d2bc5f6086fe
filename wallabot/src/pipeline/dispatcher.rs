//! Dispatcher: submits pending requests to wallabag under a cached bearer credential.
//!
//! One dispatcher task owns the [`CredentialCache`], so refreshes never race. Requests
//! are handled one at a time; a slow remote throttles the whole dispatch path.

use chrono::Utc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};
use wallabag_client::{Credential, CredentialCache, WallabagClient, WallabagError};
use wallabot_core::SaveRequest;

use super::forward;

pub struct Dispatcher {
    client: WallabagClient,
    credentials: CredentialCache,
}

impl Dispatcher {
    pub fn new(client: WallabagClient, credentials: CredentialCache) -> Self {
        Self {
            client,
            credentials,
        }
    }

    pub fn credentials(&self) -> &CredentialCache {
        &self.credentials
    }

    /// Returns a valid bearer token, exchanging credentials only when none is cached or
    /// the cached one has expired.
    pub async fn ensure_credential(&mut self) -> Result<String, WallabagError> {
        if let Some(credential) = self.credentials.valid_at(Utc::now()) {
            return Ok(credential.token.clone());
        }

        let requested_at = Utc::now();
        let response = self.client.fetch_token().await?;
        let credential = Credential::from_response(&response, requested_at)?;
        info!(expires_at = %credential.expires_at, "Cached new wallabag credential");

        let token = credential.token.clone();
        self.credentials.store(credential);
        Ok(token)
    }

    /// Submits one request. Any failure leaves the record unsaved for the recovery scan.
    #[instrument(skip(self, request), fields(url = %request.url))]
    pub async fn submit(&mut self, request: &SaveRequest) -> Result<(), WallabagError> {
        let token = self.ensure_credential().await?;

        match self.client.create_entry(&token, &request.url).await {
            Err(e) if e.status() == Some(401) => {
                warn!("Credential rejected, dropping cached token");
                self.credentials.clear();
                Err(e)
            }
            other => other,
        }
    }
}

#[instrument(skip_all)]
pub async fn run_dispatcher(
    mut dispatcher: Dispatcher,
    mut pending: mpsc::Receiver<SaveRequest>,
    acks: mpsc::Sender<SaveRequest>,
    shutdown: CancellationToken,
) {
    info!("Dispatcher started");
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Shutdown signal received, stopping dispatcher");
                break;
            }
            request = pending.recv() => {
                let Some(request) = request else {
                    info!("Dispatch channel closed");
                    break;
                };
                if let Err(e) = dispatcher.submit(&request).await {
                    error!(error = %e, url = %request.url, chat_id = request.chat_id, "Wallabag submission failed");
                    continue;
                }
                info!(
                    url = %request.url,
                    chat_id = request.chat_id,
                    message_id = request.message_id,
                    "Wallabag says it is saved"
                );
                let url = request.url.clone();
                if !forward(&acks, request, &shutdown).await {
                    warn!(url = %url, "Ack queue unavailable; record stays unsaved for the next scan");
                }
            }
        }
    }
}
