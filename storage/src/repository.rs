use async_trait::async_trait;
use wallabot_core::SaveRequest;

use crate::error::StorageError;
use crate::models::{MarkSavedOutcome, PersistOutcome, RequestRecord};

/// Durable store operations the delivery pipeline depends on.
///
/// [`crate::RequestRepository`] is the SQLite implementation; tests substitute their own.
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Inserts `request` unless a record with the same URL already exists.
    async fn persist(&self, request: &SaveRequest) -> Result<PersistOutcome, StorageError>;

    /// Flags the record for `url` as saved. Idempotent once the flag is set.
    async fn mark_saved(&self, url: &str) -> Result<MarkSavedOutcome, StorageError>;

    /// All records whose `saved` flag is still false, oldest first.
    async fn find_unsaved(&self) -> Result<Vec<RequestRecord>, StorageError>;
}
