//! Request repository: the durable table of record for save requests.
//!
//! Dedup is an existence check on the indexed `URL` column followed by an insert.
//! The two statements are not atomic; the pipeline has a single persisting worker.

use async_trait::async_trait;
use tracing::{error, info, warn};
use wallabot_core::SaveRequest;

use crate::error::StorageError;
use crate::models::{MarkSavedOutcome, PersistOutcome, RequestRecord};
use crate::repository::RequestStore;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct RequestRepository {
    pool_manager: SqlitePoolManager,
}

impl RequestRepository {
    /// Opens the database and creates the schema. Any failure here is fatal for the caller.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url)
            .await
            .map_err(|e| StorageError::Schema(e.to_string()))?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS Requests (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                URL TEXT,
                ChatID INTEGER,
                MessageID INTEGER,
                saved INTEGER
            )
            "#,
        )
        .execute(pool)
        .await
        .map_err(|e| StorageError::Schema(e.to_string()))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS URLIndex ON Requests(URL)")
            .execute(pool)
            .await
            .map_err(|e| StorageError::Schema(e.to_string()))?;

        info!("Database tables created successfully");
        Ok(())
    }

    /// Number of records stored for `url`. Dedup keeps this at 0 or 1.
    pub async fn count_by_url(&self, url: &str) -> Result<i64, StorageError> {
        let pool = self.pool_manager.pool();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM Requests WHERE URL = ?")
            .bind(url)
            .fetch_one(pool)
            .await?;

        Ok(count.0)
    }

    pub async fn find_by_url(&self, url: &str) -> Result<Option<RequestRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let record = sqlx::query_as::<_, RequestRecord>(
            "SELECT id, URL, ChatID, MessageID, saved FROM Requests WHERE URL = ? ORDER BY id LIMIT 1",
        )
        .bind(url)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}

#[async_trait]
impl RequestStore for RequestRepository {
    async fn persist(&self, request: &SaveRequest) -> Result<PersistOutcome, StorageError> {
        if self.count_by_url(&request.url).await? != 0 {
            info!(url = %request.url, "Skip existing URL");
            return Ok(PersistOutcome::Duplicate);
        }

        info!(
            url = %request.url,
            chat_id = request.chat_id,
            message_id = request.message_id,
            "Saving request to disk first"
        );

        let pool = self.pool_manager.pool();
        let result = sqlx::query(
            "INSERT INTO Requests (URL, ChatID, MessageID, saved) VALUES (?, ?, ?, 0)",
        )
        .bind(&request.url)
        .bind(request.chat_id)
        .bind(request.message_id)
        .execute(pool)
        .await?;

        Ok(PersistOutcome::Inserted(result.last_insert_rowid()))
    }

    async fn mark_saved(&self, url: &str) -> Result<MarkSavedOutcome, StorageError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query("UPDATE Requests SET saved = 1 WHERE URL = ? AND saved = 0")
            .bind(url)
            .execute(pool)
            .await?;

        if result.rows_affected() > 0 {
            info!(url = %url, "Update URL as saved");
            return Ok(MarkSavedOutcome::Updated);
        }

        if self.count_by_url(url).await? == 0 {
            error!(url = %url, "This URL should exist");
            return Ok(MarkSavedOutcome::Missing);
        }

        warn!(url = %url, "URL already marked as saved");
        Ok(MarkSavedOutcome::AlreadySaved)
    }

    async fn find_unsaved(&self) -> Result<Vec<RequestRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let records = sqlx::query_as::<_, RequestRecord>(
            "SELECT id, URL, ChatID, MessageID, saved FROM Requests WHERE saved = 0 ORDER BY id",
        )
        .fetch_all(pool)
        .await?;

        info!("Retrieved {} unsaved requests", records.len());
        Ok(records)
    }
}
