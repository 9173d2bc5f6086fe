//! Shared helpers for wallabot integration tests: a mockito-backed wallabag and test stores.

#![allow(dead_code)]

use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use storage::{MarkSavedOutcome, PersistOutcome, RequestRecord, RequestStore, StorageError};
use wallabag_client::{WallabagClient, WallabagConfig};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use wallabot_core::SaveRequest;

pub const TEST_TOKEN: &str = "T";

pub fn wallabag_config(server: &mockito::ServerGuard) -> WallabagConfig {
    WallabagConfig {
        site: server.url(),
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        username: "alice".to_string(),
        password: "hunter2".to_string(),
    }
}

pub fn client_for(server: &mockito::ServerGuard) -> WallabagClient {
    WallabagClient::new(wallabag_config(server)).expect("client must build")
}

/// Token endpoint answering `{access_token: "T", expires_in}`.
pub async fn mock_token(
    server: &mut mockito::ServerGuard,
    expires_in: i64,
    expected_calls: usize,
) -> mockito::Mock {
    server
        .mock("GET", "/oauth/v2/token")
        .match_query(mockito::Matcher::UrlEncoded(
            "grant_type".into(),
            "password".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"access_token":"{}","expires_in":{}}}"#,
            TEST_TOKEN, expires_in
        ))
        .expect(expected_calls)
        .create_async()
        .await
}

/// Entries endpoint answering `status` for requests authorized with the test token.
pub async fn mock_entries(
    server: &mut mockito::ServerGuard,
    status: usize,
    expected_calls: usize,
) -> mockito::Mock {
    server
        .mock("POST", "/api/entries.json")
        .match_header("authorization", format!("Bearer {}", TEST_TOKEN).as_str())
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":1}"#)
        .expect(expected_calls)
        .create_async()
        .await
}

/// Store whose every operation fails, standing in for a broken database.
pub struct FailingStore;

#[async_trait]
impl RequestStore for FailingStore {
    async fn persist(&self, _request: &SaveRequest) -> Result<PersistOutcome, StorageError> {
        Err(StorageError::Database("disk I/O error".to_string()))
    }

    async fn mark_saved(&self, _url: &str) -> Result<MarkSavedOutcome, StorageError> {
        Err(StorageError::Database("disk I/O error".to_string()))
    }

    async fn find_unsaved(&self) -> Result<Vec<RequestRecord>, StorageError> {
        Err(StorageError::Database("disk I/O error".to_string()))
    }
}

/// Mutex-backed store with the same outcomes as the SQLite repository, for tests that
/// run on a paused clock where real database I/O would let time jump.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<RequestRecord>>,
}

impl MemoryStore {
    pub fn saved(&self, url: &str) -> bool {
        self.records
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.url == url && r.saved)
    }
}

#[async_trait]
impl RequestStore for MemoryStore {
    async fn persist(&self, request: &SaveRequest) -> Result<PersistOutcome, StorageError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.url == request.url) {
            return Ok(PersistOutcome::Duplicate);
        }
        let id = records.len() as i64 + 1;
        records.push(RequestRecord {
            id,
            url: request.url.clone(),
            chat_id: request.chat_id,
            message_id: request.message_id,
            saved: false,
        });
        Ok(PersistOutcome::Inserted(id))
    }

    async fn mark_saved(&self, url: &str) -> Result<MarkSavedOutcome, StorageError> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.url == url) {
            None => Ok(MarkSavedOutcome::Missing),
            Some(r) if r.saved => Ok(MarkSavedOutcome::AlreadySaved),
            Some(r) => {
                r.saved = true;
                Ok(MarkSavedOutcome::Updated)
            }
        }
    }

    async fn find_unsaved(&self) -> Result<Vec<RequestRecord>, StorageError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| !r.saved)
            .cloned()
            .collect())
    }
}

/// Store that panics on every call, standing in for a bug inside a pipeline stage.
pub struct PanickingStore;

#[async_trait]
impl RequestStore for PanickingStore {
    async fn persist(&self, _request: &SaveRequest) -> Result<PersistOutcome, StorageError> {
        panic!("persist exploded");
    }

    async fn mark_saved(&self, _url: &str) -> Result<MarkSavedOutcome, StorageError> {
        panic!("mark_saved exploded");
    }

    async fn find_unsaved(&self) -> Result<Vec<RequestRecord>, StorageError> {
        panic!("find_unsaved exploded");
    }
}

/// Tracing layer that records the message of every ERROR event.
#[derive(Clone, Default)]
pub struct ErrorEvents(Arc<Mutex<Vec<String>>>);

impl ErrorEvents {
    pub fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl<S: Subscriber> Layer<S> for ErrorEvents {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::ERROR {
            return;
        }
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.0.lock().unwrap().push(visitor.0);
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}
