//! Storage crate: durable table of record for save requests.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – RequestRecord, PersistOutcome, MarkSavedOutcome
//! - [`repository`] – RequestStore trait
//! - [`request_repo`] – RequestRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod models;
mod repository;
mod request_repo;
mod sqlite_pool;

#[cfg(test)]
mod request_repo_test;

pub use error::StorageError;
pub use models::{MarkSavedOutcome, PersistOutcome, RequestRecord};
pub use repository::RequestStore;
pub use request_repo::RequestRepository;
pub use sqlite_pool::SqlitePoolManager;
