//! Unit tests for RequestRepository.
//!
//! Covers persist dedup, mark_saved transitions and the unsaved scan query.

use wallabot_core::SaveRequest;

use crate::models::{MarkSavedOutcome, PersistOutcome};
use crate::repository::RequestStore;
use crate::request_repo::RequestRepository;

async fn memory_repo() -> RequestRepository {
    RequestRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository")
}

#[tokio::test]
async fn test_persist_new_url_inserts_unsaved_record() {
    let repo = memory_repo().await;
    let request = SaveRequest::new("https://a.example", 456, 12);

    let outcome = repo.persist(&request).await.expect("Failed to persist");
    assert!(outcome.is_inserted());

    let record = repo
        .find_by_url("https://a.example")
        .await
        .expect("Failed to query")
        .expect("record must exist");
    assert_eq!(record.url, "https://a.example");
    assert_eq!(record.chat_id, 456);
    assert_eq!(record.message_id, 12);
    assert!(!record.saved);
}

#[tokio::test]
async fn test_persist_same_url_twice_is_duplicate() {
    let repo = memory_repo().await;

    let first = repo
        .persist(&SaveRequest::new("https://a.example", 1, 1))
        .await
        .expect("Failed to persist");
    let second = repo
        .persist(&SaveRequest::new("https://a.example", 2, 2))
        .await
        .expect("Failed to persist");

    assert!(first.is_inserted());
    assert_eq!(second, PersistOutcome::Duplicate);
    assert_eq!(repo.count_by_url("https://a.example").await.unwrap(), 1);

    let record = repo.find_by_url("https://a.example").await.unwrap().unwrap();
    assert_eq!(record.chat_id, 1, "duplicate must not overwrite the first record");
}

#[tokio::test]
async fn test_persist_assigns_increasing_ids() {
    let repo = memory_repo().await;

    let a = repo
        .persist(&SaveRequest::new("https://a.example", 1, 0))
        .await
        .unwrap();
    let b = repo
        .persist(&SaveRequest::new("https://b.example", 1, 0))
        .await
        .unwrap();

    match (a, b) {
        (PersistOutcome::Inserted(a), PersistOutcome::Inserted(b)) => assert!(b > a),
        other => panic!("expected two inserts, got {:?}", other),
    }
}

#[tokio::test]
async fn test_persist_duplicate_of_saved_url_is_discarded() {
    let repo = memory_repo().await;
    let request = SaveRequest::new("https://a.example", 1, 0);

    repo.persist(&request).await.unwrap();
    repo.mark_saved(&request.url).await.unwrap();

    assert_eq!(repo.persist(&request).await.unwrap(), PersistOutcome::Duplicate);
    assert!(repo.find_unsaved().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_mark_saved_is_monotonic() {
    let repo = memory_repo().await;
    repo.persist(&SaveRequest::new("https://a.example", 1, 0))
        .await
        .unwrap();

    assert_eq!(
        repo.mark_saved("https://a.example").await.unwrap(),
        MarkSavedOutcome::Updated
    );
    assert_eq!(
        repo.mark_saved("https://a.example").await.unwrap(),
        MarkSavedOutcome::AlreadySaved
    );

    let record = repo.find_by_url("https://a.example").await.unwrap().unwrap();
    assert!(record.saved);
}

#[tokio::test]
async fn test_mark_saved_missing_url() {
    let repo = memory_repo().await;

    let outcome = repo.mark_saved("https://nowhere.example").await.unwrap();

    assert_eq!(outcome, MarkSavedOutcome::Missing);
    assert_eq!(repo.count_by_url("https://nowhere.example").await.unwrap(), 0);
}

#[tokio::test]
async fn test_find_unsaved_returns_only_unsaved_in_id_order() {
    let repo = memory_repo().await;
    for url in ["https://a.example", "https://b.example", "https://c.example"] {
        repo.persist(&SaveRequest::new(url, 7, 0)).await.unwrap();
    }
    repo.mark_saved("https://b.example").await.unwrap();

    let unsaved = repo.find_unsaved().await.expect("Failed to scan");

    let urls: Vec<&str> = unsaved.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, vec!["https://a.example", "https://c.example"]);
    assert!(unsaved.iter().all(|r| !r.saved));
    assert_eq!(unsaved[0].to_request(), SaveRequest::new("https://a.example", 7, 0));
}

#[tokio::test]
async fn test_find_unsaved_empty_store() {
    let repo = memory_repo().await;
    assert!(repo.find_unsaved().await.unwrap().is_empty());
}
