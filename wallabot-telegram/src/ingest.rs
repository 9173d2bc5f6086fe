//! Turns one inbound message into save requests on the intake queue.

use tokio::sync::mpsc;
use tracing::{info, warn};
use wallabot_core::SaveRequest;

use crate::adapters::IncomingMessage;
use crate::filter::SenderFilter;
use crate::urls::extract_urls;

/// Applies the sender filter, extracts URLs and pushes one request per URL.
///
/// Waits while the intake queue is full. Returns how many requests were queued.
pub async fn ingest_message(
    message: &IncomingMessage,
    filter: &SenderFilter,
    intake: &mpsc::Sender<SaveRequest>,
) -> usize {
    let Some(text) = message.text.as_deref() else {
        return 0;
    };

    info!(
        chat_id = message.chat_id,
        message_id = message.message_id,
        message_content = %text,
        "Telegram received"
    );

    if !filter.allows(message.sender_username.as_deref()) {
        info!(
            username = message.sender_username.as_deref().unwrap_or("<none>"),
            "Telegram discards as it is from user"
        );
        return 0;
    }

    let mut queued = 0;
    for url in extract_urls(text) {
        info!(url = %url, "Found URL");
        let request = SaveRequest::new(url, message.chat_id, message.message_id);
        if let Err(e) = intake.send(request).await {
            warn!(url = %e.0.url, "Intake queue closed, dropping request");
            break;
        }
        queued += 1;
    }
    queued
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(username: Option<&str>, text: Option<&str>) -> IncomingMessage {
        IncomingMessage {
            chat_id: 100,
            message_id: 5,
            sender_username: username.map(str::to_string),
            text: text.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_allowed_sender_urls_are_queued() {
        let (tx, mut rx) = mpsc::channel(10);
        let filter = SenderFilter::from_usernames(["alice"]);

        let queued = ingest_message(
            &message(Some("alice"), Some("https://a.example and https://b.example")),
            &filter,
            &tx,
        )
        .await;

        assert_eq!(queued, 2);
        assert_eq!(
            rx.recv().await.unwrap(),
            SaveRequest::new("https://a.example", 100, 5)
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            SaveRequest::new("https://b.example", 100, 5)
        );
    }

    #[tokio::test]
    async fn test_unknown_sender_is_discarded() {
        let (tx, mut rx) = mpsc::channel(10);
        let filter = SenderFilter::from_usernames(["alice"]);

        let queued =
            ingest_message(&message(Some("mallory"), Some("https://a.example")), &filter, &tx).await;

        assert_eq!(queued, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_message_without_text_or_urls() {
        let (tx, mut rx) = mpsc::channel(10);
        let filter = SenderFilter::from_usernames(["alice"]);

        assert_eq!(ingest_message(&message(Some("alice"), None), &filter, &tx).await, 0);
        assert_eq!(
            ingest_message(&message(Some("alice"), Some("hello")), &filter, &tx).await,
            0
        );
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_closed_intake_stops_ingestion() {
        let (tx, rx) = mpsc::channel(10);
        drop(rx);
        let filter = SenderFilter::from_usernames(["alice"]);

        let queued =
            ingest_message(&message(Some("alice"), Some("https://a.example")), &filter, &tx).await;

        assert_eq!(queued, 0);
    }
}
