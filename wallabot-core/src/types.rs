//! Core types: the unit of work flowing through the pipeline and the chat it belongs to.

use serde::{Deserialize, Serialize};

/// A request to archive one URL on behalf of a chat.
///
/// `url` is the dedup key once persisted. `chat_id` and `message_id` are owned by the
/// ingestion side and carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    pub url: String,
    pub chat_id: i64,
    pub message_id: i32,
}

impl SaveRequest {
    pub fn new(url: impl Into<String>, chat_id: i64, message_id: i32) -> Self {
        Self {
            url: url.into(),
            chat_id,
            message_id,
        }
    }

    /// The chat that should receive the confirmation for this request.
    pub fn chat(&self) -> Chat {
        Chat { id: self.chat_id }
    }
}

/// Chat (channel or private) identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}
