//! Request record model for persistence.
//!
//! Maps to the `Requests` table and is used by RequestRepository.

use serde::{Deserialize, Serialize};
use wallabot_core::SaveRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RequestRecord {
    pub id: i64,
    #[sqlx(rename = "URL")]
    pub url: String,
    #[sqlx(rename = "ChatID")]
    pub chat_id: i64,
    #[sqlx(rename = "MessageID")]
    pub message_id: i32,
    pub saved: bool,
}

impl RequestRecord {
    /// Rebuilds the request this record was persisted from, for re-dispatch.
    pub fn to_request(&self) -> SaveRequest {
        SaveRequest::new(self.url.clone(), self.chat_id, self.message_id)
    }
}
