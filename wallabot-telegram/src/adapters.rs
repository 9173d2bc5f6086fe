//! Adapters from Telegram (teloxide) types to the ingestion view of a message.

/// What ingestion needs from an inbound chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub chat_id: i64,
    pub message_id: i32,
    pub sender_username: Option<String>,
    pub text: Option<String>,
}

/// Wraps a teloxide Message for conversion to [`IncomingMessage`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> TelegramMessageWrapper<'a> {
    pub fn to_incoming(&self) -> IncomingMessage {
        IncomingMessage {
            chat_id: self.0.chat.id.0,
            message_id: self.0.id.0,
            sender_username: self.0.from.as_ref().and_then(|u| u.username.clone()),
            text: self.0.text().map(|s| s.to_string()),
        }
    }
}
