use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    /// Telegram rejected or failed a request.
    #[error("Bot error: {0}")]
    Bot(String),
}

pub type Result<T> = std::result::Result<T, BotError>;
