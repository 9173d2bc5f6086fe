//! # wallabot-telegram
//!
//! Telegram connectivity for the bot: adapters from teloxide types, URL extraction,
//! the sender allow-list, the polling REPL that feeds the intake queue, and the
//! worker that sends confirmations back to chats. No persistence or HTTP archiving.

mod adapters;
mod config;
mod filter;
mod ingest;
mod notifier;
mod runner;
mod urls;

pub use adapters::{IncomingMessage, TelegramMessageWrapper};
pub use config::TelegramConfig;
pub use filter::SenderFilter;
pub use ingest::ingest_message;
pub use notifier::run_notifier;
pub use runner::run_repl;
pub use urls::extract_urls;
