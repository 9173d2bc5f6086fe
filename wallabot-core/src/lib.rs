//! # wallabot-core
//!
//! Core types shared by every wallabot crate: [`SaveRequest`], [`Chat`], the [`Bot`]
//! notification trait and its teloxide implementation, error types, and tracing
//! initialization.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{Bot, TelegramBot};
pub use error::{BotError, Result};
pub use logger::init_tracing;
pub use types::{Chat, SaveRequest};
