//! Bot configuration: BaseConfig (Telegram + log + DB + pipeline knobs) + wallabag
//! credentials and the sender allow-list.

mod base;
mod bot_config;
mod file;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use file::FileConfig;
