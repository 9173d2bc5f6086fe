//! # wallabot
//!
//! Telegram bot that archives every URL an allowed user shares to a wallabag instance.
//! Wires storage, the wallabag client, and the Telegram side into the durable delivery
//! pipeline; loads config from env / JSON file and runs until SIGINT or SIGTERM.

pub mod cli;
pub mod components;
pub mod config;
pub mod pipeline;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, BotComponents};
pub use config::{BaseConfig, BotConfig, FileConfig};
pub use pipeline::{Dispatcher, Pipeline, PipelinePorts, PipelineSettings};
pub use runner::run_bot;
