//! CLI parser and config loading.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "wallabot")]
#[command(about = "Save URLs shared on Telegram to wallabag", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env and optional JSON file; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        #[arg(short, long, value_name = "PATH", help = "path to wallabag.json config file")]
        config: Option<PathBuf>,
    },
}

/// Load BotConfig from the optional file and the environment.
pub fn load_config(token: Option<String>, config: Option<PathBuf>) -> Result<BotConfig> {
    BotConfig::load(token, config)
}
