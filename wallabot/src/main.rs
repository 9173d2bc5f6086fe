//! wallabot binary: archive URLs shared on Telegram to wallabag.

use anyhow::Result;
use clap::Parser;
use wallabot::{load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, config } => {
            let config = load_config(token, config)?;
            run_bot(config).await
        }
    }
}
